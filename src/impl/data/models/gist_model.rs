use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

/// Body of a gist create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistRequestModel {
    pub description: String,
    pub public: bool,
    pub files: HashMap<String, GistFileModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistFileModel {
    pub content: String,
}

/// Subset of the gist resource returned by create, update and read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistResponseModel {
    pub id: String,
    #[serde(default)]
    pub files: HashMap<String, GistFileContentModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistFileContentModel {
    #[serde(default)]
    pub content: Option<String>,
    /// Set when the API cut `content` short; the full text lives at `raw_url`.
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub raw_url: Option<String>,
}

impl GistRequestModel {
    /// Private gist holding a single file.
    pub fn single_file(
        description: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            public: false,
            files: HashMap::from([(
                file_name.into(),
                GistFileModel {
                    content: content.into(),
                },
            )]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = GistRequestModel::single_file("backup", "spendwise_db.json", "{}");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "description": "backup",
                "public": false,
                "files": { "spendwise_db.json": { "content": "{}" } }
            })
        );
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let raw = r#"{
            "id": "abc123",
            "url": "https://api.github.com/gists/abc123",
            "files": {
                "spendwise_db.json": {
                    "filename": "spendwise_db.json",
                    "size": 2,
                    "truncated": false,
                    "content": "{}"
                }
            }
        }"#;
        let parsed: GistResponseModel = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "abc123");
        let file = &parsed.files["spendwise_db.json"];
        assert_eq!(file.content.as_deref(), Some("{}"));
        assert!(!file.truncated);
    }
}
