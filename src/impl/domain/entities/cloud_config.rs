use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

pub const CLOUD_CONFIG_KEY: &str = "spendwise_cloud_config";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudConfig {
    pub token: String,
    /// Remote document id. Empty until the first successful push.
    #[serde(default)]
    pub gist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudState {
    Unlinked,
    Linked,
}

impl CloudConfig {
    /// Config for a first push: the remote document will be created.
    pub fn unlinked(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            gist_id: String::new(),
            last_sync: None,
        }
    }

    pub fn linked(token: impl Into<String>, gist_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            gist_id: gist_id.into(),
            last_sync: None,
        }
    }

    pub fn state(&self) -> CloudState {
        if self.gist_id.is_empty() {
            CloudState::Unlinked
        } else {
            CloudState::Linked
        }
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("token", &"<redacted>")
            .field("gist_id", &self.gist_id)
            .field("last_sync", &self.last_sync)
            .finish()
    }
}

/// Result of a pull that reached the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The config has no gist id yet; nothing was requested.
    NothingToFetch,
    /// Every collection present remotely replaced its local counterpart.
    Merged,
    /// The remote document could not be interpreted; local data is unchanged.
    Rejected,
}
