use serde_derive::{Deserialize, Serialize};

use crate::domain::logic::utils::{new_id, now_millis};

use super::collection::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            created_at: now_millis(),
        }
    }
}

impl Collection for Contact {
    const STORAGE_KEY: &'static str = "spendwise_contacts";
    const NAME: &'static str = "contacts";

    fn id(&self) -> &str {
        &self.id
    }
}
