use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use crate::domain::logic::utils::{new_id, now_millis};

use super::collection::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Positive amounts are spending.
    pub amount: f64,
    /// Category *name*, not id. Renaming or deleting a category does not touch
    /// existing transactions.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar day the expense belongs to; used for period filtering.
    pub date: NaiveDate,
    /// Milliseconds since epoch.
    pub created_at: i64,
}

impl Transaction {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        description: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            amount,
            category: category.into(),
            description,
            date,
            created_at: now_millis(),
        }
    }
}

impl Collection for Transaction {
    const STORAGE_KEY: &'static str = "spendwise_transactions";
    const NAME: &'static str = "transactions";

    fn id(&self) -> &str {
        &self.id
    }
}
