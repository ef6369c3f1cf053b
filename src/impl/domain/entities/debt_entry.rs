use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use crate::domain::logic::utils::{new_id, now_millis};

use super::collection::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtType {
    /// Money we received from the contact.
    Borrow,
    /// Money we gave to the contact.
    Lent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtEntry {
    pub id: String,
    /// References `Contact::id`. Not enforced; entries survive the deletion of
    /// their contact.
    pub contact_id: String,
    /// Always non-negative; direction is carried by `debt_type`.
    pub amount: f64,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: i64,
}

impl DebtEntry {
    pub fn new(
        contact_id: impl Into<String>,
        amount: f64,
        debt_type: DebtType,
        description: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            contact_id: contact_id.into(),
            amount: amount.abs(),
            debt_type,
            description,
            date,
            created_at: now_millis(),
        }
    }

    /// Contribution of this entry to the contact's net balance.
    pub fn signed_amount(&self) -> f64 {
        match self.debt_type {
            DebtType::Lent => self.amount,
            DebtType::Borrow => -self.amount,
        }
    }
}

impl Collection for DebtEntry {
    const STORAGE_KEY: &'static str = "spendwise_debts";
    const NAME: &'static str = "debts";

    fn id(&self) -> &str {
        &self.id
    }
}
