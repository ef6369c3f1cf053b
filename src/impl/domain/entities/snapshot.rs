use serde_derive::{Deserialize, Serialize};

use super::{category::Category, contact::Contact, debt_entry::DebtEntry, transaction::Transaction};

/// The whole store as one document. Used for export, import and as the cloud
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub contacts: Vec<Contact>,
    pub debts: Vec<DebtEntry>,
}

/// A snapshot that may carry only some collections. Importing it overwrites
/// exactly the collections present and leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSnapshot {
    pub transactions: Option<Vec<Transaction>>,
    pub categories: Option<Vec<Category>>,
    pub contacts: Option<Vec<Contact>>,
    pub debts: Option<Vec<DebtEntry>>,
}
