use fractic_server_error::ServerError;
use serde_derive::Deserialize;
use serde_json::Value;

use crate::{
    entities::{Category, Contact, DebtEntry, PartialSnapshot, Snapshot, Transaction},
    errors::SnapshotMalformed,
};

/// Snapshot document as found in exports, imports and cloud payloads. Every
/// collection is optional; `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SnapshotModel {
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub contacts: Option<Vec<Contact>>,
    #[serde(default)]
    pub debts: Option<Vec<DebtEntry>>,
}

impl SnapshotModel {
    /// Validates the whole document up front. Anything other than a JSON
    /// object, or a present field of the wrong shape, is rejected.
    pub(crate) fn from_value(value: Value) -> Result<Self, ServerError> {
        if !value.is_object() {
            return Err(SnapshotMalformed::with_debug(&"document is not a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| SnapshotMalformed::with_debug(&e))
    }

    pub(crate) fn from_json_str(s: &str) -> Result<Self, ServerError> {
        let value: Value = serde_json::from_str(s).map_err(|e| SnapshotMalformed::with_debug(&e))?;
        Self::from_value(value)
    }
}

impl From<SnapshotModel> for PartialSnapshot {
    fn from(model: SnapshotModel) -> Self {
        PartialSnapshot {
            transactions: model.transactions,
            categories: model.categories,
            contacts: model.contacts,
            debts: model.debts,
        }
    }
}

impl From<Snapshot> for PartialSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        PartialSnapshot {
            transactions: Some(snapshot.transactions),
            categories: Some(snapshot.categories),
            contacts: Some(snapshot.contacts),
            debts: Some(snapshot.debts),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_partial_document_accepted() {
        let model = SnapshotModel::from_value(json!({
            "categories": [{ "id": "9", "name": "Travel", "color": "#818cf8" }],
            "debts": null,
            "somethingElse": 42
        }))
        .unwrap();
        assert_eq!(model.categories.unwrap()[0].name, "Travel");
        assert!(model.transactions.is_none());
        assert!(model.contacts.is_none());
        assert!(model.debts.is_none());
    }

    #[test]
    fn test_original_wire_format_accepted() {
        let model = SnapshotModel::from_json_str(
            r#"{
                "transactions": [{
                    "id": "1714550400000",
                    "amount": 250,
                    "category": "Food & Dining",
                    "description": "Lunch",
                    "date": "2024-05-01",
                    "createdAt": 1714550400000
                }],
                "debts": [{
                    "id": "d1",
                    "contactId": "c1",
                    "amount": 40.5,
                    "type": "borrow",
                    "date": "2024-05-02",
                    "createdAt": 1714636800000
                }]
            }"#,
        )
        .unwrap();
        let tx = &model.transactions.unwrap()[0];
        assert_eq!(tx.amount, 250.0);
        assert_eq!(tx.description.as_deref(), Some("Lunch"));
        let debt = &model.debts.unwrap()[0];
        assert_eq!(debt.debt_type, crate::entities::DebtType::Borrow);
        assert!(debt.description.is_none());
    }

    #[test]
    fn test_malformed_documents_rejected() {
        assert!(SnapshotModel::from_value(json!([1, 2, 3])).is_err());
        assert!(SnapshotModel::from_value(json!("snapshot")).is_err());
        assert!(SnapshotModel::from_value(json!({ "transactions": "nope" })).is_err());
        assert!(SnapshotModel::from_value(json!({
            "debts": [{ "id": "d", "contactId": "c", "amount": 1, "type": "gift",
                        "date": "2024-05-01", "createdAt": 0 }]
        }))
        .is_err());
        assert!(SnapshotModel::from_json_str("{ not json").is_err());
    }
}
