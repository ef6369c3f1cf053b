use std::sync::Arc;

use fractic_server_error::ServerError;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    data::models::snapshot_model::SnapshotModel,
    domain::repositories::ledger_repository::LedgerRepository,
    entities::{Category, Collection, Contact, DebtEntry, PartialSnapshot, Snapshot, Transaction},
    errors::DocumentSerializeFailed,
};

pub trait SnapshotUsecase: Send + Sync {
    /// All four collections, read back to back.
    fn snapshot(&self) -> Snapshot;

    /// Overwrites each collection present in `doc`; absent ones are untouched.
    /// Either every present collection is written or, on failure, none is.
    fn import_snapshot(&self, doc: PartialSnapshot) -> Result<(), ServerError>;

    /// Validates the whole JSON document before writing anything.
    fn import_value(&self, doc: Value) -> Result<(), ServerError>;

    fn import_json(&self, doc: &str) -> Result<(), ServerError>;

    /// Pretty-printed snapshot, as used for exports and the cloud payload.
    fn snapshot_json(&self) -> Result<String, ServerError>;
}

pub(crate) struct SnapshotUsecaseImpl<L: LedgerRepository> {
    ledger_repository: Arc<L>,
}

impl<L: LedgerRepository> SnapshotUsecaseImpl<L> {
    pub(crate) fn new(ledger_repository: Arc<L>) -> Self {
        Self { ledger_repository }
    }

    /// Writes one collection if present, remembering the raw document it
    /// replaced.
    fn write<C: Collection>(
        &self,
        entities: Option<Vec<C>>,
        replaced: &mut Vec<(&'static str, Option<String>)>,
    ) -> Result<(), ServerError> {
        let Some(entities) = entities else {
            return Ok(());
        };
        let previous = self.ledger_repository.read_raw(C::STORAGE_KEY);
        self.ledger_repository.save_all(&entities)?;
        replaced.push((C::STORAGE_KEY, previous));
        Ok(())
    }

    fn write_all(
        &self,
        doc: PartialSnapshot,
        replaced: &mut Vec<(&'static str, Option<String>)>,
    ) -> Result<(), ServerError> {
        self.write::<Transaction>(doc.transactions, replaced)?;
        self.write::<Category>(doc.categories, replaced)?;
        self.write::<Contact>(doc.contacts, replaced)?;
        self.write::<DebtEntry>(doc.debts, replaced)?;
        Ok(())
    }
}

impl<L: LedgerRepository> SnapshotUsecase for SnapshotUsecaseImpl<L> {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.ledger_repository.get_all(),
            categories: self.ledger_repository.get_all(),
            contacts: self.ledger_repository.get_all(),
            debts: self.ledger_repository.get_all(),
        }
    }

    fn import_snapshot(&self, doc: PartialSnapshot) -> Result<(), ServerError> {
        let mut replaced = Vec::new();
        if let Err(e) = self.write_all(doc, &mut replaced) {
            for (key, previous) in replaced.iter().rev() {
                if let Err(restore_err) =
                    self.ledger_repository.restore_raw(key, previous.as_deref())
                {
                    warn!(key, error = ?restore_err, "could not restore collection after failed import");
                }
            }
            warn!(error = ?e, "snapshot import failed; written collections rolled back");
            return Err(e);
        }
        info!(collections = replaced.len(), "snapshot imported");
        Ok(())
    }

    fn import_value(&self, doc: Value) -> Result<(), ServerError> {
        let model = SnapshotModel::from_value(doc).map_err(|e| {
            warn!("rejected malformed snapshot document");
            e
        })?;
        self.import_snapshot(model.into())
    }

    fn import_json(&self, doc: &str) -> Result<(), ServerError> {
        let model = SnapshotModel::from_json_str(doc).map_err(|e| {
            warn!("rejected malformed snapshot document");
            e
        })?;
        self.import_snapshot(model.into())
    }

    fn snapshot_json(&self) -> Result<String, ServerError> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| DocumentSerializeFailed::with_debug("snapshot", &e))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::{
        data::{
            datasources::key_value_storage::{KeyValueStorage, MemoryStorage},
            repositories::ledger_repository_impl::LedgerRepositoryImpl,
        },
        entities::DebtType,
        errors::StorageWriteFailed,
    };

    type MemoryUsecase = SnapshotUsecaseImpl<LedgerRepositoryImpl<MemoryStorage>>;

    fn usecase() -> MemoryUsecase {
        SnapshotUsecaseImpl::new(Arc::new(LedgerRepositoryImpl::new(MemoryStorage::new())))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn populate(usecase: &MemoryUsecase) -> Contact {
        let repo = &usecase.ledger_repository;
        let contact = Contact::new("Ravi");
        repo.add(Transaction::new(250.0, "Food & Dining", None, date(2024, 5, 1)))
            .unwrap();
        repo.add(Transaction::new(
            99.5,
            "Bills",
            Some("Electricity".to_string()),
            date(2024, 5, 2),
        ))
        .unwrap();
        repo.add(Category::with_color("Travel", "#818cf8")).unwrap();
        repo.add(contact.clone()).unwrap();
        repo.add(DebtEntry::new(&contact.id, 100.0, DebtType::Lent, None, date(2024, 5, 3)))
            .unwrap();
        contact
    }

    #[test]
    fn test_snapshot_import_roundtrip_is_noop() {
        let usecase = usecase();
        populate(&usecase);
        let before = usecase.snapshot();

        usecase.import_snapshot(before.clone().into()).unwrap();
        assert_eq!(usecase.snapshot(), before);

        usecase.import_json(&usecase.snapshot_json().unwrap()).unwrap();
        assert_eq!(usecase.snapshot(), before);
    }

    #[test]
    fn test_partial_import_touches_only_present_collections() {
        let usecase = usecase();
        populate(&usecase);
        let before = usecase.snapshot();

        let categories = vec![Category::with_color("Only", "#000000")];
        usecase
            .import_snapshot(PartialSnapshot {
                categories: Some(categories.clone()),
                ..Default::default()
            })
            .unwrap();

        let after = usecase.snapshot();
        assert_eq!(after.categories, categories);
        assert_eq!(after.transactions, before.transactions);
        assert_eq!(after.contacts, before.contacts);
        assert_eq!(after.debts, before.debts);
    }

    #[test]
    fn test_malformed_import_leaves_store_unchanged() {
        let usecase = usecase();
        populate(&usecase);
        let before = usecase.snapshot();

        // Valid categories but broken debts: nothing may be written.
        let result = usecase.import_value(json!({
            "categories": [],
            "debts": [{ "id": 1 }]
        }));
        assert!(result.is_err());
        assert!(usecase.import_value(json!([before.categories.len()])).is_err());
        assert!(usecase.import_json("<html>rate limited</html>").is_err());
        assert_eq!(usecase.snapshot(), before);
    }

    /// Storage that refuses writes to one key.
    struct FailingStorage {
        inner: MemoryStorage,
        failing_key: &'static str,
    }

    impl KeyValueStorage for FailingStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
            if key == self.failing_key {
                return Err(StorageWriteFailed::new(key));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), ServerError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_write_rolls_back_earlier_collections() {
        let storage = FailingStorage {
            inner: MemoryStorage::new(),
            failing_key: Contact::STORAGE_KEY,
        };
        storage
            .inner
            .set(Transaction::STORAGE_KEY, "[]")
            .unwrap();
        let usecase = SnapshotUsecaseImpl::new(Arc::new(LedgerRepositoryImpl::new(storage)));

        let result = usecase.import_snapshot(PartialSnapshot {
            transactions: Some(vec![Transaction::new(
                5.0,
                "Others",
                None,
                date(2024, 1, 1),
            )]),
            categories: Some(vec![Category::with_color("Solo", "#ffffff")]),
            contacts: Some(vec![Contact::new("Unwritable")]),
            debts: None,
        });

        assert!(result.is_err());
        let snapshot = usecase.snapshot();
        assert!(snapshot.transactions.is_empty());
        // Categories were never persisted before, so the seed set is back.
        assert_eq!(snapshot.categories.len(), 7);
        assert!(snapshot.contacts.is_empty());
    }
}
