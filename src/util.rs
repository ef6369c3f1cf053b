use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use chrono::NaiveDate;
use fractic_server_error::ServerError;
use iso_currency::Currency;
use tracing::info;

use crate::{
    config::SpendwiseConfig,
    data::{
        datasources::{
            file_storage::FileStorage,
            gist_datasource::{GistHttpDatasource, GistTransport},
            key_value_storage::KeyValueStorage,
        },
        repositories::{
            cloud_repository_impl::CloudRepositoryImpl,
            ledger_repository_impl::LedgerRepositoryImpl,
        },
    },
    domain::{
        logic::{
            summary_processor::{sort_for_listing, SummaryProcessor},
            utils::today,
        },
        repositories::ledger_repository::LedgerRepository as _,
        usecases::{
            snapshot_usecase::{SnapshotUsecase as _, SnapshotUsecaseImpl},
            sync_usecase::{SyncUsecase as _, SyncUsecaseImpl},
        },
    },
    entities::{
        Category, CloudConfig, CloudState, Collection, Contact, DebtEntry, DebtLedger,
        FetchOutcome, PartialSnapshot, PeriodFilter, Snapshot, SpendingSummary, Transaction,
    },
    errors::SyncAlreadyInProgress,
    presentation::{export_writer::ExportWriter, utils::format_amount},
};

type Ledger<S> = LedgerRepositoryImpl<S>;

/// The ledger: local collections, snapshot import/export, and the cloud
/// mirror.
///
/// Every store call completes before returning. Only the two cloud calls are
/// async, and at most one of them runs at a time.
pub struct SpendwiseDb<S, T = GistHttpDatasource>
where
    S: KeyValueStorage,
    T: GistTransport,
{
    ledger_repository: Arc<Ledger<S>>,
    snapshot_usecase: SnapshotUsecaseImpl<Ledger<S>>,
    sync_usecase: SyncUsecaseImpl<Ledger<S>, CloudRepositoryImpl<T>>,
    export_writer: ExportWriter,
    currency: Currency,
    sync_in_flight: AtomicBool,
}

impl SpendwiseDb<FileStorage> {
    /// File-backed ledger in `config.storage_dir`, mirrored over HTTP.
    pub fn open(config: &SpendwiseConfig) -> Result<Self, ServerError> {
        Self::new(FileStorage::new(&config.storage_dir), config)
    }
}

impl<S: KeyValueStorage> SpendwiseDb<S> {
    pub fn new(storage: S, config: &SpendwiseConfig) -> Result<Self, ServerError> {
        Self::with_transport(storage, GistHttpDatasource::new(config)?, config)
    }
}

impl<S, T> SpendwiseDb<S, T>
where
    S: KeyValueStorage,
    T: GistTransport,
{
    pub fn with_transport(
        storage: S,
        transport: T,
        config: &SpendwiseConfig,
    ) -> Result<Self, ServerError> {
        let ledger_repository = Arc::new(LedgerRepositoryImpl::new(storage));
        Ok(Self {
            snapshot_usecase: SnapshotUsecaseImpl::new(ledger_repository.clone()),
            sync_usecase: SyncUsecaseImpl::new(
                SnapshotUsecaseImpl::new(ledger_repository.clone()),
                CloudRepositoryImpl::new(transport, config),
            ),
            ledger_repository,
            export_writer: ExportWriter::new(),
            currency: config.currency()?,
            sync_in_flight: AtomicBool::new(false),
        })
    }

    // Collections.
    // ---

    pub fn get_all<C: Collection>(&self) -> Vec<C> {
        self.ledger_repository.get_all()
    }

    pub fn save_all<C: Collection>(&self, entities: &[C]) -> Result<(), ServerError> {
        self.ledger_repository.save_all(entities)
    }

    pub fn add<C: Collection>(&self, entity: C) -> Result<(), ServerError> {
        self.ledger_repository.add(entity)
    }

    pub fn update<C: Collection>(&self, entity: C) -> Result<(), ServerError> {
        self.ledger_repository.update(entity)
    }

    pub fn delete<C: Collection>(&self, id: &str) -> Result<(), ServerError> {
        self.ledger_repository.delete::<C>(id)
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.get_all()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.get_all()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.get_all()
    }

    pub fn debts(&self) -> Vec<DebtEntry> {
        self.get_all()
    }

    // Snapshots.
    // ---

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_usecase.snapshot()
    }

    pub fn import_snapshot(&self, doc: PartialSnapshot) -> Result<(), ServerError> {
        self.snapshot_usecase.import_snapshot(doc)
    }

    pub fn import_snapshot_json(&self, doc: &str) -> Result<(), ServerError> {
        self.snapshot_usecase.import_json(doc)
    }

    pub fn export_json(&self) -> Result<String, ServerError> {
        self.snapshot_usecase.snapshot_json()
    }

    /// Writes `spendwise_backup_<today>.json` into `dir` and returns its path.
    pub async fn export_full_database(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ServerError> {
        let json = self.export_json()?;
        self.export_writer.write(dir.as_ref(), today(), &json).await
    }

    // Cloud.
    // ---

    pub fn get_cloud_config(&self) -> Option<CloudConfig> {
        self.ledger_repository.get_cloud_config()
    }

    pub fn save_cloud_config(&self, config: &CloudConfig) -> Result<(), ServerError> {
        self.ledger_repository.save_cloud_config(config)
    }

    /// Links to an existing remote document without pushing.
    pub fn link_cloud(
        &self,
        token: impl Into<String>,
        gist_id: impl Into<String>,
    ) -> Result<CloudConfig, ServerError> {
        let config = CloudConfig::linked(token, gist_id);
        self.save_cloud_config(&config)?;
        info!(gist_id = %config.gist_id, "cloud linked");
        Ok(config)
    }

    /// Forgets the local cloud config. The remote document is not deleted.
    pub fn disconnect_cloud(&self) -> Result<(), ServerError> {
        self.ledger_repository.clear_cloud_config()?;
        info!("cloud disconnected");
        Ok(())
    }

    pub fn cloud_state(&self) -> CloudState {
        self.get_cloud_config()
            .map_or(CloudState::Unlinked, |c| c.state())
    }

    /// Pushes the snapshot and persists the returned config. On failure the
    /// stored config is left as it was.
    pub async fn sync_to_cloud(&self, config: &CloudConfig) -> Result<CloudConfig, ServerError> {
        let _guard = SyncGuard::acquire(&self.sync_in_flight)?;
        let updated = self.sync_usecase.sync_to_cloud(config).await?;
        self.save_cloud_config(&updated)?;
        Ok(updated)
    }

    pub async fn fetch_from_cloud(&self, config: &CloudConfig) -> Result<FetchOutcome, ServerError> {
        let _guard = SyncGuard::acquire(&self.sync_in_flight)?;
        self.sync_usecase.fetch_from_cloud(config).await
    }

    // Views.
    // ---

    /// Transactions inside the period, newest first.
    pub fn transactions_in(&self, filter: PeriodFilter, today: NaiveDate) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = filter
            .apply(&self.transactions(), today)
            .into_iter()
            .cloned()
            .collect();
        sort_for_listing(&mut transactions);
        transactions
    }

    pub fn spending_summary(&self, filter: PeriodFilter, today: NaiveDate) -> SpendingSummary {
        let transactions = self.transactions();
        let in_period = filter.apply(&transactions, today);
        SummaryProcessor::new(&in_period, &self.categories()).process()
    }

    /// Lent minus borrowed for one contact.
    pub fn net_balance(&self, contact_id: &str) -> f64 {
        let (contacts, debts) = (self.contacts(), self.debts());
        DebtLedger::new(&contacts, &debts).net_balance(contact_id)
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format_amount(amount, self.currency)
    }
}

/// Marks a cloud call as in flight for as long as it is held.
struct SyncGuard<'a>(&'a AtomicBool);

impl<'a> SyncGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ServerError> {
        if flag.swap(true, Ordering::AcqRel) {
            return Err(SyncAlreadyInProgress::new());
        }
        Ok(Self(flag))
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
