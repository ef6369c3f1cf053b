use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;
use tracing::{info, warn};

use crate::{
    data::repositories::cloud_repository_impl::CloudRepositoryImpl,
    domain::repositories::{
        cloud_repository::CloudRepository, ledger_repository::LedgerRepository,
    },
    entities::{CloudConfig, FetchOutcome},
    errors::CloudNotConfigured,
};

use super::snapshot_usecase::{SnapshotUsecase, SnapshotUsecaseImpl};

#[async_trait]
pub trait SyncUsecase: Send + Sync {
    /// Pushes the full local snapshot to the remote document, creating it if
    /// the config is unlinked. Returns the config to persist on success.
    async fn sync_to_cloud(&self, config: &CloudConfig) -> Result<CloudConfig, ServerError>;

    /// Pulls the remote snapshot and overwrites every collection it carries.
    /// Local edits made since the last push to those collections are lost.
    async fn fetch_from_cloud(&self, config: &CloudConfig) -> Result<FetchOutcome, ServerError>;
}

pub(crate) struct SyncUsecaseImpl<
    L,
    R1 = CloudRepositoryImpl, // Default.
> where
    L: LedgerRepository,
    R1: CloudRepository,
{
    snapshots: SnapshotUsecaseImpl<L>,
    cloud_repository: R1,
}

impl<L: LedgerRepository, R1: CloudRepository> SyncUsecaseImpl<L, R1> {
    pub(crate) fn new(snapshots: SnapshotUsecaseImpl<L>, cloud_repository: R1) -> Self {
        Self {
            snapshots,
            cloud_repository,
        }
    }
}

#[async_trait]
impl<L, R1> SyncUsecase for SyncUsecaseImpl<L, R1>
where
    L: LedgerRepository,
    R1: CloudRepository,
{
    async fn sync_to_cloud(&self, config: &CloudConfig) -> Result<CloudConfig, ServerError> {
        if config.token.trim().is_empty() {
            return Err(CloudNotConfigured::new());
        }
        let content = self.snapshots.snapshot_json()?;
        let creating = config.gist_id.is_empty();
        let gist_id = self
            .cloud_repository
            .push(config, content)
            .await
            .inspect_err(|e| warn!(error = ?e, "cloud push failed"))?;
        info!(gist_id = %gist_id, created = creating, "snapshot pushed to cloud");
        Ok(CloudConfig {
            token: config.token.clone(),
            gist_id,
            last_sync: Some(Utc::now()),
        })
    }

    async fn fetch_from_cloud(&self, config: &CloudConfig) -> Result<FetchOutcome, ServerError> {
        if config.gist_id.is_empty() {
            return Ok(FetchOutcome::NothingToFetch);
        }
        let content = self
            .cloud_repository
            .pull(config)
            .await
            .inspect_err(|e| warn!(error = ?e, "cloud pull failed"))?;
        match self.snapshots.import_json(&content) {
            Ok(()) => {
                info!(gist_id = %config.gist_id, "cloud snapshot merged");
                Ok(FetchOutcome::Merged)
            }
            Err(e) => {
                warn!(gist_id = %config.gist_id, error = ?e, "cloud snapshot rejected");
                Ok(FetchOutcome::Rejected)
            }
        }
    }
}
