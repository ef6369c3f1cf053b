use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::CloudConfig;

#[async_trait]
pub trait CloudRepository: Send + Sync {
    /// Uploads the serialized snapshot. Creates the remote document when the
    /// config has no gist id, updates it otherwise. Returns the gist id.
    async fn push(&self, config: &CloudConfig, content: String) -> Result<String, ServerError>;

    /// Downloads the serialized snapshot from the linked remote document.
    async fn pull(&self, config: &CloudConfig) -> Result<String, ServerError>;
}
