use fractic_server_error::ServerError;

use crate::entities::{CloudConfig, Collection};

/// Local persistence of the four collections and the cloud link.
///
/// Reads never fail: missing or unreadable documents yield the collection
/// default. Writes replace a whole document at once.
pub trait LedgerRepository: Send + Sync {
    fn get_all<C: Collection>(&self) -> Vec<C>;

    fn save_all<C: Collection>(&self, entities: &[C]) -> Result<(), ServerError>;

    /// Appends without a uniqueness check; the caller supplies a fresh id.
    fn add<C: Collection>(&self, entity: C) -> Result<(), ServerError>;

    /// Replaces the entity with the same id in place. Unknown ids are a
    /// silent no-op.
    fn update<C: Collection>(&self, entity: C) -> Result<(), ServerError>;

    /// Removes the entity with the given id. Unknown ids are a silent no-op.
    fn delete<C: Collection>(&self, id: &str) -> Result<(), ServerError>;

    fn get_cloud_config(&self) -> Option<CloudConfig>;

    fn save_cloud_config(&self, config: &CloudConfig) -> Result<(), ServerError>;

    fn clear_cloud_config(&self) -> Result<(), ServerError>;

    /// Raw stored document, used to restore state after a failed import.
    fn read_raw(&self, key: &str) -> Option<String>;

    /// Puts back a raw document previously returned by `read_raw`; `None`
    /// removes the key.
    fn restore_raw(&self, key: &str, raw: Option<&str>) -> Result<(), ServerError>;
}
