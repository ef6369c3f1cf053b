use serde::{de::DeserializeOwned, Serialize};

/// An independently persisted set of entities, stored as one document under a
/// fixed key.
pub trait Collection: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Fixed storage key of the persisted document.
    const STORAGE_KEY: &'static str;

    /// Human-readable collection name, used in errors and logs.
    const NAME: &'static str;

    /// Minimum number of entries a delete may leave behind.
    const FLOOR: usize = 0;

    fn id(&self) -> &str;

    /// Returned by reads when nothing has been persisted yet (or the stored
    /// document is unreadable).
    fn default_collection() -> Vec<Self> {
        Vec::new()
    }
}
