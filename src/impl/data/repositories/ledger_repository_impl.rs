use fractic_server_error::ServerError;
use tracing::{debug, warn};

use crate::{
    data::datasources::key_value_storage::KeyValueStorage,
    domain::repositories::ledger_repository::LedgerRepository,
    entities::{CloudConfig, Collection, CLOUD_CONFIG_KEY},
    errors::{CollectionFloorReached, DocumentSerializeFailed},
};

pub(crate) struct LedgerRepositoryImpl<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> LedgerRepositoryImpl<S> {
    pub(crate) fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: KeyValueStorage> LedgerRepository for LedgerRepositoryImpl<S> {
    fn get_all<C: Collection>(&self) -> Vec<C> {
        let Some(raw) = self.storage.get(C::STORAGE_KEY) else {
            return C::default_collection();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                collection = C::NAME,
                error = %e,
                "stored collection is corrupt; falling back to default"
            );
            C::default_collection()
        })
    }

    fn save_all<C: Collection>(&self, entities: &[C]) -> Result<(), ServerError> {
        let raw = serde_json::to_string(entities)
            .map_err(|e| DocumentSerializeFailed::with_debug(C::NAME, &e))?;
        self.storage.set(C::STORAGE_KEY, &raw)?;
        debug!(collection = C::NAME, count = entities.len(), "collection saved");
        Ok(())
    }

    fn add<C: Collection>(&self, entity: C) -> Result<(), ServerError> {
        let mut entities = self.get_all::<C>();
        entities.push(entity);
        self.save_all(&entities)
    }

    fn update<C: Collection>(&self, entity: C) -> Result<(), ServerError> {
        let mut entities = self.get_all::<C>();
        match entities.iter_mut().find(|e| e.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                self.save_all(&entities)
            }
            None => {
                debug!(collection = C::NAME, id = entity.id(), "update target not found");
                Ok(())
            }
        }
    }

    fn delete<C: Collection>(&self, id: &str) -> Result<(), ServerError> {
        let entities = self.get_all::<C>();
        let before = entities.len();
        let remaining: Vec<C> = entities.into_iter().filter(|e| e.id() != id).collect();
        if remaining.len() == before {
            return Ok(());
        }
        if remaining.len() < C::FLOOR {
            return Err(CollectionFloorReached::new(C::NAME, C::FLOOR));
        }
        self.save_all(&remaining)
    }

    fn get_cloud_config(&self) -> Option<CloudConfig> {
        let raw = self.storage.get(CLOUD_CONFIG_KEY)?;
        serde_json::from_str::<CloudConfig>(&raw)
            .map_err(|e| warn!(error = %e, "stored cloud config is corrupt; ignoring"))
            .ok()
    }

    fn save_cloud_config(&self, config: &CloudConfig) -> Result<(), ServerError> {
        let raw = serde_json::to_string(config)
            .map_err(|e| DocumentSerializeFailed::with_debug(CLOUD_CONFIG_KEY, &e))?;
        self.storage.set(CLOUD_CONFIG_KEY, &raw)
    }

    fn clear_cloud_config(&self) -> Result<(), ServerError> {
        self.storage.remove(CLOUD_CONFIG_KEY)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        self.storage.get(key)
    }

    fn restore_raw(&self, key: &str, raw: Option<&str>) -> Result<(), ServerError> {
        match raw {
            Some(raw) => self.storage.set(key, raw),
            None => self.storage.remove(key),
        }
    }
}
