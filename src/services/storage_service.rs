// ============================================================================
// STORAGE SERVICE - Persistencia local (identidades + actividad reciente)
// ============================================================================
// SOLO lectura/escritura tipada en localStorage, sin lógica de negocio.
// Los errores nunca son fatales: quien llama los registra y sigue "sin estado".
// ============================================================================

use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::error::StorageError;
use crate::models::activity::{BtSubmission, PiecesSubmission, RecentList};
use crate::models::session::{CheckerIdentity, TrolleyIdentity};
use crate::utils::constants::{
    CHECKER_USER_KEY, RECENT_BT_SUBMISSIONS_KEY, RECENT_SUBMISSIONS_KEY, TROLLEY_USER_KEY,
};
use crate::utils::storage::{BrowserStorage, KeyValueStore};

#[derive(Clone)]
pub struct StorageService {
    backend: Rc<dyn KeyValueStore>,
}

impl StorageService {
    /// Servicio sobre el localStorage del navegador
    pub fn new() -> Self {
        Self::with_backend(Rc::new(BrowserStorage))
    }

    pub fn with_backend(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.read(key)? {
            Some(json) => serde_json::from_str::<T>(&json)
                .map(Some)
                .map_err(|e| StorageError::Deserialize {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.backend.write(key, &json)?;
        log::debug!("💾 [STORAGE] '{}' guardado", key);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)?;
        log::debug!("🗑️ [STORAGE] '{}' eliminado", key);
        Ok(())
    }

    /// Cargar o devolver None registrando el error (estado corrupto = sin estado)
    fn load_or_none<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load::<T>(key) {
            Ok(value) => value,
            Err(e) => {
                log::error!("❌ [STORAGE] {}", e);
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Identidades
    // ------------------------------------------------------------------------

    pub fn load_checker(&self) -> Option<CheckerIdentity> {
        self.load_or_none(CHECKER_USER_KEY)
    }

    pub fn save_checker(&self, identity: &CheckerIdentity) -> Result<(), StorageError> {
        self.save(CHECKER_USER_KEY, identity)
    }

    pub fn clear_checker(&self) -> Result<(), StorageError> {
        self.remove(CHECKER_USER_KEY)
    }

    pub fn load_trolley(&self) -> Option<TrolleyIdentity> {
        self.load_or_none(TROLLEY_USER_KEY)
    }

    pub fn save_trolley(&self, identity: &TrolleyIdentity) -> Result<(), StorageError> {
        self.save(TROLLEY_USER_KEY, identity)
    }

    pub fn clear_trolley(&self) -> Result<(), StorageError> {
        self.remove(TROLLEY_USER_KEY)
    }

    // ------------------------------------------------------------------------
    // Actividad reciente
    // ------------------------------------------------------------------------

    pub fn load_recent_pieces(&self) -> RecentList<PiecesSubmission> {
        self.load_or_none::<Vec<PiecesSubmission>>(RECENT_SUBMISSIONS_KEY)
            .map(RecentList::from_vec)
            .unwrap_or_default()
    }

    pub fn save_recent_pieces(&self, list: &RecentList<PiecesSubmission>) -> Result<(), StorageError> {
        self.save(RECENT_SUBMISSIONS_KEY, list)
    }

    pub fn load_recent_bt(&self) -> RecentList<BtSubmission> {
        self.load_or_none::<Vec<BtSubmission>>(RECENT_BT_SUBMISSIONS_KEY)
            .map(RecentList::from_vec)
            .unwrap_or_default()
    }

    pub fn save_recent_bt(&self, list: &RecentList<BtSubmission>) -> Result<(), StorageError> {
        self.save(RECENT_BT_SUBMISSIONS_KEY, list)
    }
}

impl Default for StorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    fn service() -> (StorageService, Rc<MemoryStorage>) {
        let memory = Rc::new(MemoryStorage::new());
        (StorageService::with_backend(memory.clone()), memory)
    }

    #[test]
    fn checker_identity_round_trip_and_clear() {
        let (storage, memory) = service();
        let identity = CheckerIdentity::new("C-104", "Ramp A");

        storage.save_checker(&identity).unwrap();
        assert_eq!(
            memory.read(CHECKER_USER_KEY).unwrap().as_deref(),
            Some(r#"{"checkerId":"C-104","teamName":"Ramp A"}"#)
        );
        assert_eq!(storage.load_checker(), Some(identity));

        storage.clear_checker().unwrap();
        assert_eq!(storage.load_checker(), None);
    }

    #[test]
    fn corrupted_entry_is_treated_as_absent() {
        let (storage, memory) = service();
        memory.write(TROLLEY_USER_KEY, "{not json").unwrap();
        assert_eq!(storage.load_trolley(), None);
        assert!(matches!(
            storage.load::<TrolleyIdentity>(TROLLEY_USER_KEY),
            Err(StorageError::Deserialize { .. })
        ));
    }

    #[test]
    fn recent_lists_default_to_empty() {
        let (storage, _) = service();
        assert!(storage.load_recent_pieces().is_empty());
        assert!(storage.load_recent_bt().is_empty());
    }

    #[test]
    fn oversized_history_is_truncated_on_load() {
        let (storage, memory) = service();
        let records: Vec<serde_json::Value> = (0..8)
            .map(|n| serde_json::json!({
                "mawb": format!("176-{:08}", n),
                "pcs_received": n + 1,
                "timestamp": "2026-10-18T09:30:00Z"
            }))
            .collect();
        memory
            .write(RECENT_SUBMISSIONS_KEY, &serde_json::to_string(&records).unwrap())
            .unwrap();

        let list = storage.load_recent_pieces();
        assert_eq!(list.len(), 5);
        assert_eq!(list.latest().unwrap().mawb, "176-00000000");
    }
}
