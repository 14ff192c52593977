use parts_core::{KeyValueStore, ViewerError};
use web_sys as web;

/// `window.localStorage` behind the core store trait.
pub struct LocalStorage {
    storage: web::Storage,
}

impl LocalStorage {
    /// `None` when storage is disabled (private mode, sandboxed iframe).
    pub fn open() -> Option<Self> {
        let storage = web::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ViewerError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ViewerError::StorageUnavailable {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// Local storage when available, else an in-memory map for this page view.
pub enum PageStore {
    Local(LocalStorage),
    Memory(parts_core::MemoryStore),
}

impl PageStore {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Some(local) => Self::Local(local),
            None => {
                log::warn!("[persist] localStorage unavailable; edits last for this page only");
                Self::Memory(parts_core::MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for PageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(s) => s.get_item(key),
            Self::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ViewerError> {
        match self {
            Self::Local(s) => s.set_item(key, value),
            Self::Memory(s) => s.set_item(key, value),
        }
    }
}
