//! Key-value backends for the save record.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StoreError;

/// A string key-value store. The save gateway owns everything above raw
/// strings: encoding, versioning, recovery.
pub trait SaveStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same map, so a caller can keep a
/// handle to inspect what a session wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }
}

impl SaveStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key))
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::SaveStore;
    use crate::error::StoreError;

    /// Browser `localStorage`. Looked up per call; private browsing modes
    /// can make it unavailable at any time.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct LocalStorage;

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }

    impl SaveStore for LocalStorage {
        fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
            storage()?
                .get_item(key)
                .map_err(|e| StoreError::Backend(format!("{e:?}")))
        }

        fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            storage()?
                .set_item(key, value)
                .map_err(|e| StoreError::Backend(format!("{e:?}")))
        }

        fn delete(&mut self, key: &str) -> Result<(), StoreError> {
            storage()?
                .remove_item(key)
                .map_err(|e| StoreError::Backend(format!("{e:?}")))
        }
    }
}
