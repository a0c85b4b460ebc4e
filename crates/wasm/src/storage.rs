use folio_core::theme::{PreferenceStore, StoreError};
use web_sys::{Storage, Window};

use crate::errors::describe;

/// `window.localStorage`, which may be missing or throw (private mode,
/// disabled cookies). Every failure surfaces as a [`StoreError`].
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(error = %describe(&err), "localStorage unavailable");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(|_| StoreError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Write(describe(&err)))
    }
}
