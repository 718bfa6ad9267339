use shared::{KeyValueStorage, StorageError};
use wasm_bindgen::JsValue;

/// `window.localStorage`, or nothing when the browser refuses access
/// (private mode, disabled storage).
#[derive(Debug, Default)]
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { inner }
    }

    pub fn remove(&self, key: &str) {
        if let Some(storage) = &self.inner {
            let _ = storage.remove_item(key);
        }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".into()))
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(describe(e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here.
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(describe(e)))
    }
}
