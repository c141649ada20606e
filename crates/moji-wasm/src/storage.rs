use moji_core::{KeyValueStore, StoreError, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Key-value store over the browser's `localStorage`
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Attach to `window.localStorage`; private browsing modes may deny it
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable, results will not be kept");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> StoreResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage unavailable".into()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(e: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", e))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn backend_name(&self) -> &'static str {
        "localStorage"
    }
}
