//! `chrome.storage.local` backend.
//!
//! Scoped to the extension and survives popup close. Values go in as native
//! JS values (parsed from the JSON bytes the core hands us), so other
//! extension pages see plain objects rather than opaque blobs.

use async_trait::async_trait;
use js_sys::{Object, Promise, Reflect, JSON};
use wasm_bindgen::prelude::*;

use popup_core::ports::StoragePort;
use popup_types::{PopupError, Result};
use crate::js;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn storage_local_get(keys: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &Object) -> std::result::Result<Promise, JsValue>;
}

pub struct ChromeStorage;

impl ChromeStorage {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available() -> bool {
        js::has_global(&["chrome", "storage", "local"])
    }

    /// `{ [key]: value }`, or an empty object when nothing is stored
    async fn items(key: &str) -> Result<JsValue> {
        let promise = storage_local_get(&JsValue::from_str(key)).map_err(storage_err)?;
        js::await_promise(promise).await.map_err(PopupError::Storage)
    }
}

impl Default for ChromeStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn storage_err(e: JsValue) -> PopupError {
    PopupError::Storage(js::describe(&e))
}

#[async_trait(?Send)]
impl StoragePort for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let items = Self::items(key).await?;
        let value = Reflect::get(&items, &JsValue::from_str(key)).map_err(storage_err)?;
        if value.is_undefined() {
            return Ok(None);
        }

        let json: String = JSON::stringify(&value)
            .map_err(storage_err)?
            .into();
        Ok(Some(json.into_bytes()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| PopupError::Serialization(e.to_string()))?;
        let parsed = JSON::parse(text)
            .map_err(|e| PopupError::Serialization(js::describe(&e)))?;

        let items = Object::new();
        Reflect::set(&items, &JsValue::from_str(key), &parsed).map_err(storage_err)?;
        let promise = storage_local_set(&items).map_err(storage_err)?;
        js::await_promise(promise).await.map_err(PopupError::Storage)?;
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "chrome.storage.local"
    }
}
