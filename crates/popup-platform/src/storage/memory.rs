//! Volatile storage for tests and for running the popup outside the
//! extension. Holds parsed JSON like `chrome.storage.local` does, so a
//! payload that would be rejected there is rejected here too, and reads
//! return the compact re-serialized form.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use popup_core::ports::StoragePort;
use popup_types::Result;

#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.items.borrow().get(key) {
            Some(value) => Ok(Some(serde_json::to_vec(value)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let parsed: Value = serde_json::from_slice(value)?;
        self.items.borrow_mut().insert(key.to_string(), parsed);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
