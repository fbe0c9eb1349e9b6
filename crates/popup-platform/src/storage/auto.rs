//! Pick the best available storage backend.
//!
//! Priority: chrome.storage.local → Memory (fallback, e.g. when the popup
//! page is opened outside the extension during development).

use std::rc::Rc;
use popup_core::ports::StoragePort;
use super::{ChromeStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    if ChromeStorage::is_available() {
        log::info!("Storage backend: chrome.storage.local");
        Rc::new(ChromeStorage::new())
    } else {
        log::warn!("chrome.storage.local unavailable, falling back to memory");
        Rc::new(MemoryStorage::new())
    }
}
