//! Typed access to the scalar flags and the config document kept next to
//! the conversations in extension storage.

use std::rc::Rc;
use serde::{de::DeserializeOwned, Serialize};
use popup_types::{Result, config::PopupConfig};
use crate::ports::StoragePort;

pub const FIRST_TIME_KEY: &str = "firstTime";
pub const WEB_SEARCH_KEY: &str = "webSearchEnabled";
pub const CONFIG_KEY: &str = "config";

#[derive(Clone)]
pub struct Settings {
    storage: Rc<dyn StoragePort>,
}

impl Settings {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Value under `key`, or `default` when the key is absent or unreadable.
    pub async fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.storage.get(key).await? {
            Some(data) => match serde_json::from_slice(&data) {
                Ok(value) => Ok(value),
                Err(e) => {
                    log::warn!("Ignoring unreadable value under '{}': {}", key, e);
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec(value)?;
        self.storage.set(key, &data).await
    }

    pub async fn is_first_time(&self) -> Result<bool> {
        self.get_or(FIRST_TIME_KEY, true).await
    }

    pub async fn mark_welcomed(&self) -> Result<()> {
        self.set(FIRST_TIME_KEY, &false).await
    }

    pub async fn web_search_enabled(&self) -> Result<bool> {
        self.get_or(WEB_SEARCH_KEY, false).await
    }

    /// Flip the web-search flag and return the new value
    pub async fn toggle_web_search(&self) -> Result<bool> {
        let enabled = !self.web_search_enabled().await?;
        self.set(WEB_SEARCH_KEY, &enabled).await?;
        Ok(enabled)
    }

    pub async fn load_config(&self) -> Result<PopupConfig> {
        self.get_or(CONFIG_KEY, PopupConfig::default()).await
    }

    pub async fn save_config(&self, config: &PopupConfig) -> Result<()> {
        self.set(CONFIG_KEY, config).await?;
        log::info!("Config saved to storage");
        Ok(())
    }
}
