use serde::{Deserialize, Serialize};

/// The foreground tab of the foreground window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    pub title: String,
}

/// What the injected extraction function returns, before any truncation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Captured page content, limited to the configured number of characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub title: String,
    pub url: String,
    pub content: String,
    /// Character count of the extracted text before truncation
    pub original_length: usize,
}

impl PageSnapshot {
    pub fn is_truncated(&self) -> bool {
        self.content.chars().count() < self.original_length
    }
}

/// One hit from a search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}
