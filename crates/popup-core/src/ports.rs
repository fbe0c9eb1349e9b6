//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `popup-core` (pure Rust).
//! Implementations live in `popup-platform` (browser extension adapters).
//! The core never imports platform code; it only depends on these traits.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;
use popup_types::{
    Result,
    page::{RawPage, SearchResult, TabInfo},
};

// ─── Chat Port ───────────────────────────────────────────────

/// Streaming event from the hosted chat API
#[derive(Debug, Clone, PartialEq)]
pub enum ChatStreamEvent {
    /// A text fragment, in emission order
    Delta(String),
    /// Stream finished
    Done,
    /// Error during the call or the stream
    Error(String),
}

/// Request to send to the hosted chat API
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub prompt: String,
    pub model: String,
}

pub type ChatStream = Pin<Box<dyn Stream<Item = ChatStreamEvent>>>;

pub trait ChatPort {
    /// Start a streaming completion. The stream is finite and not restartable;
    /// ending without `Done` counts as completion.
    fn stream_chat(&self, req: ChatRequest) -> ChatStream;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value (overwrites)
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Tabs Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TabsPort {
    /// The foreground tab of the foreground window
    async fn active_tab(&self) -> Result<TabInfo>;

    /// Ask the content script of a tab for the current selection.
    /// Errors when no listener is present in the page.
    async fn request_selection(&self, tab_id: i32) -> Result<Option<String>>;

    /// Run the read-only extraction function inside the tab.
    /// Errors when scripting is disallowed (browser-internal pages).
    async fn extract_page(&self, tab_id: i32) -> Result<RawPage>;
}

// ─── Search Port ─────────────────────────────────────────────

#[async_trait(?Send)]
pub trait SearchPort {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Default provider: never returns anything
pub struct NoSearch;

#[async_trait(?Send)]
impl SearchPort for NoSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }
}

/// Provider that answers every query with the same results (demo mode)
pub struct StaticSearch {
    results: Vec<SearchResult>,
}

impl StaticSearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self { results }
    }

    pub fn demo() -> Self {
        Self::new(vec![SearchResult {
            title: "Risultato di esempio 1".to_string(),
            snippet: "Questo è un esempio di risultato di ricerca.".to_string(),
            url: "https://example.com/1".to_string(),
        }])
    }
}

#[async_trait(?Send)]
impl SearchPort for StaticSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
        Ok(self.results.clone())
    }
}

// ─── Side-effect sinks ───────────────────────────────────────

/// Fire-and-forget user notifications
pub trait NotifierPort {
    fn notify(&self, title: &str, message: &str);
}

/// Fire-and-forget clipboard writes
pub trait ClipboardPort {
    fn write_text(&self, text: &str);
}

/// Extension-level navigation that has no result
pub trait ExtensionPort {
    fn open_options_page(&self);
}
