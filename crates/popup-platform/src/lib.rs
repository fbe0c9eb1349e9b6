//! Browser extension adapters for the popup-core ports.
//!
//! Everything here talks to `chrome.*`, the Puter SDK or the DOM through
//! wasm-bindgen. Nothing in this crate holds conversation state.

pub mod chat;
pub mod file;
pub mod js;
pub mod sinks;
pub mod storage;
pub mod tabs;

pub use chat::PuterChat;
pub use file::{pick_text_file, AttachedFile};
pub use sinks::{BrowserClipboard, ChromeNotifier, ChromeRuntime};
pub use storage::auto_detect_storage;
pub use tabs::ChromeTabs;
