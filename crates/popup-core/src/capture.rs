//! Page and selection capture from the active tab.
//!
//! Both operations treat an unreachable page as a normal outcome: the
//! selection degrades to "nothing selected", the page capture to
//! `PopupError::Capture` for the caller to render as a notice.

use popup_types::{PopupError, Result, page::PageSnapshot};
use crate::ports::TabsPort;

/// Selected text in the active tab, if any. Never fails.
pub async fn capture_selection(tabs: &dyn TabsPort) -> Option<String> {
    let tab = match tabs.active_tab().await {
        Ok(tab) => tab,
        Err(e) => {
            log::debug!("No active tab for selection: {}", e);
            return None;
        }
    };
    match tabs.request_selection(tab.id).await {
        Ok(Some(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            log::debug!("No text selected or content script not loaded: {}", e);
            None
        }
    }
}

/// Extract the main content of the active tab, keeping at most `limit` chars.
pub async fn capture_page(tabs: &dyn TabsPort, limit: usize) -> Result<PageSnapshot> {
    let tab = tabs
        .active_tab()
        .await
        .map_err(|e| PopupError::Capture(e.to_string()))?;
    let raw = tabs
        .extract_page(tab.id)
        .await
        .map_err(|e| PopupError::Capture(e.to_string()))?;

    let original_length = raw.content.chars().count();
    Ok(PageSnapshot {
        title: raw.title,
        url: raw.url,
        content: truncate_chars(&raw.content, limit).to_string(),
        original_length,
    })
}

/// Prefix of `text` holding at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
