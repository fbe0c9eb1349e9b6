//! Prompt assembly.
//!
//! The hosted chat API takes a single string, so history, page context and
//! search results are folded into one prompt in a fixed order:
//! history → current page → web context → user message + language directive.
//! Sections with nothing to say are left out entirely.

use popup_types::{
    config::PromptConfig,
    message::Message,
    page::{SearchResult, TabInfo},
};

pub const HISTORY_HEADER: &str = "Conversazione precedente:";
pub const PAGE_PREFIX: &str = "Pagina corrente:";
pub const WEB_HEADER: &str = "Informazioni dal web:";
pub const USER_PREFIX: &str = "Utente:";

pub struct PromptBuilder<'a> {
    config: &'a PromptConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(config: &'a PromptConfig) -> Self {
        Self { config }
    }

    /// `history` is the conversation as it was before `message` was added.
    pub fn build(
        &self,
        history: &[Message],
        message: &str,
        page: Option<&TabInfo>,
        search_results: &[SearchResult],
    ) -> String {
        let mut prompt = String::new();

        let window = history_window(history, self.config.history_window);
        if !window.is_empty() {
            let lines: Vec<String> = window
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect();
            prompt.push_str(HISTORY_HEADER);
            prompt.push('\n');
            prompt.push_str(&lines.join("\n"));
            prompt.push_str("\n\n");
        }

        if let Some(tab) = page {
            prompt.push_str(&format!("{} {} ({})\n\n", PAGE_PREFIX, tab.title, tab.url));
        }

        if !search_results.is_empty() {
            prompt.push_str(WEB_HEADER);
            prompt.push('\n');
            prompt.push_str(&format_search_context(search_results));
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!(
            "{} {}\n\n{}",
            USER_PREFIX,
            message,
            language_directive(&self.config.response_language)
        ));
        prompt
    }
}

/// The trailing `limit` messages
pub fn history_window(history: &[Message], limit: usize) -> &[Message] {
    &history[history.len().saturating_sub(limit)..]
}

/// One `- title: snippet` line per result
pub fn format_search_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("- {}: {}", r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn language_directive(language: &str) -> String {
    format!("Rispondi in {}:", language)
}
