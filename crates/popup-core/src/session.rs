//! Chat session: one request/response exchange at a time.
//!
//! A send goes through:
//! 1. Commit the user message to the active conversation
//! 2. Optionally ask the search provider for context
//! 3. Stream the assembled prompt through the chat port, publishing the
//!    full accumulated text after every fragment
//! 4. Commit the assistant reply
//!
//! Any failure is published as a single error event; nothing of the reply
//! is committed. A commit whose write fails is rolled back in memory.
//! Stream updates and the reply are only published while the conversation
//! the exchange started in is still the active one. The session is back to
//! `Idle` when `send` returns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::StreamExt;
use popup_types::{
    PopupError, Result,
    config::{ChatModel, PopupConfig},
    event::ChatEvent,
    message::Role,
    page::{SearchResult, TabInfo},
};
use crate::event_bus::EventBus;
use crate::ports::*;
use crate::prompt::PromptBuilder;
use crate::settings::Settings;
use crate::store::ConversationStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// What happened to a `send` call
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Whitespace-only input; nothing changed
    Empty,
    /// Another exchange is in flight; nothing changed
    Busy,
    Completed { reply: String },
    Failed { error: PopupError },
}

pub struct ChatSession {
    store: Rc<ConversationStore>,
    settings: Settings,
    chat: Rc<dyn ChatPort>,
    search: Rc<dyn SearchPort>,
    event_bus: EventBus,
    config: RefCell<PopupConfig>,
    current_page: RefCell<Option<TabInfo>>,
    state: Cell<SessionState>,
}

impl ChatSession {
    pub fn new(
        store: Rc<ConversationStore>,
        settings: Settings,
        chat: Rc<dyn ChatPort>,
        search: Rc<dyn SearchPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            store,
            settings,
            chat,
            search,
            event_bus,
            config: RefCell::new(PopupConfig::default()),
            current_page: RefCell::new(None),
            state: Cell::new(SessionState::Idle),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn is_busy(&self) -> bool {
        self.state.get() == SessionState::Sending
    }

    pub fn config(&self) -> PopupConfig {
        self.config.borrow().clone()
    }

    pub fn set_config(&self, config: PopupConfig) {
        *self.config.borrow_mut() = config;
    }

    pub fn set_model(&self, model: ChatModel) {
        self.config.borrow_mut().chat.model = model;
    }

    /// Tab whose title and URL go into every prompt
    pub fn set_current_page(&self, page: Option<TabInfo>) {
        *self.current_page.borrow_mut() = page;
    }

    pub fn current_page(&self) -> Option<TabInfo> {
        self.current_page.borrow().clone()
    }

    /// Run one exchange for `text`.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }
        if self.is_busy() {
            log::debug!("Send ignored: an exchange is already in flight");
            return SendOutcome::Busy;
        }

        let _guard = BusyGuard::enter(&self.state, &self.event_bus);

        match self.run_exchange(text).await {
            Ok(reply) => SendOutcome::Completed { reply },
            Err(error) => {
                log::error!("Chat turn error: {}", error);
                self.event_bus.emit(ChatEvent::Error {
                    message: format!("❌ Errore: {}", error),
                });
                SendOutcome::Failed { error }
            }
        }
    }

    async fn run_exchange(&self, text: &str) -> Result<String> {
        let conversation = self.store.active().ok_or_else(|| {
            PopupError::conversation_not_found(self.store.active_id().unwrap_or_default())
        })?;
        // Replies land in the conversation the exchange started in,
        // even if the user switches conversations mid-stream.
        let conversation_id = conversation.id;
        let history = conversation.messages;

        let user_message = self
            .store
            .commit_message(&conversation_id, text, Role::User)
            .await?;
        self.event_bus.emit(ChatEvent::MessageAppended { message: user_message });

        let search_results = self.search_context(text).await;

        let req = {
            let config = self.config.borrow();
            let page = self.current_page.borrow();
            ChatRequest {
                prompt: PromptBuilder::new(&config.prompt).build(
                    &history,
                    text,
                    page.as_ref(),
                    &search_results,
                ),
                model: config.chat.model.id().to_string(),
            }
        };

        let mut stream = self.chat.stream_chat(req);
        let mut reply = String::new();
        while let Some(event) = stream.next().await {
            match event {
                ChatStreamEvent::Delta(fragment) => {
                    if fragment.is_empty() {
                        continue;
                    }
                    reply.push_str(&fragment);
                    if self.is_showing(&conversation_id) {
                        self.event_bus.emit(ChatEvent::StreamUpdate { text: reply.clone() });
                    }
                }
                ChatStreamEvent::Done => break,
                ChatStreamEvent::Error(message) => return Err(PopupError::Chat(message)),
            }
        }

        let assistant_message = self
            .store
            .commit_message(&conversation_id, reply.clone(), Role::Assistant)
            .await?;
        if self.is_showing(&conversation_id) {
            self.event_bus.emit(ChatEvent::MessageAppended { message: assistant_message });
        }
        Ok(reply)
    }

    /// Whether the UI currently displays `conversation_id`
    fn is_showing(&self, conversation_id: &str) -> bool {
        self.store.active_id().as_deref() == Some(conversation_id)
    }

    /// Search results for `query` when web search is on. Failures mean no context.
    async fn search_context(&self, query: &str) -> Vec<SearchResult> {
        let enabled = self.settings.web_search_enabled().await.unwrap_or_else(|e| {
            log::warn!("Could not read web search flag: {}", e);
            false
        });
        if !enabled {
            return Vec::new();
        }

        match self.search.search(query).await {
            Ok(results) => {
                if !results.is_empty() {
                    self.event_bus.emit(ChatEvent::SearchResults { results: results.clone() });
                }
                results
            }
            Err(e) => {
                log::warn!("Web search failed, continuing without context: {}", e);
                Vec::new()
            }
        }
    }
}

/// Holds the session in `Sending`; dropping it always returns to `Idle`.
struct BusyGuard<'a> {
    state: &'a Cell<SessionState>,
    event_bus: &'a EventBus,
}

impl<'a> BusyGuard<'a> {
    fn enter(state: &'a Cell<SessionState>, event_bus: &'a EventBus) -> Self {
        state.set(SessionState::Sending);
        event_bus.emit(ChatEvent::TurnStart);
        Self { state, event_bus }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.set(SessionState::Idle);
        self.event_bus.emit(ChatEvent::TurnEnd);
    }
}
