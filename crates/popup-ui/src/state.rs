//! UI-level state that drives rendering.
//! This is a read-only projection of the controller state,
//! updated each frame by draining the EventBus.

use popup_core::actions::{code_blocks, UiCommand, STATUS_BUSY, STATUS_READY};
use popup_types::config::ChatModel;
use popup_types::conversation::ConversationSummary;
use popup_types::event::{ChatEvent, NoticeKind};
use popup_types::message::{Message, Role};
use popup_types::page::SearchResult;

/// What the panels ask the app shell to do
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Command(UiCommand),
    /// Open the file dialog; the result comes back as `UiCommand::AttachText`
    PickAttachment,
}

/// Visual category of a chat entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Assistant,
    System,
    Web,
    Error,
}

impl From<Role> for EntryKind {
    fn from(role: Role) -> Self {
        match role {
            Role::User => EntryKind::User,
            Role::Assistant => EntryKind::Assistant,
            Role::System => EntryKind::System,
        }
    }
}

/// A chat entry for display
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub kind: EntryKind,
    pub content: String,
    /// Set for stored messages only; notices and errors cannot be copied
    pub message_id: Option<String>,
    /// Fenced code blocks offered for copying (assistant replies only)
    pub code_blocks: usize,
}

impl ChatEntry {
    fn notice(kind: EntryKind, content: String) -> Self {
        Self { kind, content, message_id: None, code_blocks: 0 }
    }
}

impl From<Message> for ChatEntry {
    fn from(message: Message) -> Self {
        let blocks = match message.role {
            Role::Assistant => code_blocks(&message.content).len(),
            _ => 0,
        };
        Self {
            kind: message.role.into(),
            content: message.content,
            message_id: Some(message.id),
            code_blocks: blocks,
        }
    }
}

/// State visible to UI panels
pub struct UiState {
    /// Displayed transcript of the active conversation plus notices
    pub messages: Vec<ChatEntry>,
    /// Assistant text streamed so far; replaced on every update
    pub streaming_text: String,
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    pub busy: bool,
    /// Text selected in the page when the popup opened
    pub selection: Option<String>,
    pub web_search_enabled: bool,
    pub model: ChatModel,
    pub conversations: Vec<ConversationSummary>,
    pub active_id: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            streaming_text: String::new(),
            input_text: String::new(),
            status_text: STATUS_READY.to_string(),
            busy: false,
            selection: None,
            web_search_enabled: false,
            model: ChatModel::default(),
            conversations: Vec::new(),
            active_id: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::TurnStart => {
                    self.busy = true;
                    self.streaming_text.clear();
                    self.status_text = STATUS_BUSY.to_string();
                }
                ChatEvent::MessageAppended { message } => {
                    if message.role == Role::Assistant {
                        self.streaming_text.clear();
                    }
                    self.messages.push(message.into());
                }
                ChatEvent::StreamUpdate { text } => {
                    self.streaming_text = text;
                }
                ChatEvent::SearchResults { results } => {
                    self.messages
                        .push(ChatEntry::notice(EntryKind::Web, search_digest(&results)));
                }
                ChatEvent::TurnEnd => {
                    self.busy = false;
                    self.streaming_text.clear();
                    self.status_text = STATUS_READY.to_string();
                }
                ChatEvent::Error { message } => {
                    self.streaming_text.clear();
                    self.messages.push(ChatEntry::notice(EntryKind::Error, message));
                }
                ChatEvent::Notice { kind, text } => {
                    let kind = match kind {
                        NoticeKind::System => EntryKind::System,
                        NoticeKind::Web => EntryKind::Web,
                    };
                    self.messages.push(ChatEntry::notice(kind, text));
                }
                ChatEvent::ConversationsChanged { conversations, active_id } => {
                    self.conversations = conversations;
                    self.active_id = active_id;
                }
                ChatEvent::ConversationLoaded { id, messages } => {
                    self.active_id = Some(id);
                    self.streaming_text.clear();
                    self.messages = messages.into_iter().map(ChatEntry::from).collect();
                }
                ChatEvent::SelectionAvailable { text } => {
                    self.selection = Some(text);
                }
                ChatEvent::InputPrefill { text } => {
                    self.input_text = text;
                }
                ChatEvent::WebSearchToggled { enabled } => {
                    self.web_search_enabled = enabled;
                }
                ChatEvent::ModelChanged { model } => {
                    self.model = model;
                }
            }
        }
    }

    /// Take the input box content for sending. `None` when it is blank or a
    /// send is already running; the box is left untouched in that case.
    ///
    /// A successful take marks the state busy straight away: the turn's own
    /// `TurnStart` only arrives with a later frame, and the `TurnEnd` of that
    /// turn (or of the one it collided with) clears the flag again.
    pub fn take_input(&mut self) -> Option<String> {
        if self.busy || self.input_text.trim().is_empty() {
            return None;
        }
        let text = self.input_text.trim().to_string();
        self.input_text.clear();
        self.busy = true;
        self.status_text = STATUS_BUSY.to_string();
        Some(text)
    }

    pub fn can_send(&self) -> bool {
        !self.busy && !self.input_text.trim().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// New/select conversation stay locked while a reply is streaming
    pub fn can_switch_conversation(&self) -> bool {
        !self.busy
    }

    /// Title of the active conversation, for the history picker
    pub fn active_title(&self) -> Option<&str> {
        let active = self.active_id.as_deref()?;
        self.conversations
            .iter()
            .find(|c| c.id == active)
            .map(|c| c.title.as_str())
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

fn search_digest(results: &[SearchResult]) -> String {
    let mut digest = String::from("🔍 Risultati dal web:");
    for r in results {
        digest.push_str(&format!("\n- {}: {}", r.title, r.snippet));
    }
    digest
}
