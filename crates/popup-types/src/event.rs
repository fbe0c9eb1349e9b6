use serde::{Deserialize, Serialize};
use crate::config::ChatModel;
use crate::conversation::ConversationSummary;
use crate::message::Message;
use crate::page::SearchResult;

/// Events emitted by the controller and chat session.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A send started; the popup is busy until `TurnEnd`
    TurnStart,

    /// A message was committed to the active conversation
    MessageAppended { message: Message },

    /// Full accumulated assistant text so far. Replaces, never appends.
    StreamUpdate { text: String },

    /// Results from the search provider that were folded into the prompt
    SearchResults { results: Vec<SearchResult> },

    /// The send finished, successfully or not
    TurnEnd,

    /// A failure the user should see
    Error { message: String },

    /// Informational entry that is shown but not stored
    Notice { kind: NoticeKind, text: String },

    /// The conversation list or the active conversation changed
    ConversationsChanged {
        conversations: Vec<ConversationSummary>,
        active_id: Option<String>,
    },

    /// Replace the displayed transcript with this conversation
    ConversationLoaded { id: String, messages: Vec<Message> },

    /// Text is selected in the active page
    SelectionAvailable { text: String },

    /// Put this text into the input box
    InputPrefill { text: String },

    WebSearchToggled { enabled: bool },

    ModelChanged { model: ChatModel },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    System,
    Web,
}
