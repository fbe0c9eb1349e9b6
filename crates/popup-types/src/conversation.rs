use serde::{Deserialize, Serialize};
use crate::message::Message;

/// A persisted conversation thread.
///
/// Field names are camelCase so the stored layout matches what other
/// extension pages read from `chrome.storage.local`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: String,
}

impl Conversation {
    pub fn new(id: String) -> Self {
        let title = format!(
            "Chat {}",
            chrono::Local::now().format("%d/%m/%Y, %H:%M:%S")
        );
        Self {
            id,
            title,
            messages: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            message_count: self.messages.len(),
        }
    }

    /// Most recent message sent by the user, if any
    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::message::Role::User)
    }
}

/// Summary of a conversation for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub message_count: usize,
}
