use serde::{Deserialize, Serialize};

/// Who produced a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Informational entries (errors, notices) written by the popup itself
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn in a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Older records were stored without an id; they get a fresh one on load.
    #[serde(default = "new_message_id")]
    pub id: String,
    pub content: String,
    pub role: Role,
    /// RFC 3339
    pub timestamp: String,
}

fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Message {
    pub fn new(content: impl Into<String>, role: Role) -> Self {
        Self {
            id: new_message_id(),
            content: content.into(),
            role,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Role::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Role::Assistant)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text, Role::System)
    }
}
