use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PopupError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Tab error: {0}")]
    Tab(String),

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl PopupError {
    pub fn conversation_not_found(id: impl Into<String>) -> Self {
        PopupError::NotFound {
            what: "Conversation",
            id: id.into(),
        }
    }

    pub fn message_not_found(id: impl Into<String>) -> Self {
        PopupError::NotFound {
            what: "Message",
            id: id.into(),
        }
    }

    pub fn code_block_not_found(message_id: &str, block: usize) -> Self {
        PopupError::NotFound {
            what: "Code block",
            id: format!("{}#{}", message_id, block),
        }
    }
}

impl From<serde_json::Error> for PopupError {
    fn from(e: serde_json::Error) -> Self {
        PopupError::Serialization(e.to_string())
    }
}
