use serde::{Deserialize, Serialize};

/// Top-level popup configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: ChatModel,
}

/// Missing fields of a stored config take their defaults one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// How many trailing messages of history go into a prompt
    pub history_window: usize,
    /// Maximum characters kept from a captured page
    pub page_content_limit: usize,
    /// Language named in the closing instruction of every prompt
    pub response_language: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            page_content_limit: 5000,
            response_language: "italiano".to_string(),
        }
    }
}

/// Hosted models selectable from the popup header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatModel {
    #[default]
    #[serde(rename = "claude-sonnet-4")]
    ClaudeSonnet4,
    #[serde(rename = "claude-opus-4")]
    ClaudeOpus4,
    #[serde(rename = "claude-3-7-sonnet")]
    Claude37Sonnet,
    #[serde(rename = "claude-3-5-sonnet")]
    Claude35Sonnet,
}

impl ChatModel {
    /// Identifier passed to the chat API
    pub fn id(&self) -> &'static str {
        match self {
            ChatModel::ClaudeSonnet4 => "claude-sonnet-4",
            ChatModel::ClaudeOpus4 => "claude-opus-4",
            ChatModel::Claude37Sonnet => "claude-3-7-sonnet",
            ChatModel::Claude35Sonnet => "claude-3-5-sonnet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChatModel::ClaudeSonnet4 => "Claude Sonnet 4",
            ChatModel::ClaudeOpus4 => "Claude Opus 4",
            ChatModel::Claude37Sonnet => "Claude 3.7 Sonnet",
            ChatModel::Claude35Sonnet => "Claude 3.5 Sonnet",
        }
    }

    pub fn all() -> &'static [ChatModel] {
        &[
            ChatModel::ClaudeSonnet4,
            ChatModel::ClaudeOpus4,
            ChatModel::Claude37Sonnet,
            ChatModel::Claude35Sonnet,
        ]
    }
}
