#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::conversation::*;
    use crate::page::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("Ciao");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Ciao");
        assert!(!msg.id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());

        assert_eq!(Message::assistant("x").role, Role::Assistant);
        assert_eq!(Message::system("x").role, Role::System);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_message_without_id_gets_one() {
        let json = r#"{"content":"hi","role":"user","timestamp":"2026-01-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.content, "hi");
        assert!(!msg.id.is_empty());
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_new() {
        let conv = Conversation::new("1700000000000".to_string());
        assert_eq!(conv.id, "1700000000000");
        assert!(conv.title.starts_with("Chat "));
        assert!(conv.messages.is_empty());
        assert!(!conv.created_at.is_empty());
    }

    #[test]
    fn test_conversation_uses_camel_case_layout() {
        let conv = Conversation::new("42".to_string());
        let value = serde_json::to_value(&conv).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_conversation_reads_legacy_record() {
        let json = r#"[{
            "id": "1712345678901",
            "title": "Chat 05/04/2024, 10:00:00",
            "messages": [
                {"content": "ciao", "role": "user", "timestamp": "2024-04-05T10:00:01.000Z"},
                {"content": "salve", "role": "assistant", "timestamp": "2024-04-05T10:00:03.000Z"}
            ],
            "createdAt": "2024-04-05T10:00:00.000Z"
        }]"#;
        let convs: Vec<Conversation> = serde_json::from_str(json).unwrap();
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].messages.len(), 2);
        assert_eq!(convs[0].messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_conversation_summary_and_last_user_message() {
        let mut conv = Conversation::new("1".to_string());
        assert!(conv.last_user_message().is_none());
        conv.messages.push(Message::user("first"));
        conv.messages.push(Message::assistant("reply"));
        conv.messages.push(Message::user("second"));
        conv.messages.push(Message::assistant("reply 2"));

        assert_eq!(conv.last_user_message().unwrap().content, "second");
        let summary = conv.summary();
        assert_eq!(summary.id, "1");
        assert_eq!(summary.message_count, 4);
    }

    // ─── Page Tests ──────────────────────────────────────────

    #[test]
    fn test_page_snapshot_truncation_flag() {
        let snap = PageSnapshot {
            title: "t".to_string(),
            url: "https://example.com".to_string(),
            content: "abc".to_string(),
            original_length: 10,
        };
        assert!(snap.is_truncated());

        let full = PageSnapshot { original_length: 3, ..snap };
        assert!(!full.is_truncated());
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::StreamUpdate { text: "Hello wor".to_string() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("StreamUpdate"));
        assert!(json.contains("Hello wor"));

        let event = ChatEvent::Notice { kind: NoticeKind::Web, text: "found".to_string() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Web"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = PopupConfig::default();
        assert_eq!(config.chat.model, ChatModel::ClaudeSonnet4);
        assert_eq!(config.prompt.history_window, 10);
        assert_eq!(config.prompt.page_content_limit, 5000);
        assert_eq!(config.prompt.response_language, "italiano");
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: PopupConfig = serde_json::from_str(r#"{"chat":{"model":"claude-opus-4"}}"#).unwrap();
        assert_eq!(config.chat.model, ChatModel::ClaudeOpus4);
        assert_eq!(config.prompt, PromptConfig::default());
    }

    #[test]
    fn test_config_partial_section_keeps_stored_fields() {
        let config: PopupConfig = serde_json::from_str(
            r#"{"chat":{"model":"claude-opus-4"},"prompt":{"history_window":4}}"#,
        )
        .unwrap();
        assert_eq!(config.chat.model, ChatModel::ClaudeOpus4);
        assert_eq!(config.prompt.history_window, 4);
        assert_eq!(config.prompt.page_content_limit, 5000);
        assert_eq!(config.prompt.response_language, "italiano");

        let config: PopupConfig = serde_json::from_str(r#"{"chat":{}}"#).unwrap();
        assert_eq!(config.chat.model, ChatModel::ClaudeSonnet4);
    }

    #[test]
    fn test_chat_model_ids_match_serde_names() {
        for model in ChatModel::all() {
            let json = serde_json::to_string(model).unwrap();
            assert_eq!(json, format!("\"{}\"", model.id()));
            assert!(!model.label().is_empty());
        }
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = PopupError::Chat("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Chat error: quota exceeded");

        let err = PopupError::conversation_not_found("123");
        assert_eq!(err.to_string(), "Conversation not found: 123");

        let err = PopupError::message_not_found("abc");
        assert_eq!(err.to_string(), "Message not found: abc");

        let err = PopupError::code_block_not_found("abc", 2);
        assert_eq!(err.to_string(), "Code block not found: abc#2");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err: PopupError = serde_err.into();
        assert!(matches!(err, PopupError::Serialization(_)));
    }
}
