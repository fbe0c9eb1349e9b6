//! WASM-target tests for popup-types.
//!
//! Exercises the parts that touch wasm-specific backends (uuid's `js`
//! randomness, chrono's `wasmbind` clock) under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use popup_types::config::*;
use popup_types::conversation::*;
use popup_types::error::*;
use popup_types::message::*;

#[wasm_bindgen_test]
fn message_has_id_and_timestamp() {
    let msg = Message::user("Hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.id.len(), 36);
    assert!(!msg.timestamp.is_empty());
}

#[wasm_bindgen_test]
fn conversation_title_uses_local_clock() {
    let conv = Conversation::new("1".to_string());
    assert!(conv.title.starts_with("Chat "));
    assert!(conv.title.contains('/'));
}

#[wasm_bindgen_test]
fn conversation_roundtrip() {
    let mut conv = Conversation::new("7".to_string());
    conv.messages.push(Message::user("q"));
    conv.messages.push(Message::assistant("a"));
    let json = serde_json::to_string(&vec![conv.clone()]).unwrap();
    let back: Vec<Conversation> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![conv]);
}

#[wasm_bindgen_test]
fn default_config_values() {
    let config = PopupConfig::default();
    assert_eq!(config.prompt.history_window, 10);
    assert_eq!(config.chat.model.id(), "claude-sonnet-4");
}

#[wasm_bindgen_test]
fn error_display() {
    let err = PopupError::Capture("chrome:// page".to_string());
    assert_eq!(err.to_string(), "Capture error: chrome:// page");
}
