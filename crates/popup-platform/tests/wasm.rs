//! WASM-target tests for popup-platform (Node.js runtime).
//!
//! Covers MemoryStorage, backend detection and the Puter stream helpers
//! under wasm32-unknown-unknown via `wasm-pack test --node`. Node has no
//! `chrome` or `puter` globals, so these also pin the fallback paths.

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use futures::StreamExt;
use js_sys::{Object, Reflect};
use popup_core::ports::{ChatPort, ChatRequest, ChatStreamEvent, StoragePort};
use popup_core::store::ConversationStore;
use popup_platform::chat::puter::fragment_text;
use popup_platform::storage::{auto_detect_storage, ChromeStorage, MemoryStorage};
use popup_platform::{ChromeTabs, PuterChat};
use popup_types::message::Role;
use popup_types::PopupError;
use std::rc::Rc;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    let result = storage.get("nonexistent").await.unwrap();
    assert!(result.is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_and_get() {
    let storage = MemoryStorage::new();
    storage.set("conversations", b"[]").await.unwrap();
    let result = storage.get("conversations").await.unwrap();
    assert_eq!(result, Some(b"[]".to_vec()));
}

#[wasm_bindgen_test]
async fn memory_storage_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("webSearchEnabled", b"false").await.unwrap();
    storage.set("webSearchEnabled", b"true").await.unwrap();
    let result = storage.get("webSearchEnabled").await.unwrap();
    assert_eq!(result, Some(b"true".to_vec()));
}

#[wasm_bindgen_test]
async fn memory_storage_rejects_non_json() {
    let storage = MemoryStorage::new();
    let err = storage.set("conversations", b"not json").await.unwrap_err();
    assert!(matches!(err, PopupError::Serialization(_)));
    assert!(storage.get("conversations").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_reads_back_compact_json() {
    let storage = MemoryStorage::new();
    storage.set("config", b"{ \"chat\" : { \"model\" : \"gpt-4o\" } }").await.unwrap();
    let stored = storage.get("config").await.unwrap().unwrap();
    assert_eq!(stored, br#"{"chat":{"model":"gpt-4o"}}"#.to_vec());
}

// ─── Backend detection ───────────────────────────────────

#[wasm_bindgen_test]
fn chrome_apis_absent_under_node() {
    assert!(!ChromeStorage::is_available());
    assert!(!ChromeTabs::is_available());
    assert!(!PuterChat::is_available());
}

#[wasm_bindgen_test]
fn auto_detect_falls_back_to_memory() {
    let storage = auto_detect_storage();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn store_round_trips_through_detected_backend() {
    let storage = auto_detect_storage();
    let store = ConversationStore::new(storage.clone());
    let conv = store.init().await.unwrap();
    store.append_message(&conv.id, "Ciao", Role::User).unwrap();
    store.persist().await.unwrap();

    let reloaded = ConversationStore::new(storage);
    reloaded.load_all().await.unwrap();
    let conv = reloaded.get(&conv.id).unwrap();
    assert_eq!(conv.messages.len(), 1);
    assert_eq!(conv.messages[0].content, "Ciao");
}

// ─── Puter stream helpers ────────────────────────────────

#[wasm_bindgen_test]
fn fragment_text_reads_text_field() {
    let part = Object::new();
    Reflect::set(&part, &JsValue::from_str("text"), &JsValue::from_str("Ciao")).unwrap();
    assert_eq!(fragment_text(&part.into()), Some("Ciao".to_string()));
}

#[wasm_bindgen_test]
fn fragment_text_accepts_bare_string() {
    assert_eq!(fragment_text(&JsValue::from_str("mondo")), Some("mondo".to_string()));
}

#[wasm_bindgen_test]
fn fragment_text_missing_field() {
    assert_eq!(fragment_text(&Object::new().into()), None);
    assert_eq!(fragment_text(&JsValue::NULL), None);
    assert_eq!(fragment_text(&JsValue::from_f64(3.0)), None);
}

#[wasm_bindgen_test]
async fn puter_chat_without_sdk_yields_single_error() {
    let chat = PuterChat::new();
    let events: Vec<ChatStreamEvent> = chat
        .stream_chat(ChatRequest {
            prompt: "Ciao".to_string(),
            model: "claude-sonnet-4".to_string(),
        })
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ChatStreamEvent::Error(_)));
}

#[wasm_bindgen_test]
fn shared_storage_is_object_safe() {
    let storage: Rc<dyn StoragePort> = Rc::new(MemoryStorage::new());
    assert_eq!(storage.backend_name(), "memory");
}
