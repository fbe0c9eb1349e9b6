//! Fire-and-forget browser side effects: notifications, clipboard and the
//! extension options page. Failures are logged, never surfaced.

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use popup_core::ports::{ClipboardPort, ExtensionPort, NotifierPort};
use crate::js;

const NOTIFICATION_ICON: &str = "/icons/icon48.png";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "notifications"], js_name = create)]
    fn notifications_create(options: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    fn clipboard_write_text(text: &str) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = openOptionsPage)]
    fn runtime_open_options_page() -> std::result::Result<JsValue, JsValue>;
}

/// Await a returned promise in the background and log a rejection
fn settle(what: &'static str, value: JsValue) {
    spawn_local(async move {
        if let Err(e) = js::await_value(value).await {
            log::warn!("{} failed: {}", what, e);
        }
    });
}

pub struct ChromeNotifier;

impl NotifierPort for ChromeNotifier {
    fn notify(&self, title: &str, message: &str) {
        let options = match JsValue::from_serde(&json!({
            "type": "basic",
            "iconUrl": NOTIFICATION_ICON,
            "title": title,
            "message": message,
        })) {
            Ok(options) => options,
            Err(e) => {
                log::warn!("notification options: {}", e);
                return;
            }
        };
        match notifications_create(&options) {
            Ok(pending) => settle("chrome.notifications.create", pending),
            Err(e) => log::warn!("chrome.notifications.create: {}", js::describe(&e)),
        }
    }
}

pub struct BrowserClipboard;

impl ClipboardPort for BrowserClipboard {
    fn write_text(&self, text: &str) {
        match clipboard_write_text(text) {
            Ok(promise) => settle("clipboard write", promise.into()),
            Err(e) => log::warn!("clipboard write: {}", js::describe(&e)),
        }
    }
}

pub struct ChromeRuntime;

impl ExtensionPort for ChromeRuntime {
    fn open_options_page(&self) {
        match runtime_open_options_page() {
            Ok(pending) => settle("chrome.runtime.openOptionsPage", pending),
            Err(e) => log::warn!("chrome.runtime.openOptionsPage: {}", js::describe(&e)),
        }
    }
}
