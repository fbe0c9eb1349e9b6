//! `chrome.tabs` / `chrome.scripting` adapter.
//!
//! The extraction function is shipped as a module-level JS function so the
//! popup never evaluates code from strings (the MV3 CSP forbids it). It runs
//! inside the page, reads text only and returns `{ title, url, content }`.

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde_json::json;
use wasm_bindgen::prelude::*;

use popup_core::ports::TabsPort;
use popup_types::{
    PopupError, Result,
    page::{RawPage, TabInfo},
};
use crate::js;

/// Message understood by the content script
const SELECTION_ACTION: &str = "getSelectedText";

#[wasm_bindgen(inline_js = r#"
export function page_extractor() {
    return () => {
        const body = document.body ? (document.body.innerText || document.body.textContent || '') : '';
        const main = document.querySelector('article, main, [role="main"], .content, #content');
        return {
            title: document.title || '',
            url: window.location.href,
            content: main ? (main.innerText || '') : body,
        };
    };
}
"#)]
extern "C" {
    fn page_extractor() -> Function;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(tab_id: i32, message: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "scripting"], js_name = executeScript)]
    fn scripting_execute(injection: &Object) -> std::result::Result<Promise, JsValue>;
}

fn tab_err(e: JsValue) -> PopupError {
    PopupError::Tab(js::describe(&e))
}

pub struct ChromeTabs;

impl ChromeTabs {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available() -> bool {
        js::has_global(&["chrome", "tabs", "query"])
    }
}

impl Default for ChromeTabs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TabsPort for ChromeTabs {
    async fn active_tab(&self) -> Result<TabInfo> {
        let query = JsValue::from_serde(&json!({ "active": true, "currentWindow": true }))?;
        let promise = tabs_query(&query).map_err(tab_err)?;
        let tabs = js::await_promise(promise).await.map_err(PopupError::Tab)?;

        let tab = Array::from(&tabs).get(0);
        if tab.is_undefined() {
            return Err(PopupError::Tab("no active tab".into()));
        }

        let id = Reflect::get(&tab, &JsValue::from_str("id"))
            .ok()
            .and_then(|v| v.as_f64())
            .ok_or_else(|| PopupError::Tab("active tab has no id".into()))?;
        let text = |field: &str| {
            Reflect::get(&tab, &JsValue::from_str(field))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default()
        };

        Ok(TabInfo {
            id: id as i32,
            url: text("url"),
            title: text("title"),
        })
    }

    async fn request_selection(&self, tab_id: i32) -> Result<Option<String>> {
        let message = JsValue::from_serde(&json!({ "action": SELECTION_ACTION }))?;
        let promise = tabs_send_message(tab_id, &message).map_err(tab_err)?;
        let reply = js::await_promise(promise).await.map_err(PopupError::Tab)?;

        if reply.is_undefined() || reply.is_null() {
            return Ok(None);
        }
        let selected = Reflect::get(&reply, &JsValue::from_str("selectedText"))
            .ok()
            .and_then(|v| v.as_string());
        Ok(selected)
    }

    async fn extract_page(&self, tab_id: i32) -> Result<RawPage> {
        let target = JsValue::from_serde(&json!({ "tabId": tab_id }))?;
        let injection = Object::new();
        Reflect::set(&injection, &JsValue::from_str("target"), &target).map_err(tab_err)?;
        Reflect::set(&injection, &JsValue::from_str("func"), &page_extractor()).map_err(tab_err)?;

        let promise = scripting_execute(&injection).map_err(tab_err)?;
        let results = js::await_promise(promise).await.map_err(PopupError::Tab)?;

        let first = Array::from(&results).get(0);
        let result = js::get_path(&first, &["result"])
            .ok_or_else(|| PopupError::Tab("page returned no content".into()))?;
        result
            .into_serde::<RawPage>()
            .map_err(PopupError::from)
    }
}
