//! Puter.js chat adapter.
//!
//! `puter.ai.chat(prompt, { model, stream: true })` resolves to an async
//! iterable of `{ text }` parts. The adapter walks that iterator by hand
//! (`[Symbol.asyncIterator]().next()`) and turns each part into a
//! `ChatStreamEvent`. Network transport and auth belong to the SDK.

use futures::stream::{self, StreamExt};
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Reflect, Symbol};
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use popup_core::ports::{ChatPort, ChatRequest, ChatStream, ChatStreamEvent};
use crate::js;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["puter", "ai"], js_name = chat)]
    fn puter_ai_chat(prompt: &str, options: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Chat provider backed by the Puter SDK loaded in the popup page.
pub struct PuterChat;

impl PuterChat {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available() -> bool {
        js::has_global(&["puter", "ai", "chat"])
    }
}

impl Default for PuterChat {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPort for PuterChat {
    fn stream_chat(&self, req: ChatRequest) -> ChatStream {
        let opened = async move { open_stream(&req).await };
        Box::pin(stream::once(opened).flat_map(|opened| match opened {
            Ok(iterator) => parts(iterator).boxed_local(),
            Err(message) => stream::once(async move { ChatStreamEvent::Error(message) }).boxed_local(),
        }))
    }
}

/// Start the call and return the response's async iterator
async fn open_stream(req: &ChatRequest) -> Result<JsValue, String> {
    let options = JsValue::from_serde(&json!({
        "model": req.model,
        "stream": true,
    }))
    .map_err(|e| e.to_string())?;

    let pending = puter_ai_chat(&req.prompt, &options).map_err(|e| js::describe(&e))?;
    let response = js::await_value(pending).await?;

    let factory = Reflect::get(&response, &Symbol::async_iterator())
        .map_err(|e| js::describe(&e))?;
    let factory: Function = factory
        .dyn_into()
        .map_err(|_| "chat response is not streamable".to_string())?;
    factory.call0(&response).map_err(|e| js::describe(&e))
}

/// Pull parts until the iterator reports `done` or throws.
fn parts(iterator: JsValue) -> impl futures::Stream<Item = ChatStreamEvent> {
    stream::unfold(Some(iterator), |state| async move {
        let iterator = state?;
        match next_part(&iterator).await {
            Ok(Some(part)) => {
                let text = fragment_text(&part).unwrap_or_default();
                Some((ChatStreamEvent::Delta(text), Some(iterator)))
            }
            Ok(None) => Some((ChatStreamEvent::Done, None)),
            Err(message) => Some((ChatStreamEvent::Error(message), None)),
        }
    })
}

async fn next_part(iterator: &JsValue) -> Result<Option<JsValue>, String> {
    let next: Function = Reflect::get(iterator, &JsValue::from_str("next"))
        .map_err(|e| js::describe(&e))?
        .dyn_into()
        .map_err(|_| "chat stream has no next()".to_string())?;
    let step = js::await_value(next.call0(iterator).map_err(|e| js::describe(&e))?).await?;

    let done = Reflect::get(&step, &JsValue::from_str("done"))
        .ok()
        .and_then(|d| d.as_bool())
        .unwrap_or(false);
    if done {
        return Ok(None);
    }
    Reflect::get(&step, &JsValue::from_str("value"))
        .map(Some)
        .map_err(|e| js::describe(&e))
}

/// Text carried by one streamed part: `part.text`, or the part itself when
/// the SDK yields bare strings.
pub fn fragment_text(part: &JsValue) -> Option<String> {
    if let Some(text) = part.as_string() {
        return Some(text);
    }
    if part.is_object() {
        return Reflect::get(part, &JsValue::from_str("text"))
            .ok()
            .and_then(|t| t.as_string());
    }
    None
}
