//! Small helpers shared by the wasm-bindgen adapters.

use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Human-readable description of a thrown JS value
pub fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Walk `root.a.b.c`, stopping at the first undefined or null segment.
pub fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    let mut current = root.clone();
    for segment in path {
        let next = Reflect::get(&current, &JsValue::from_str(segment)).ok()?;
        if next.is_undefined() || next.is_null() {
            return None;
        }
        current = next;
    }
    Some(current)
}

/// Whether `globalThis.a.b.c` exists
pub fn has_global(path: &[&str]) -> bool {
    get_path(&js_sys::global().into(), path).is_some()
}

pub async fn await_promise(promise: Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(|e| describe(&e))
}

/// Await whatever a JS call returned; plain values resolve immediately.
pub async fn await_value(value: JsValue) -> Result<JsValue, String> {
    await_promise(Promise::resolve(&value)).await
}
