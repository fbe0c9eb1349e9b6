//! Text file picker for the attach button.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use popup_types::{PopupError, Result};
use crate::js;

const ACCEPT: &str = "text/*,.pdf,.doc,.docx";

/// A file the user picked, decoded as text
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedFile {
    pub name: String,
    pub content: String,
}

fn interop_err(e: JsValue) -> PopupError {
    PopupError::JsInterop(js::describe(&e))
}

/// Open the browser file dialog and read the chosen file as text.
/// Resolves to `None` when the dialog is dismissed.
pub async fn pick_text_file() -> Result<Option<AttachedFile>> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PopupError::JsInterop("no document".into()))?;
    let input: HtmlInputElement = document
        .create_element("input")
        .map_err(interop_err)?
        .dyn_into()
        .map_err(|_| PopupError::JsInterop("input element expected".into()))?;
    input.set_type("file");
    input.set_accept(ACCEPT);

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_change = {
        let tx = tx.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_cancel = {
        let tx = tx.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(false);
            }
        })
    };
    input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(interop_err)?;
    input
        .add_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref())
        .map_err(interop_err)?;

    input.click();
    let picked = rx.await.unwrap_or(false);

    // Closures must outlive the dialog; detach them before dropping
    let _ = input.remove_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    let _ = input.remove_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref());

    if !picked {
        return Ok(None);
    }
    let file = match input.files().and_then(|files| files.get(0)) {
        Some(file) => file,
        None => return Ok(None),
    };

    let text = js::await_promise(file.text())
        .await
        .map_err(PopupError::JsInterop)?;
    Ok(Some(AttachedFile {
        name: file.name(),
        content: text.as_string().unwrap_or_default(),
    }))
}
