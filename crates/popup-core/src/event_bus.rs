//! Queue of `ChatEvent`s between the controller and the popup UI.
//!
//! Single-threaded and shared through `Rc`. The UI drains it once per frame,
//! so a burst of stream fragments arriving between two frames is kept as the
//! latest accumulated text only.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use popup_types::event::ChatEvent;

#[derive(Clone, Default)]
pub struct EventBus {
    pending: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event. A `StreamUpdate` replaces one queued directly before
    /// it, since each update carries the whole reply so far.
    pub fn emit(&self, event: ChatEvent) {
        let mut pending = self.pending.borrow_mut();
        if matches!(event, ChatEvent::StreamUpdate { .. })
            && matches!(pending.back(), Some(ChatEvent::StreamUpdate { .. }))
        {
            pending.pop_back();
        }
        pending.push_back(event);
    }

    pub fn drain(&self) -> Vec<ChatEvent> {
        self.pending.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }
}
