//! Conversation store: the ordered collection of conversations and the
//! active-conversation pointer, persisted as one JSON document.
//!
//! Mutations are synchronous and never hold a `RefCell` borrow across an
//! `.await`; persistence serializes a snapshot first and then writes it.

use std::cell::RefCell;
use std::rc::Rc;

use popup_types::{
    PopupError, Result,
    conversation::{Conversation, ConversationSummary},
    message::{Message, Role},
};
use crate::ports::StoragePort;

pub const CONVERSATIONS_KEY: &str = "conversations";

pub struct ConversationStore {
    storage: Rc<dyn StoragePort>,
    state: RefCell<StoreState>,
}

#[derive(Default)]
struct StoreState {
    /// Most recent first
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    last_issued_id: i64,
}

impl ConversationStore {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self {
            storage,
            state: RefCell::new(StoreState::default()),
        }
    }

    /// Read the persisted collection and replace the in-memory one.
    /// A missing key is an empty collection.
    pub async fn load_all(&self) -> Result<Vec<Conversation>> {
        let conversations = match self.storage.get(CONVERSATIONS_KEY).await? {
            Some(data) => serde_json::from_slice::<Vec<Conversation>>(&data)?,
            None => Vec::new(),
        };

        let mut state = self.state.borrow_mut();
        state.last_issued_id = conversations
            .iter()
            .filter_map(|c| c.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            .max(state.last_issued_id);
        if let Some(active) = &state.active_id {
            if !conversations.iter().any(|c| &c.id == active) {
                state.active_id = None;
            }
        }
        state.conversations = conversations.clone();
        log::info!("Loaded {} conversation(s)", conversations.len());
        Ok(conversations)
    }

    /// Load persisted state, then make sure exactly one conversation is active:
    /// a fresh one when the store is empty, otherwise the most recent.
    pub async fn init(&self) -> Result<Conversation> {
        let conversations = self.load_all().await?;
        match conversations.first() {
            Some(head) => self.select_conversation(&head.id),
            None => self.create_conversation().await,
        }
    }

    /// Create an empty conversation at the head of the collection, make it
    /// active and persist.
    pub async fn create_conversation(&self) -> Result<Conversation> {
        let conversation = {
            let mut state = self.state.borrow_mut();
            let now = chrono::Utc::now().timestamp_millis();
            let id = now.max(state.last_issued_id + 1);
            state.last_issued_id = id;

            let conversation = Conversation::new(id.to_string());
            state.conversations.insert(0, conversation.clone());
            state.active_id = Some(conversation.id.clone());
            conversation
        };
        self.persist().await?;
        Ok(conversation)
    }

    pub fn select_conversation(&self, id: &str) -> Result<Conversation> {
        let mut state = self.state.borrow_mut();
        let conversation = state
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PopupError::conversation_not_found(id))?;
        state.active_id = Some(conversation.id.clone());
        Ok(conversation)
    }

    /// Append a timestamped message. In-memory only; call `persist` after.
    pub fn append_message(
        &self,
        conversation_id: &str,
        content: impl Into<String>,
        role: Role,
    ) -> Result<Message> {
        let mut state = self.state.borrow_mut();
        let conversation = state
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| PopupError::conversation_not_found(conversation_id))?;
        let message = Message::new(content, role);
        conversation.messages.push(message.clone());
        Ok(message)
    }

    /// Append and persist as one step. When the write fails the message is
    /// taken back out, so memory never holds what storage rejected.
    pub async fn commit_message(
        &self,
        conversation_id: &str,
        content: impl Into<String>,
        role: Role,
    ) -> Result<Message> {
        let message = self.append_message(conversation_id, content, role)?;
        if let Err(e) = self.persist().await {
            self.retract_message(conversation_id, &message.id);
            return Err(e);
        }
        Ok(message)
    }

    fn retract_message(&self, conversation_id: &str, message_id: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(conversation) = state
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        {
            conversation.messages.retain(|m| m.id != message_id);
        }
    }

    /// Overwrite the stored collection with the in-memory one.
    pub async fn persist(&self) -> Result<()> {
        let payload = serde_json::to_vec(&self.state.borrow().conversations)?;
        self.storage.set(CONVERSATIONS_KEY, &payload).await
    }

    pub fn active_id(&self) -> Option<String> {
        self.state.borrow().active_id.clone()
    }

    pub fn active(&self) -> Option<Conversation> {
        let state = self.state.borrow();
        let id = state.active_id.as_ref()?;
        state.conversations.iter().find(|c| &c.id == id).cloned()
    }

    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.state
            .borrow()
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.state.borrow().conversations.clone()
    }

    pub fn summaries(&self) -> Vec<ConversationSummary> {
        self.state
            .borrow()
            .conversations
            .iter()
            .map(Conversation::summary)
            .collect()
    }

    /// Find a message by id in any conversation
    pub fn find_message(&self, message_id: &str) -> Option<Message> {
        self.state
            .borrow()
            .conversations
            .iter()
            .flat_map(|c| c.messages.iter())
            .find(|m| m.id == message_id)
            .cloned()
    }
}
