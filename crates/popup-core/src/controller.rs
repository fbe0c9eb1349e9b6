//! Popup controller: owns the session state and turns `UiCommand`s into
//! store, capture and chat operations. The UI only drains `ChatEvent`s.

use std::cell::RefCell;
use std::rc::Rc;

use popup_types::{
    PopupError, Result,
    event::{ChatEvent, NoticeKind},
    page::PageSnapshot,
};
use crate::actions::{self, QuickAction, SelectionAction, UiCommand};
use crate::capture;
use crate::event_bus::EventBus;
use crate::ports::*;
use crate::session::{ChatSession, SendOutcome};
use crate::settings::Settings;
use crate::store::ConversationStore;

/// Everything the controller needs from the outside world
pub struct Ports {
    pub storage: Rc<dyn StoragePort>,
    pub chat: Rc<dyn ChatPort>,
    pub search: Rc<dyn SearchPort>,
    pub tabs: Rc<dyn TabsPort>,
    pub notifier: Rc<dyn NotifierPort>,
    pub clipboard: Rc<dyn ClipboardPort>,
    pub extension: Rc<dyn ExtensionPort>,
}

pub struct PopupController {
    store: Rc<ConversationStore>,
    settings: Settings,
    session: ChatSession,
    tabs: Rc<dyn TabsPort>,
    notifier: Rc<dyn NotifierPort>,
    clipboard: Rc<dyn ClipboardPort>,
    extension: Rc<dyn ExtensionPort>,
    event_bus: EventBus,
    selection: RefCell<Option<String>>,
    captured_page: RefCell<Option<PageSnapshot>>,
}

impl PopupController {
    pub fn new(ports: Ports, event_bus: EventBus) -> Self {
        let store = Rc::new(ConversationStore::new(ports.storage.clone()));
        let settings = Settings::new(ports.storage);
        let session = ChatSession::new(
            store.clone(),
            settings.clone(),
            ports.chat,
            ports.search,
            event_bus.clone(),
        );
        Self {
            store,
            settings,
            session,
            tabs: ports.tabs,
            notifier: ports.notifier,
            clipboard: ports.clipboard,
            extension: ports.extension,
            event_bus,
            selection: RefCell::new(None),
            captured_page: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selection(&self) -> Option<String> {
        self.selection.borrow().clone()
    }

    pub fn captured_page(&self) -> Option<PageSnapshot> {
        self.captured_page.borrow().clone()
    }

    /// Run a command, publishing any failure as an error event.
    pub async fn handle(&self, cmd: UiCommand) {
        if let Err(e) = self.dispatch(cmd).await {
            log::error!("Command failed: {}", e);
            self.event_bus.emit(ChatEvent::Error {
                message: format!("❌ Errore: {}", e),
            });
        }
    }

    pub async fn dispatch(&self, cmd: UiCommand) -> Result<()> {
        match cmd {
            UiCommand::Init => self.init().await,
            UiCommand::Send(text) => {
                self.send(&text).await;
                Ok(())
            }
            UiCommand::NewConversation => {
                let conversation = self.store.create_conversation().await?;
                self.publish_conversation(&conversation.id, Vec::new());
                Ok(())
            }
            UiCommand::SelectConversation(id) => {
                let conversation = self.store.select_conversation(&id)?;
                self.publish_conversation(&conversation.id, conversation.messages);
                Ok(())
            }
            UiCommand::CapturePage => {
                self.capture_page().await;
                Ok(())
            }
            UiCommand::AskAboutSelection(action) => {
                self.ask_about_selection(action).await;
                Ok(())
            }
            UiCommand::QuickAction(action) => {
                self.quick_action(action);
                Ok(())
            }
            UiCommand::ToggleWebSearch => self.toggle_web_search().await.map(|_| ()),
            UiCommand::CopyMessage(id) => self.copy_message(&id),
            UiCommand::CopyCode { message_id, block } => self.copy_code(&message_id, block),
            UiCommand::Regenerate => {
                self.regenerate().await;
                Ok(())
            }
            UiCommand::AttachText { name, content } => {
                self.event_bus.emit(ChatEvent::InputPrefill {
                    text: actions::attachment_prompt(&name, &content),
                });
                Ok(())
            }
            UiCommand::SelectModel(model) => {
                self.session.set_model(model);
                self.settings.save_config(&self.session.config()).await?;
                self.event_bus.emit(ChatEvent::ModelChanged { model });
                Ok(())
            }
            UiCommand::OpenOptions => {
                self.extension.open_options_page();
                Ok(())
            }
        }
    }

    async fn init(&self) -> Result<()> {
        let config = self.settings.load_config().await?;
        let model = config.chat.model;
        self.session.set_config(config);
        self.event_bus.emit(ChatEvent::ModelChanged { model });

        let active = self.store.init().await?;
        self.publish_conversation(&active.id, active.messages);

        match self.tabs.active_tab().await {
            Ok(tab) => self.session.set_current_page(Some(tab)),
            Err(e) => log::warn!("Active tab unavailable: {}", e),
        }

        self.refresh_selection().await;

        if self.settings.is_first_time().await? {
            self.event_bus.emit(ChatEvent::Notice {
                kind: NoticeKind::System,
                text: actions::WELCOME.to_string(),
            });
            self.settings.mark_welcomed().await?;
        }

        let enabled = self.settings.web_search_enabled().await?;
        self.event_bus.emit(ChatEvent::WebSearchToggled { enabled });
        Ok(())
    }

    pub async fn send(&self, text: &str) -> SendOutcome {
        let outcome = self.session.send(text).await;
        if let SendOutcome::Completed { .. } = outcome {
            self.publish_summaries();
        }
        outcome
    }

    /// Re-read the page selection; the previous one is forgotten either way.
    pub async fn refresh_selection(&self) -> Option<String> {
        let selection = capture::capture_selection(self.tabs.as_ref()).await;
        *self.selection.borrow_mut() = selection.clone();
        if let Some(text) = &selection {
            self.event_bus.emit(ChatEvent::SelectionAvailable { text: text.clone() });
        }
        selection
    }

    pub async fn capture_page(&self) -> Option<PageSnapshot> {
        let limit = self.session.config().prompt.page_content_limit;
        match capture::capture_page(self.tabs.as_ref(), limit).await {
            Ok(page) => {
                self.event_bus.emit(ChatEvent::Notice {
                    kind: NoticeKind::Web,
                    text: actions::capture_preview(&page),
                });
                self.event_bus.emit(ChatEvent::InputPrefill {
                    text: actions::capture_prompt(&page),
                });
                *self.captured_page.borrow_mut() = Some(page.clone());
                Some(page)
            }
            Err(e) => {
                log::warn!("Error capturing page: {}", e);
                self.event_bus.emit(ChatEvent::Notice {
                    kind: NoticeKind::System,
                    text: actions::CAPTURE_FAILED.to_string(),
                });
                None
            }
        }
    }

    async fn ask_about_selection(&self, action: SelectionAction) -> Option<SendOutcome> {
        let selection = self.selection()?;
        Some(self.send(&action.prompt(&selection)).await)
    }

    fn quick_action(&self, action: QuickAction) {
        self.event_bus.emit(ChatEvent::InputPrefill {
            text: action.prompt().to_string(),
        });
    }

    pub async fn toggle_web_search(&self) -> Result<bool> {
        let enabled = self.settings.toggle_web_search().await?;
        self.notifier
            .notify(actions::NOTIFICATION_TITLE, &actions::web_search_notice(enabled));
        self.event_bus.emit(ChatEvent::WebSearchToggled { enabled });
        Ok(enabled)
    }

    fn copy_message(&self, message_id: &str) -> Result<()> {
        let message = self
            .store
            .find_message(message_id)
            .ok_or_else(|| PopupError::message_not_found(message_id))?;
        self.clipboard.write_text(&message.content);
        self.notifier.notify(actions::NOTIFICATION_TITLE, actions::COPIED);
        Ok(())
    }

    fn copy_code(&self, message_id: &str, block: usize) -> Result<()> {
        let message = self
            .store
            .find_message(message_id)
            .ok_or_else(|| PopupError::message_not_found(message_id))?;
        let code = actions::code_blocks(&message.content)
            .into_iter()
            .nth(block)
            .ok_or_else(|| PopupError::code_block_not_found(message_id, block))?;
        self.clipboard.write_text(&code);
        self.notifier.notify(actions::NOTIFICATION_TITLE, actions::CODE_COPIED);
        Ok(())
    }

    async fn regenerate(&self) -> Option<SendOutcome> {
        let last = self.store.active()?.last_user_message()?.content.clone();
        Some(self.send(&last).await)
    }

    fn publish_conversation(&self, id: &str, messages: Vec<popup_types::message::Message>) {
        self.publish_summaries();
        self.event_bus.emit(ChatEvent::ConversationLoaded {
            id: id.to_string(),
            messages,
        });
    }

    fn publish_summaries(&self) {
        self.event_bus.emit(ChatEvent::ConversationsChanged {
            conversations: self.store.summaries(),
            active_id: self.store.active_id(),
        });
    }
}
