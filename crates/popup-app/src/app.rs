//! Main egui application: composes the panels and drives the controller.

use std::rc::Rc;

use egui::{self, CentralPanel, TopBottomPanel};

use popup_core::actions::UiCommand;
use popup_core::controller::{Ports, PopupController};
use popup_core::event_bus::EventBus;
use popup_core::ports::{NoSearch, SearchPort, StaticSearch, TabsPort};
use popup_platform::{
    auto_detect_storage, pick_text_file, BrowserClipboard, ChromeNotifier, ChromeRuntime,
    ChromeTabs, PuterChat,
};
use popup_types::{
    PopupError, Result,
    event::ChatEvent,
    page::{RawPage, TabInfo},
};
use popup_ui::panels::{chat, header, quick_actions};
use popup_ui::state::{UiAction, UiState};
use popup_ui::theme;

/// Query flag that swaps in the canned search provider
const DEMO_SEARCH_FLAG: &str = "demo-search";

/// The main application state
pub struct PopupApp {
    ui_state: UiState,
    event_bus: EventBus,
    controller: Rc<PopupController>,
    first_frame: bool,
}

impl PopupApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let event_bus = EventBus::new();

        if !PuterChat::is_available() {
            log::warn!("Puter SDK not loaded; chat requests will fail");
        }

        let tabs: Rc<dyn TabsPort> = if ChromeTabs::is_available() {
            Rc::new(ChromeTabs::new())
        } else {
            log::warn!("chrome.tabs unavailable. Using stub.");
            Rc::new(NoTabs)
        };

        let ports = Ports {
            storage: auto_detect_storage(),
            chat: Rc::new(PuterChat::new()),
            search: search_provider(),
            tabs,
            notifier: Rc::new(ChromeNotifier),
            clipboard: Rc::new(BrowserClipboard),
            extension: Rc::new(ChromeRuntime),
        };

        Self {
            ui_state: UiState::new(),
            controller: Rc::new(PopupController::new(ports, event_bus.clone())),
            event_bus,
            first_frame: true,
        }
    }

    /// Hand a command to the controller (async, fire-and-forget)
    fn dispatch(&self, cmd: UiCommand, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.handle(cmd).await;
            ctx.request_repaint();
        });
    }

    /// Open the file dialog and turn the picked file into an input prefill
    fn pick_attachment(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match pick_text_file().await {
                Ok(Some(file)) => {
                    controller
                        .handle(UiCommand::AttachText {
                            name: file.name,
                            content: file.content,
                        })
                        .await;
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Attachment failed: {}", e);
                    event_bus.emit(ChatEvent::Error {
                        message: format!("❌ Errore: {}", e),
                    });
                }
            }
            ctx.request_repaint();
        });
    }

    fn run(&self, actions: Vec<UiAction>, ctx: &egui::Context) {
        for action in actions {
            match action {
                UiAction::Command(cmd) => self.dispatch(cmd, ctx),
                UiAction::PickAttachment => self.pick_attachment(ctx),
            }
        }
    }
}

impl eframe::App for PopupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.dispatch(UiCommand::Init, ctx);
            self.first_frame = false;
        }

        // Drain events from the controller
        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain());
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        let mut actions = Vec::new();

        // ── Header, quick actions, selection ────────────────
        TopBottomPanel::top("header").show(ctx, |ui| {
            actions.extend(header::header_panel(ui, &self.ui_state));
            ui.separator();
            if let Some(cmd) = quick_actions::quick_actions_panel(ui) {
                actions.push(UiAction::Command(cmd));
            }
            if let Some(cmd) = quick_actions::selection_banner(ui, &self.ui_state) {
                actions.push(UiAction::Command(cmd));
            }
            ui.add_space(4.0);
        });

        // ── Conversation ────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            actions.extend(chat::chat_panel(ui, &mut self.ui_state));
        });

        self.run(actions, ctx);
    }
}

fn search_provider() -> Rc<dyn SearchPort> {
    let demo = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|query| query.contains(DEMO_SEARCH_FLAG))
        .unwrap_or(false);
    if demo {
        log::info!("Search provider: static demo results");
        Rc::new(StaticSearch::demo())
    } else {
        Rc::new(NoSearch)
    }
}

// ─── Stub tabs for when the popup runs outside the extension ─

struct NoTabs;

#[async_trait::async_trait(?Send)]
impl TabsPort for NoTabs {
    async fn active_tab(&self) -> Result<TabInfo> {
        Err(PopupError::Tab("tabs API not available".to_string()))
    }

    async fn request_selection(&self, _tab_id: i32) -> Result<Option<String>> {
        Ok(None)
    }

    async fn extract_page(&self, _tab_id: i32) -> Result<RawPage> {
        Err(PopupError::Tab("scripting API not available".to_string()))
    }
}
