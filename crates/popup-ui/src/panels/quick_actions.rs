//! Quick action row and the page selection banner.

use egui::{self, RichText};
use popup_core::actions::{QuickAction, SelectionAction, UiCommand};
use crate::state::UiState;
use crate::theme::*;

const SELECTION_PREVIEW_CHARS: usize = 200;

/// Canned prompts that prefill the input box
pub fn quick_actions_panel(ui: &mut egui::Ui) -> Option<UiCommand> {
    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for action in QuickAction::all() {
            if ui.small_button(action.label()).clicked() {
                picked = Some(UiCommand::QuickAction(*action));
            }
        }
    });
    picked
}

/// Banner shown while the page has a selection
pub fn selection_banner(ui: &mut egui::Ui, state: &UiState) -> Option<UiCommand> {
    let selection = state.selection.as_ref()?;
    let mut picked = None;

    egui::Frame::default()
        .fill(SELECTION_BG)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new("📌 Testo selezionato dalla pagina:")
                    .color(WARNING)
                    .strong(),
            );
            ui.label(RichText::new(selection_preview(selection)).color(TEXT_PRIMARY).small());
            ui.horizontal(|ui| {
                for action in SelectionAction::all() {
                    if ui
                        .add_enabled(!state.is_busy(), egui::Button::new(action.label()))
                        .clicked()
                    {
                        picked = Some(UiCommand::AskAboutSelection(*action));
                    }
                }
            });
        });

    picked
}

/// First 200 characters, with an ellipsis when cut
pub fn selection_preview(selection: &str) -> String {
    let mut preview: String = selection.chars().take(SELECTION_PREVIEW_CHARS).collect();
    if selection.chars().count() > SELECTION_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
