//! Header: title, status, toolbar buttons, model and history pickers.

use egui::{self, Align, Layout, RichText};
use popup_core::actions::UiCommand;
use popup_types::config::ChatModel;
use crate::state::{UiAction, UiState};
use crate::theme::*;

/// Render the header. Returns the actions triggered this frame.
pub fn header_panel(ui: &mut egui::Ui, state: &UiState) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let command = |cmd: UiCommand| UiAction::Command(cmd);

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Page Assistant")
                .strong()
                .color(ACCENT)
                .size(16.0),
        );
        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
        ui.label(RichText::new(&state.status_text).color(status_color).small());

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("⚙").on_hover_text("Opzioni").clicked() {
                actions.push(command(UiCommand::OpenOptions));
            }
            if ui
                .add_enabled(state.can_switch_conversation(), egui::Button::new("➕"))
                .on_hover_text("Nuova conversazione")
                .clicked()
            {
                actions.push(command(UiCommand::NewConversation));
            }
            if ui
                .selectable_label(state.web_search_enabled, "🌐")
                .on_hover_text("Ricerca web")
                .clicked()
            {
                actions.push(command(UiCommand::ToggleWebSearch));
            }
            if ui.button("📷").on_hover_text("Cattura pagina").clicked() {
                actions.push(command(UiCommand::CapturePage));
            }
        });
    });

    ui.horizontal(|ui| {
        let mut model = state.model;
        egui::ComboBox::from_id_salt("chat_model")
            .selected_text(model.label())
            .show_ui(ui, |ui| {
                for m in ChatModel::all() {
                    ui.selectable_value(&mut model, *m, m.label());
                }
            });
        if model != state.model {
            actions.push(command(UiCommand::SelectModel(model)));
        }

        let mut selected = state.active_id.clone();
        ui.add_enabled_ui(state.can_switch_conversation(), |ui| {
            egui::ComboBox::from_id_salt("conversation_history")
                .selected_text(state.active_title().unwrap_or("Cronologia"))
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for c in &state.conversations {
                        let label = format!("{} ({})", c.title, c.message_count);
                        ui.selectable_value(&mut selected, Some(c.id.clone()), label);
                    }
                });
        });
        if selected != state.active_id {
            if let Some(id) = selected {
                actions.push(command(UiCommand::SelectConversation(id)));
            }
        }
    });

    actions
}
