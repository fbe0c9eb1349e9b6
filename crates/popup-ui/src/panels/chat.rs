//! Chat panel: displays conversation messages and input field.

use egui::{self, Key, KeyboardShortcut, Modifiers, RichText, ScrollArea, Sense, Vec2};
use popup_core::actions::UiCommand;
use crate::state::{ChatEntry, EntryKind, UiAction, UiState};
use crate::theme::*;

const INPUT_HEIGHT: f32 = 64.0;

/// Render the chat panel. Returns the actions triggered this frame.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Vec<UiAction> {
    let mut actions = Vec::new();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let available_height = ui.available_height() - INPUT_HEIGHT;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for (idx, entry) in state.messages.iter().enumerate() {
                            if let Some(cmd) = render_message(ui, idx, entry, state.busy) {
                                actions.push(UiAction::Command(cmd));
                            }
                            ui.add_space(4.0);
                        }

                        if !state.streaming_text.is_empty() {
                            egui::Frame::default()
                                .fill(BG_SECONDARY)
                                .corner_radius(PANEL_ROUNDING)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.label(
                                        RichText::new(&state.streaming_text)
                                            .color(TEXT_PRIMARY),
                                    );
                                    ui.label(RichText::new("▌").color(ACCENT).strong());
                                });
                        }
                    });

                ui.add_space(8.0);
                actions.extend(input_row(ui, state));
            });
        });

    actions
}

/// Input box with Attach and Send. Enter sends, Shift+Enter breaks the line.
fn input_row(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.busy, egui::Button::new("📎"))
            .on_hover_text("Allega file")
            .clicked()
        {
            action = Some(UiAction::PickAttachment);
        }

        let input = egui::TextEdit::multiline(&mut state.input_text)
            .hint_text("Scrivi un messaggio...")
            .desired_rows(2)
            .return_key(KeyboardShortcut::new(Modifiers::SHIFT, Key::Enter))
            .desired_width(ui.available_width() - 70.0)
            .font(egui::FontId::proportional(14.0));
        let response = ui.add(input);

        let send_enabled = state.can_send();
        let send_btn = ui.add_enabled(
            send_enabled,
            egui::Button::new(RichText::new("Invia").color(TEXT_PRIMARY))
                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(60.0, 0.0)),
        );

        let enter = response.has_focus()
            && ui.input(|i| i.key_pressed(Key::Enter) && !i.modifiers.shift);
        if enter || send_btn.clicked() {
            if let Some(text) = state.take_input() {
                action = Some(UiAction::Command(UiCommand::Send(text)));
            }
            response.request_focus();
        }
    });

    action
}

/// One message bubble. Stored messages get a copy/regenerate context menu;
/// replies with code blocks get one copy button per block.
fn render_message(
    ui: &mut egui::Ui,
    idx: usize,
    entry: &ChatEntry,
    busy: bool,
) -> Option<UiCommand> {
    let (label, label_color, bg) = entry_style(entry.kind);
    let mut picked = None;

    let frame = egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).color(label_color).strong().small());
            ui.label(RichText::new(&entry.content).color(TEXT_PRIMARY));
            if let Some(message_id) = &entry.message_id {
                if entry.code_blocks > 0 {
                    ui.horizontal_wrapped(|ui| {
                        for block in 0..entry.code_blocks {
                            if ui
                                .small_button(format!("📋 {}", block + 1))
                                .on_hover_text("Copia codice")
                                .clicked()
                            {
                                picked = Some(UiCommand::CopyCode {
                                    message_id: message_id.clone(),
                                    block,
                                });
                            }
                        }
                    });
                }
            }
        });

    let message_id = entry.message_id.as_ref()?;
    let response = ui.interact(frame.response.rect, ui.id().with(("message", idx)), Sense::click());
    response.context_menu(|ui| {
        if ui.button("📋 Copia").clicked() {
            picked = Some(UiCommand::CopyMessage(message_id.clone()));
            ui.close();
        }
        if entry.kind == EntryKind::Assistant
            && ui.add_enabled(!busy, egui::Button::new("🔄 Rigenera")).clicked()
        {
            picked = Some(UiCommand::Regenerate);
            ui.close();
        }
    });
    picked
}
