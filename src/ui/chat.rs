//! Chat panel for the AI assistant

use eframe::egui;
use egui_commonmark::CommonMarkViewer;

use crate::app::MailsmithApp;
use crate::assistant::ChatRole;

/// Chat panel with transcript and input row
pub struct ChatPanel;

impl ChatPanel {
    /// Show the chat panel
    pub fn show(ui: &mut egui::Ui, app: &mut MailsmithApp) {
        ui.heading("Chat with AI");

        if app.settings.api_key.trim().is_empty() {
            ui.label(
                egui::RichText::new("Add an API key in Settings to enable the assistant.").weak(),
            );
        }

        egui::ScrollArea::vertical()
            .id_salt("chat_scroll")
            .max_height(220.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for (idx, entry) in app.chat.entries.iter().enumerate() {
                    match entry.role {
                        ChatRole::User => {
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Min),
                                |ui| {
                                    ui.label(egui::RichText::new(&entry.content).strong());
                                },
                            );
                        }
                        ChatRole::Assistant => {
                            // Assistant replies are markdown-ish; render them
                            // as such.
                            ui.push_id(idx, |ui| {
                                CommonMarkViewer::new().show(
                                    ui,
                                    &mut app.commonmark_cache,
                                    &entry.content,
                                );
                            });
                        }
                    }
                    ui.add_space(4.0);
                }

                if app.chat.pending {
                    ui.label(egui::RichText::new("Loading...").weak().italics());
                }
            });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let can_send = !app.chat.pending && !app.settings.api_key.trim().is_empty();

            let input = ui.add_enabled(
                can_send,
                egui::TextEdit::singleline(&mut app.chat_input)
                    .hint_text("Type your message...")
                    .desired_width(ui.available_width() - 70.0),
            );
            let mut send_now =
                input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let send_enabled = can_send && !app.chat_input.trim().is_empty();
            if ui
                .add_enabled(send_enabled, egui::Button::new("Send"))
                .clicked()
            {
                send_now = true;
            }

            if send_now && can_send {
                let ctx = ui.ctx().clone();
                app.send_chat(&ctx);
            }
        });
    }
}
