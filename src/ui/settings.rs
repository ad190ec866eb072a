//! Settings panel for assistant configuration

use eframe::egui;

use crate::app::MailsmithApp;

/// Settings form: API key, model, prompts, persistence flag
pub struct SettingsPanel;

impl SettingsPanel {
    /// Show the settings panel
    pub fn show(ui: &mut egui::Ui, app: &mut MailsmithApp) {
        ui.heading("Settings");
        ui.add_space(8.0);

        let changed = egui::ScrollArea::vertical()
            .id_salt("settings_scroll")
            .show(ui, |ui| {
                let settings = &mut app.settings;
                let mut changed = false;

                ui.label(egui::RichText::new("API Key").strong());
                changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut settings.api_key)
                            .password(true)
                            .hint_text("sk-..."),
                    )
                    .changed();
                changed |= ui
                    .checkbox(&mut settings.persist_api_key, "Remember API key on disk")
                    .changed();
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Model").strong());
                changed |= ui.text_edit_singleline(&mut settings.model).changed();
                ui.add_space(8.0);

                ui.label(egui::RichText::new("System Prompt").strong());
                changed |= ui
                    .add(
                        egui::TextEdit::multiline(&mut settings.system_prompt)
                            .desired_rows(4)
                            .desired_width(f32::INFINITY),
                    )
                    .changed();
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Thought Process Prompt").strong());
                let thought = settings.thought_process_prompt.get_or_insert_with(String::new);
                changed |= ui
                    .add(
                        egui::TextEdit::multiline(thought)
                            .desired_rows(4)
                            .desired_width(f32::INFINITY),
                    )
                    .changed();
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Example Template").strong());
                let example = settings.example_template.get_or_insert_with(String::new);
                changed |= ui
                    .add(
                        egui::TextEdit::multiline(example)
                            .desired_rows(6)
                            .desired_width(f32::INFINITY)
                            .hint_text("Optional reference template sent with each request"),
                    )
                    .changed();

                changed
            })
            .inner;

        if changed {
            app.settings_dirty = true;
        }
    }
}
