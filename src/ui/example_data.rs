//! Editor for the template's example data JSON

use eframe::egui;

use crate::app::MailsmithApp;

/// Example data editor with inline validity indicator
pub struct ExampleDataPanel;

impl ExampleDataPanel {
    /// Show the example data editor
    pub fn show(ui: &mut egui::Ui, app: &mut MailsmithApp) {
        ui.heading("Example Data (JSON)");

        let (changed, state) = {
            let template = app.store.active_mut();
            let data = template.example_data.get_or_insert_with(String::new);
            let response = egui::TextEdit::multiline(data)
                .font(egui::TextStyle::Monospace)
                .code_editor()
                .desired_width(f32::INFINITY)
                .desired_rows(8)
                .show(ui);

            let state = if data.trim().is_empty() {
                DataState::Empty
            } else {
                match serde_json::from_str::<serde_json::Value>(data) {
                    Ok(_) => DataState::Valid,
                    Err(e) => DataState::Invalid(e.to_string()),
                }
            };
            (response.response.changed(), state)
        };

        match state {
            DataState::Empty => {
                ui.label(egui::RichText::new("No example data provided.").weak());
            }
            DataState::Valid => {
                ui.label(egui::RichText::new("Valid JSON").weak());
            }
            DataState::Invalid(e) => {
                ui.colored_label(ui.visuals().error_fg_color, format!("Invalid JSON: {e}"));
            }
        }

        if changed {
            app.templates_dirty = true;
        }
    }
}

enum DataState {
    Empty,
    Valid,
    Invalid(String),
}
