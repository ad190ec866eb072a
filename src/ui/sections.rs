//! Section editors for the active template

use eframe::egui;

use crate::app::MailsmithApp;

/// Editors for the template's named text sections
pub struct SectionsPanel;

impl SectionsPanel {
    /// Show the main HTML section editor
    pub fn show_html_editor(ui: &mut egui::Ui, app: &mut MailsmithApp) {
        ui.heading("Main Content (HTML)");

        let changed = {
            let template = app.store.active_mut();
            let html = template.sections.entry("html".to_string()).or_default();
            let response = egui::TextEdit::multiline(html)
                .font(egui::TextStyle::Monospace)
                .code_editor()
                .desired_width(f32::INFINITY)
                .desired_rows(18)
                .show(ui);
            response.response.changed()
        };

        if changed {
            app.templates_dirty = true;
        }
    }

    /// Show editors for every section other than `html`
    pub fn show_secondary(ui: &mut egui::Ui, app: &mut MailsmithApp) {
        ui.heading("Template Sections");

        let changed = {
            let template = app.store.active_mut();
            let mut changed = false;
            for (id, content) in template.sections.iter_mut() {
                if id == "html" {
                    continue;
                }

                ui.label(egui::RichText::new(id.as_str()).strong());
                let rows = if id == "code" { 6 } else { 3 };
                let response = egui::TextEdit::multiline(content)
                    .desired_width(f32::INFINITY)
                    .desired_rows(rows)
                    .show(ui);
                changed |= response.response.changed();
                ui.add_space(8.0);
            }
            changed
        };

        if changed {
            app.templates_dirty = true;
        }
    }
}
