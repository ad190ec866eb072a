//! Rendered preview of the active template

use eframe::egui;

use crate::app::MailsmithApp;
use crate::core::render;

/// Preview panel showing the substituted `html` section
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, app: &mut MailsmithApp) {
        let rendered = render::render_preview(app.store.active());
        let mut open_in_browser = false;

        ui.horizontal(|ui| {
            ui.heading("Preview");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(rendered.is_ok(), egui::Button::new("Open in Browser"))
                    .on_hover_text("Render to a temporary file and open it")
                    .clicked()
                {
                    open_in_browser = true;
                }
            });
        });

        match &rendered {
            Ok(html) => {
                egui::ScrollArea::vertical()
                    .id_salt("preview_scroll")
                    .max_height(360.0)
                    .show(ui, |ui| {
                        ui.monospace(html.as_str());
                    });
            }
            Err(e) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
        }

        if open_in_browser {
            app.open_preview_in_browser();
        }
    }
}
