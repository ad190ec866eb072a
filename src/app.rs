//! Main application state and UI coordination

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use anyhow::{Context, Result};
use eframe::egui;

use crate::assistant::{self, AssistantError, AssistantEvent, ChatSession};
use crate::core::render;
use crate::core::settings::Settings;
use crate::core::storage::Storage;
use crate::core::template::TemplateStore;
use crate::ui::{
    chat::ChatPanel, example_data::ExampleDataPanel, preview::PreviewPanel,
    sections::SectionsPanel, settings::SettingsPanel,
};

/// View mode for the template editing area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Editor,
    Preview,
    #[default]
    Split,
}

/// Main application state
pub struct MailsmithApp {
    /// All templates plus the active selection
    pub store: TemplateStore,
    /// Assistant and editor settings
    pub settings: Settings,
    /// Local persistence
    pub storage: Storage,
    /// Chat transcript and in-flight flag
    pub chat: ChatSession,
    /// Pending chat input
    pub chat_input: String,
    /// Current view mode for the editing area
    pub view_mode: ViewMode,
    /// Whether the settings panel is visible
    pub settings_visible: bool,
    /// Transient status line (export results, errors)
    pub status: Option<String>,
    /// Commonmark cache for rendering assistant replies
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Templates changed this frame and need persisting
    pub templates_dirty: bool,
    /// Settings changed this frame and need persisting
    pub settings_dirty: bool,
    /// Runtime for the outbound assistant call
    runtime: tokio::runtime::Runtime,
    /// Sender side of the assistant event channel
    events_tx: Sender<AssistantEvent>,
    /// Receiver drained every frame
    events_rx: Receiver<AssistantEvent>,
}

impl MailsmithApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let storage = Storage::new();
        let store = TemplateStore::new(storage.load_templates());
        let settings = storage.load_settings();
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        let (events_tx, events_rx) = std::sync::mpsc::channel();

        Ok(Self {
            store,
            settings,
            storage,
            chat: ChatSession::default(),
            chat_input: String::new(),
            view_mode: ViewMode::default(),
            settings_visible: true,
            status: None,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            templates_dirty: false,
            settings_dirty: false,
            runtime,
            events_tx,
            events_rx,
        })
    }

    /// Create a new template and make it active
    pub fn new_template(&mut self) {
        self.store.new_template();
        self.templates_dirty = true;
    }

    /// Delete the active template; refused when it is the last one
    pub fn delete_template(&mut self) {
        if self.store.delete_active() {
            self.templates_dirty = true;
        }
    }

    /// Send the current chat input to the assistant
    pub fn send_chat(&mut self, ctx: &egui::Context) {
        let input = self.chat_input.trim().to_string();
        if input.is_empty() || self.settings.api_key.trim().is_empty() || self.chat.pending {
            return;
        }

        self.chat.push_user(input.clone());
        self.chat_input.clear();
        self.chat.pending = true;

        let settings = self.settings.clone();
        let template = self.store.active().clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = match assistant::AssistantClient::new() {
                Ok(client) => client.complete(&settings, &template, &input).await,
                Err(e) => Err(e),
            };
            let _ = tx.send(AssistantEvent::Completed(result));
            ctx.request_repaint();
        });
    }

    /// Drain completed assistant calls from the event channel
    fn drain_events(&mut self) {
        loop {
            match self.events_rx.try_recv() {
                Ok(AssistantEvent::Completed(result)) => self.apply_assistant_result(result),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Merge a settled assistant reply into the active document and transcript
    fn apply_assistant_result(&mut self, result: std::result::Result<String, AssistantError>) {
        self.chat.pending = false;

        let content = match result {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Assistant request failed: {e}");
                self.chat.push_assistant(format!("Error: {e}"));
                return;
            }
        };

        let response = assistant::parse_reply(&content);
        let had_updates = !response.updates.is_empty();
        if had_updates {
            match assistant::apply_updates(self.store.active_mut(), &response.updates) {
                Ok(()) => {}
                Err(e) => self.chat.push_assistant(format!("Error: {e}")),
            }
            // Entries that passed validation have been applied either way.
            self.templates_dirty = true;
        }

        if let Some(reply) = response.chat_response {
            self.chat.push_assistant(reply);
        } else if had_updates {
            self.chat.push_assistant("Template updated.");
        }
    }

    /// Export the rendered active template through a save dialog
    pub fn export_html(&mut self) {
        let (title, rendered) = {
            let template = self.store.active();
            (template.title.clone(), render::render_preview(template))
        };

        let html = match rendered {
            Ok(html) => html,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        let file_name = format!("{}.html", slugify(&title));
        let Some(path) = rfd::FileDialog::new().set_file_name(&file_name).save_file() else {
            return;
        };

        match std::fs::write(&path, html) {
            Ok(()) => {
                tracing::info!("Exported template to: {}", path.display());
                self.status = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => self.status = Some(format!("Export failed: {e}")),
        }
    }

    /// Render the active template to a temp file and open it in the browser
    pub fn open_preview_in_browser(&mut self) {
        let (id, rendered) = {
            let template = self.store.active();
            (template.id.clone(), render::render_preview(template))
        };

        let html = match rendered {
            Ok(html) => html,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        let path = std::env::temp_dir().join(format!("mailsmith-preview-{id}.html"));
        if let Err(e) = std::fs::write(&path, html).and_then(|()| open::that(&path)) {
            self.status = Some(format!("Failed to open preview: {e}"));
        }
    }

    /// Persist whatever changed this frame
    fn persist_changes(&mut self) {
        if self.templates_dirty {
            if let Err(e) = self.storage.save_templates(&self.store.templates) {
                tracing::error!("Failed to save templates: {e:#}");
            }
            self.templates_dirty = false;
        }
        if self.settings_dirty {
            if let Err(e) = self.storage.save_settings(&self.settings) {
                tracing::error!("Failed to save settings: {e:#}");
            }
            self.settings_dirty = false;
        }
    }

    /// Render the top bar: title, template selector, actions
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button("\u{2699}")
                    .on_hover_text("Toggle settings")
                    .clicked()
                {
                    self.settings_visible = !self.settings_visible;
                }

                let title_edit = egui::TextEdit::singleline(&mut self.store.active_mut().title)
                    .hint_text("Template Title")
                    .desired_width(240.0);
                if ui.add(title_edit).changed() {
                    self.templates_dirty = true;
                }

                ui.separator();

                let templates: Vec<(String, String)> = self
                    .store
                    .templates
                    .iter()
                    .map(|t| (t.id.clone(), t.title.clone()))
                    .collect();
                let active_title = self.store.active().title.clone();
                egui::ComboBox::from_id_salt("template_select")
                    .selected_text(active_title)
                    .show_ui(ui, |ui| {
                        for (id, title) in &templates {
                            if ui
                                .selectable_label(*id == self.store.active_id, title)
                                .clicked()
                            {
                                self.store.select(id);
                            }
                        }
                    });

                if ui.button("New").clicked() {
                    self.new_template();
                }
                let can_delete = self.store.templates.len() > 1;
                if ui
                    .add_enabled(can_delete, egui::Button::new("Delete"))
                    .clicked()
                {
                    self.delete_template();
                }
                if ui.button("Export").clicked() {
                    self.export_html();
                }

                ui.separator();

                for (mode, label) in [
                    (ViewMode::Editor, "Editor"),
                    (ViewMode::Preview, "Preview"),
                    (ViewMode::Split, "Split"),
                ] {
                    if ui
                        .selectable_label(self.view_mode == mode, label)
                        .clicked()
                    {
                        self.view_mode = mode;
                    }
                }

                if let Some(status) = self.status.clone() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{2715}").clicked() {
                            self.status = None;
                        }
                        ui.label(egui::RichText::new(status).weak());
                    });
                }
            });
        });
    }

    /// Render the editor/preview area according to the current view mode
    fn render_editing_area(&mut self, ui: &mut egui::Ui) {
        match self.view_mode {
            ViewMode::Editor => {
                SectionsPanel::show_html_editor(ui, self);
            }
            ViewMode::Preview => {
                PreviewPanel::show(ui, self);
            }
            ViewMode::Split => {
                let available_width = ui.available_width();
                ui.horizontal(|ui| {
                    ui.set_min_width(available_width);

                    ui.vertical(|ui| {
                        ui.set_width(available_width / 2.0 - 4.0);
                        SectionsPanel::show_html_editor(ui, self);
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.set_width(available_width / 2.0 - 4.0);
                        PreviewPanel::show(ui, self);
                    });
                });
            }
        }
    }
}

/// File-name-safe version of a template title
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = false;
    for c in title.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            if !last_dash {
                slug.push('-');
                last_dash = true;
            }
        } else {
            slug.push(c);
            last_dash = false;
        }
    }
    if slug.is_empty() {
        slug.push_str("template");
    }
    slug
}

impl eframe::App for MailsmithApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::N) {
                self.new_template();
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::Comma) {
                self.settings_visible = !self.settings_visible;
            }
        });

        // Apply settled assistant calls before drawing
        self.drain_events();

        self.render_top_bar(ctx);

        if self.settings_visible {
            egui::SidePanel::left("settings_panel")
                .resizable(true)
                .default_width(280.0)
                .min_width(220.0)
                .show(ctx, |ui| {
                    SettingsPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .show(ui, |ui| {
                    ChatPanel::show(ui, self);
                    ui.separator();
                    self.render_editing_area(ui);
                    ui.separator();
                    ExampleDataPanel::show(ui, self);
                    ui.separator();
                    SectionsPanel::show_secondary(ui, self);
                });
        });

        // Mirror document and settings state to disk on every change
        self.persist_changes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Default Template Title"), "default-template-title");
        assert_eq!(slugify("  Spaced   Out  "), "spaced-out");
        assert_eq!(slugify(""), "template");
    }
}
