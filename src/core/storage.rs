//! Local persistence for templates and settings
//!
//! The full template list and the settings object are mirrored to two JSON
//! files in the per-user data directory on every change. Loading falls back
//! to built-in defaults when nothing is stored; there is no migration or
//! versioning.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::settings::Settings;
use super::template::Template;

/// File name for the serialized template list
const TEMPLATES_KEY: &str = "templates.json";
/// File name for the serialized settings
const SETTINGS_KEY: &str = "settings.json";

/// Key-value persistence rooted in the app data directory
#[derive(Debug, Clone)]
pub struct Storage {
    root: Option<PathBuf>,
}

impl Storage {
    /// Storage rooted in the per-user data directory
    pub fn new() -> Self {
        let root = ProjectDirs::from("com", "mailsmith", "Mailsmith")
            .map(|dirs| dirs.data_dir().to_path_buf());
        Self { root }
    }

    /// Storage rooted at an explicit directory
    #[allow(dead_code)]
    pub fn with_root(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let root = self
            .root
            .as_ref()
            .context("Could not determine data directory")?;
        Ok(root.join(key))
    }

    fn read_key(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn write_key(&self, key: &str, content: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Load the template list, falling back to a single default template when
    /// nothing is stored or the stored JSON does not parse
    pub fn load_templates(&self) -> Vec<Template> {
        let stored = match self.read_key(TEMPLATES_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to load templates: {e:#}");
                None
            }
        };

        stored
            .and_then(|content| match serde_json::from_str::<Vec<Template>>(&content) {
                Ok(templates) if !templates.is_empty() => Some(templates),
                Ok(_) => None,
                Err(e) => {
                    tracing::error!("Stored templates are malformed: {e}");
                    None
                }
            })
            .unwrap_or_else(|| vec![Template::new_default()])
    }

    /// Write the full template list
    pub fn save_templates(&self, templates: &[Template]) -> Result<()> {
        let content = serde_json::to_string_pretty(templates)?;
        self.write_key(TEMPLATES_KEY, &content)?;
        tracing::info!("Saved {} template(s)", templates.len());
        Ok(())
    }

    /// Load settings, falling back to defaults; the API key is blanked when
    /// persistence is disabled
    pub fn load_settings(&self) -> Settings {
        let stored = match self.read_key(SETTINGS_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to load settings: {e:#}");
                None
            }
        };

        stored
            .and_then(|content| match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::error!("Stored settings are malformed: {e}");
                    None
                }
            })
            .unwrap_or_default()
            .sanitized()
    }

    /// Write the settings object; the API key is blanked first when
    /// persistence is disabled
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string_pretty(&settings.sanitized())?;
        self.write_key(SETTINGS_KEY, &content)?;
        tracing::info!("Saved settings");
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
