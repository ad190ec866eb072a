//! Template documents and the in-memory template store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default `html` section for newly created templates
const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Email Template</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 0; padding: 0; background-color: #f4f4f4; }
        .container { width: 100%; max-width: 600px; margin: 0 auto; background-color: #ffffff; padding: 20px; border-radius: 8px; box-shadow: 0 0 10px rgba(0, 0, 0, 0.1); }
        .header { background-color: #007bff; color: #ffffff; padding: 10px 20px; text-align: center; border-radius: 8px 8px 0 0; }
        .content { padding: 20px; line-height: 1.6; color: #333333; }
        .footer { text-align: center; padding: 10px 20px; font-size: 12px; color: #777777; border-top: 1px solid #eeeeee; margin-top: 20px; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Welcome, {{customer.name}}!</h1>
        </div>
        <div class="content">
            <p>Thank you for your recent purchase of <strong>{{order.product}}</strong>. Your order number is <strong>{{order.number}}</strong>.</p>
            <p>We appreciate your business and hope you enjoy your new product.</p>
            <p>If you have any questions, please don't hesitate to contact our support team.</p>
        </div>
        <div class="footer">
            <p>&copy; {{year}} Your Company. All rights reserved.</p>
        </div>
    </div>
</body>
</html>"#;

/// Default example data matching the placeholders in [`DEFAULT_HTML`]
const DEFAULT_EXAMPLE_DATA: &str = r#"{
  "customer": { "name": "John Doe" },
  "order": { "number": 12345, "product": "Widget" },
  "year": 2025
}"#;

/// An email template document
///
/// Sections are free-form named text fields; the conventional keys are
/// `title`, `html`, `main-content` and `code`. Stored JSON uses camelCase
/// field names (`exampleData`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Named text sections
    pub sections: BTreeMap<String, String>,
    /// Example data for placeholder substitution, as a JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_data: Option<String>,
}

impl Template {
    /// Create a template with the built-in default content
    pub fn new_default() -> Self {
        let mut sections = BTreeMap::new();
        sections.insert("title".to_string(), "Default Title".to_string());
        sections.insert("html".to_string(), DEFAULT_HTML.to_string());
        sections.insert(
            "main-content".to_string(),
            "This section is now for general text content.".to_string(),
        );
        sections.insert("code".to_string(), "// Default code snippet".to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            title: "Default Template Title".to_string(),
            sections,
            example_data: Some(DEFAULT_EXAMPLE_DATA.to_string()),
        }
    }

    /// Get a section's content, or an empty string when absent
    pub fn section(&self, id: &str) -> &str {
        self.sections.get(id).map(String::as_str).unwrap_or("")
    }
}

/// Ordered collection of templates with one active selection
///
/// Invariant: the store always holds at least one template. Deleting the last
/// remaining template is refused.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    /// All templates, in creation order
    pub templates: Vec<Template>,
    /// Id of the currently active template
    pub active_id: String,
}

impl TemplateStore {
    /// Build a store from loaded templates, falling back to a single default
    pub fn new(templates: Vec<Template>) -> Self {
        let templates = if templates.is_empty() {
            vec![Template::new_default()]
        } else {
            templates
        };
        let active_id = templates[0].id.clone();
        Self {
            templates,
            active_id,
        }
    }

    /// The active template, falling back to the first one when the active id
    /// is stale
    pub fn active(&self) -> &Template {
        self.templates
            .iter()
            .find(|t| t.id == self.active_id)
            .unwrap_or(&self.templates[0])
    }

    /// The active template, mutably
    pub fn active_mut(&mut self) -> &mut Template {
        let idx = self
            .templates
            .iter()
            .position(|t| t.id == self.active_id)
            .unwrap_or(0);
        &mut self.templates[idx]
    }

    /// Switch the active template
    pub fn select(&mut self, id: &str) {
        if self.templates.iter().any(|t| t.id == id) {
            self.active_id = id.to_string();
        }
    }

    /// Append a fresh default template and make it active
    pub fn new_template(&mut self) -> &Template {
        let template = Template::new_default();
        self.active_id = template.id.clone();
        self.templates.push(template);
        self.templates.last().unwrap_or(&self.templates[0])
    }

    /// Delete the active template; refused when it is the only one left.
    /// Returns whether a template was removed.
    pub fn delete_active(&mut self) -> bool {
        if self.templates.len() <= 1 {
            return false;
        }
        let active_id = self.active().id.clone();
        self.templates.retain(|t| t.id != active_id);
        self.active_id = self.templates[0].id.clone();
        true
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_sections() {
        let template = Template::new_default();
        assert!(template.sections.contains_key("html"));
        assert!(template.sections.contains_key("code"));
        assert!(template.section("html").contains("{{customer.name}}"));
        assert_eq!(template.section("missing"), "");
    }

    #[test]
    fn test_store_falls_back_to_default() {
        let store = TemplateStore::new(Vec::new());
        assert_eq!(store.templates.len(), 1);
        assert_eq!(store.active().id, store.active_id);
    }

    #[test]
    fn test_delete_last_template_is_refused() {
        let mut store = TemplateStore::default();
        assert!(!store.delete_active());
        assert_eq!(store.templates.len(), 1);
    }

    #[test]
    fn test_delete_activates_first_remaining() {
        let mut store = TemplateStore::default();
        let first_id = store.active_id.clone();
        store.new_template();
        assert_ne!(store.active_id, first_id);

        assert!(store.delete_active());
        assert_eq!(store.templates.len(), 1);
        assert_eq!(store.active_id, first_id);
    }

    #[test]
    fn test_stale_active_id_falls_back() {
        let mut store = TemplateStore::default();
        store.active_id = "gone".to_string();
        let first_id = store.templates[0].id.clone();
        assert_eq!(store.active().id, first_id);
    }

    #[test]
    fn test_template_serializes_with_camel_case() {
        let template = Template::new_default();
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains("\"exampleData\""));
    }
}
