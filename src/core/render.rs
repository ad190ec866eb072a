//! Placeholder substitution for template strings

use serde_json::Value;
use thiserror::Error;

use super::template::Template;

/// Errors surfaced by the preview renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No example data provided.")]
    NoExampleData,
    #[error("Invalid JSON in example data: {0}")]
    InvalidExampleData(#[from] serde_json::Error),
}

/// Replace every `{{ path.to.value }}` placeholder in `template` with the
/// value found by walking `data` along the dot-separated path.
///
/// Placeholders whose path cannot be fully resolved are left verbatim. There
/// is no escaping and no nesting; this is a single substitution pass.
pub fn render_template(template: &str, data: &Value) -> String {
    let re = regex_lite::Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").unwrap();
    re.replace_all(template, |caps: &regex_lite::Captures| {
        lookup(data, &caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// Walk `data` along a dot-separated path; `None` when any segment is missing
/// or the walk passes through a non-object value.
fn lookup(data: &Value, path: &str) -> Option<String> {
    let mut value = data;
    for key in path.split('.') {
        value = value.get(key)?;
    }
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Render the `html` section of a template against its example data.
///
/// Used by the preview panel and the HTML exporter.
pub fn render_preview(template: &Template) -> Result<String, RenderError> {
    let raw = template
        .example_data
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(RenderError::NoExampleData)?;
    let data: Value = serde_json::from_str(raw)?;
    Ok(render_template(template.section("html"), &data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_placeholders_unchanged() {
        let data = json!({"a": 1});
        assert_eq!(render_template("plain text", &data), "plain text");
    }

    #[test]
    fn test_dot_path_resolves() {
        let data = json!({"a": {"b": "x"}});
        assert_eq!(render_template("{{a.b}}", &data), "x");
    }

    #[test]
    fn test_missing_segment_left_verbatim() {
        let data = json!({"a": {}});
        assert_eq!(render_template("{{a.b}}", &data), "{{a.b}}");
    }

    #[test]
    fn test_whitespace_inside_braces() {
        let data = json!({"name": "Ada"});
        assert_eq!(render_template("Hello {{ name }}!", &data), "Hello Ada!");
    }

    #[test]
    fn test_non_string_values() {
        let data = json!({"order": {"number": 12345}, "active": true});
        assert_eq!(
            render_template("#{{order.number}} {{active}}", &data),
            "#12345 true"
        );
    }

    #[test]
    fn test_walk_through_scalar_left_verbatim() {
        let data = json!({"a": "scalar"});
        assert_eq!(render_template("{{a.b}}", &data), "{{a.b}}");
    }

    #[test]
    fn test_multiple_occurrences() {
        let data = json!({"customer": {"name": "John"}});
        assert_eq!(
            render_template("{{customer.name}} and {{customer.name}}", &data),
            "John and John"
        );
    }

    #[test]
    fn test_render_preview_requires_example_data() {
        let mut template = Template::new_default();
        template.example_data = None;
        assert!(matches!(
            render_preview(&template),
            Err(RenderError::NoExampleData)
        ));
    }

    #[test]
    fn test_render_preview_rejects_invalid_json() {
        let mut template = Template::new_default();
        template.example_data = Some("{not json".to_string());
        assert!(matches!(
            render_preview(&template),
            Err(RenderError::InvalidExampleData(_))
        ));
    }

    #[test]
    fn test_render_preview_substitutes_html_section() {
        let template = Template::new_default();
        let html = render_preview(&template).unwrap();
        assert!(html.contains("Welcome, John Doe!"));
        assert!(!html.contains("{{customer.name}}"));
    }
}
