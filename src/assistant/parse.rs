//! Assistant reply parsing and document merge
//!
//! The remote model is instructed (not guaranteed) to answer with a JSON
//! object of per-section updates, optionally wrapped in a fenced code block,
//! plus an optional conversational reply. Anything that does not parse is
//! treated as a plain conversational message and leaves the document alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::template::Template;

/// The contract the remote model is instructed to follow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    /// Section-id to new-content mapping
    #[serde(default)]
    pub updates: BTreeMap<String, String>,
    /// Conversational reply to show in the chat transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_response: Option<String>,
}

/// Errors while merging assistant updates into a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("Invalid JSON in example data update: {0}")]
    InvalidExampleData(String),
}

/// Parse a raw assistant reply into an [`AssistantResponse`].
///
/// The JSON payload is taken from the first fenced code block when one is
/// present, otherwise from the whole reply. A reply that does not yield a
/// usable payload becomes a conversational response carrying the raw text.
pub fn parse_reply(content: &str) -> AssistantResponse {
    let candidate = extract_fenced(content).unwrap_or_else(|| content.trim().to_string());

    match serde_json::from_str::<AssistantResponse>(&candidate) {
        Ok(response) if !response.updates.is_empty() || response.chat_response.is_some() => {
            response
        }
        _ => AssistantResponse {
            updates: BTreeMap::new(),
            chat_response: Some(content.trim().to_string()),
        },
    }
}

/// Extract the body of the first fenced code block (```json or bare ```)
fn extract_fenced(content: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"```(?:json)?\s*([\s\S]*?)```").unwrap();
    re.captures(content).map(|caps| caps[1].trim().to_string())
}

/// Apply per-section updates to a template.
///
/// `exampleData` entries must themselves be parseable JSON; an invalid entry
/// is rejected (prior example data retained) while the remaining entries in
/// the batch still apply. `title` entries update both the title section and
/// the document title.
pub fn apply_updates(
    template: &mut Template,
    updates: &BTreeMap<String, String>,
) -> Result<(), MergeError> {
    let mut result = Ok(());

    for (section, content) in updates {
        match section.as_str() {
            "exampleData" => match serde_json::from_str::<serde_json::Value>(content) {
                Ok(_) => template.example_data = Some(content.clone()),
                Err(e) => result = Err(MergeError::InvalidExampleData(e.to_string())),
            },
            "title" => {
                template.title = content.clone();
                template
                    .sections
                    .insert("title".to_string(), content.clone());
            }
            _ => {
                template.sections.insert(section.clone(), content.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_fenced_json_block() {
        let reply = "Here you go:\n```json\n{\"updates\": {\"title\": \"T\"}, \"chatResponse\": \"done\"}\n```";
        let response = parse_reply(reply);
        assert_eq!(response.updates.get("title").map(String::as_str), Some("T"));
        assert_eq!(response.chat_response.as_deref(), Some("done"));
    }

    #[test]
    fn test_parse_bare_fence() {
        let reply = "```\n{\"updates\": {\"code\": \"x\"}}\n```";
        let response = parse_reply(reply);
        assert_eq!(response.updates.get("code").map(String::as_str), Some("x"));
        assert!(response.chat_response.is_none());
    }

    #[test]
    fn test_parse_unfenced_json() {
        let reply = "{\"updates\": {\"html\": \"<p>hi</p>\"}}";
        let response = parse_reply(reply);
        assert_eq!(
            response.updates.get("html").map(String::as_str),
            Some("<p>hi</p>")
        );
    }

    #[test]
    fn test_non_json_reply_is_conversational() {
        let reply = "I would suggest a warmer greeting.";
        let response = parse_reply(reply);
        assert!(response.updates.is_empty());
        assert_eq!(response.chat_response.as_deref(), Some(reply));
    }

    #[test]
    fn test_json_without_contract_fields_is_conversational() {
        // The old raw-sections shape carries no `updates` key; treat it as
        // conversation rather than guessing at section names.
        let reply = "{\"title\": \"T\", \"html\": \"<p></p>\"}";
        let response = parse_reply(reply);
        assert!(response.updates.is_empty());
        assert_eq!(response.chat_response.as_deref(), Some(reply));
    }

    #[test]
    fn test_title_update_changes_only_title() {
        let mut template = Template::new_default();
        let html_before = template.section("html").to_string();

        apply_updates(&mut template, &updates(&[("title", "T")])).unwrap();

        assert_eq!(template.section("title"), "T");
        assert_eq!(template.title, "T");
        assert_eq!(template.section("html"), html_before);
    }

    #[test]
    fn test_fenced_title_update_end_to_end() {
        let mut template = Template::new_default();
        let sections_before = template.sections.clone();

        let reply = "Sure!\n```json\n{\"updates\": {\"title\": \"T\"}}\n```";
        let response = parse_reply(reply);
        apply_updates(&mut template, &response.updates).unwrap();

        assert_eq!(template.section("title"), "T");
        for (id, content) in &sections_before {
            if id != "title" {
                assert_eq!(template.sections.get(id), Some(content));
            }
        }
    }

    #[test]
    fn test_new_section_is_inserted() {
        let mut template = Template::new_default();
        apply_updates(&mut template, &updates(&[("footer", "Bye")])).unwrap();
        assert_eq!(template.section("footer"), "Bye");
    }

    #[test]
    fn test_valid_example_data_update_applies() {
        let mut template = Template::new_default();
        apply_updates(&mut template, &updates(&[("exampleData", "{\"a\":1}")])).unwrap();
        assert_eq!(template.example_data.as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_invalid_example_data_rejected_and_prior_retained() {
        let mut template = Template::new_default();
        let before = template.example_data.clone();

        let result = apply_updates(&mut template, &updates(&[("exampleData", "{broken")]));

        assert!(matches!(result, Err(MergeError::InvalidExampleData(_))));
        assert_eq!(template.example_data, before);
    }

    #[test]
    fn test_other_entries_apply_despite_bad_example_data() {
        let mut template = Template::new_default();
        let result = apply_updates(
            &mut template,
            &updates(&[("exampleData", "{broken"), ("title", "Kept")]),
        );

        assert!(result.is_err());
        assert_eq!(template.title, "Kept");
    }
}
