//! HTTP client for the chat-completions assistant endpoint

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::settings::Settings;
use crate::core::template::Template;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Request timeout for assistant calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the assistant round trip
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("Request timeout - the API took too long to respond")]
    Timeout,
    #[error("Connection error - unable to reach the API")]
    Connection,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed - check your API key")]
    Unauthorized,
    #[error("Access forbidden - insufficient permissions")]
    Forbidden,
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse API response: {0}")]
    Malformed(String),
    #[error("API returned an empty response")]
    Empty,
}

/// One message in a chat-completions conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// Response body from the chat-completions endpoint
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Build the message list for an assistant request from the current document
/// state and the user instruction
pub fn build_messages(settings: &Settings, template: &Template, input: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(&settings.system_prompt)];

    if let Some(prompt) = settings.thought_process() {
        messages.push(ChatMessage::user(prompt));
    }
    if let Some(example) = settings.example() {
        messages.push(ChatMessage::user(format!(
            "Example template for reference:\n{example}"
        )));
    }

    let sections = serde_json::to_string_pretty(&template.sections)
        .unwrap_or_else(|_| "{}".to_string());
    let example_data = template.example_data.as_deref().unwrap_or("{}");
    messages.push(ChatMessage::user(format!(
        "Current template:\n{sections}\n\nExample data:\n{example_data}\n\nUser request: {input}"
    )));

    messages
}

/// Thin client around the chat-completions API
pub struct AssistantClient {
    client: Client,
    endpoint: String,
}

impl AssistantClient {
    /// Client against the default endpoint
    pub fn new() -> Result<Self, AssistantError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Client against an explicit endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AssistantError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Send the current document state plus a user instruction and return the
    /// assistant's raw reply text
    pub async fn complete(
        &self,
        settings: &Settings,
        template: &Template,
        input: &str,
    ) -> Result<String, AssistantError> {
        if settings.api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        let request = ChatRequest {
            model: settings.model.clone(),
            messages: build_messages(settings, template, input),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", settings.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else if e.is_connect() {
                    AssistantError::Connection
                } else {
                    AssistantError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 => AssistantError::Unauthorized,
                403 => AssistantError::Forbidden,
                429 => AssistantError::RateLimited,
                _ => AssistantError::Http {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AssistantError::Malformed(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or(AssistantError::Empty)?;
        if content.trim().is_empty() {
            return Err(AssistantError::Empty);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_messages_order() {
        let mut settings = Settings::default();
        settings.example_template = Some("<p>example</p>".to_string());
        let template = Template::new_default();

        let messages = build_messages(&settings, &template, "make it festive");
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[2].content.contains("<p>example</p>"));
        assert!(messages[3].content.contains("Current template:"));
        assert!(messages[3].content.contains("User request: make it festive"));
    }

    #[test]
    fn test_build_messages_skips_absent_prompts() {
        let mut settings = Settings::default();
        settings.thought_process_prompt = None;
        settings.example_template = None;
        let template = Template::new_default();

        let messages = build_messages(&settings, &template, "hi");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_request_includes_example_data() {
        let settings = Settings::default();
        let mut template = Template::new_default();
        template.example_data = Some(r#"{"city":"Oslo"}"#.to_string());

        let messages = build_messages(&settings, &template, "hi");
        let last = messages.last().unwrap();
        assert!(last.content.contains(r#"{"city":"Oslo"}"#));
    }
}
