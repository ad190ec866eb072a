//! AI assistant integration: wire client, reply parsing, and chat session state

pub mod client;
pub mod parse;

pub use client::{AssistantClient, AssistantError, ChatMessage};
pub use parse::{apply_updates, parse_reply, AssistantResponse, MergeError};

/// Who authored a chat transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the chat transcript
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
}

/// Result of a completed assistant round trip, delivered to the UI thread
/// over the app's event channel
#[derive(Debug)]
pub enum AssistantEvent {
    Completed(Result<String, AssistantError>),
}

/// In-memory chat session; not persisted across runs
#[derive(Debug, Default)]
pub struct ChatSession {
    /// Transcript in arrival order
    pub entries: Vec<ChatEntry>,
    /// Whether a request is currently in flight
    pub pending: bool,
}

impl ChatSession {
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(ChatEntry {
            role: ChatRole::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.entries.push(ChatEntry {
            role: ChatRole::Assistant,
            content: content.into(),
        });
    }
}
