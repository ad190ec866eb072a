//! UI components for Mailsmith

pub mod chat;
pub mod example_data;
pub mod preview;
pub mod sections;
pub mod settings;
