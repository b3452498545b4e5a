//! Completion-API access for intent resolution

pub mod client;

pub use client::{CompletionClient, LlmClient};
