use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ProviderResult;
use crate::models::message::Message;

/// Base trait for chat-completion providers
///
/// Each call is independent: one request, at most one delivery attempt, no state kept
/// between calls.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send a conversation as-is and return the provider's response body untouched
    async fn complete_raw(&self, messages: &[Message]) -> ProviderResult<Value>;

    /// Ask a single question and return the assistant's text answer
    async fn complete(&self, prompt: &str) -> ProviderResult<String>;
}
