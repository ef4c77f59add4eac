use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;
use crate::providers::base::Provider;

/// A mock provider that answers every call with a fixed reply and records what it was sent
#[derive(Clone, Default)]
pub struct MockProvider {
    reply: String,
    fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new<S: Into<String>>(reply: S) -> Self {
        Self {
            reply: reply.into(),
            ..Default::default()
        }
    }

    /// A provider whose every call fails with a remote call error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, prompt: String) -> ProviderResult<()> {
        self.prompts.lock().unwrap().push(prompt);
        if self.fail {
            Err(ProviderError::RemoteCall("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete_raw(&self, messages: &[Message]) -> ProviderResult<Value> {
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.record(last)?;
        Ok(json!({
            "choices": [{"message": {"role": "assistant", "content": self.reply}}]
        }))
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        self.record(prompt.to_string())?;
        Ok(self.reply.clone())
    }
}
