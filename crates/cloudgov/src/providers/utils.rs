use serde_json::Value;

use crate::errors::{ProviderError, ProviderResult};

/// Render arbitrary JSON input as prompt text: strings verbatim, anything else JSON-encoded
pub fn input_to_text(input: &Value) -> String {
    match input {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Pull the assistant's answer out of a chat-completion response body
pub fn response_text(response: &Value) -> ProviderResult<String> {
    if let Some(error) = response.get("error") {
        return Err(ProviderError::RemoteCall(format!("Sonar API error: {}", error)));
    }

    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(String::from)
        .ok_or_else(|| {
            ProviderError::ResponseFormat("No message content in response".to_string())
        })
}
