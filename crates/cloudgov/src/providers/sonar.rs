use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::base::Provider;
use super::configs::{SonarProviderConfig, API_KEY_ENV_VARS};
use super::utils::response_text;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

/// Client for the Perplexity Sonar chat-completion API
pub struct SonarProvider {
    client: Client,
    config: SonarProviderConfig,
}

impl SonarProvider {
    pub fn new(config: SonarProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SonarProviderConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn post(&self, payload: Value) -> ProviderResult<Value> {
        // Checked before anything touches the network
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            error!("Sonar call rejected, no API key configured");
            ProviderError::MissingCredential(API_KEY_ENV_VARS[0].to_string())
        })?;

        let url = format!(
            "{}/chat/completions",
            self.config.host.trim_end_matches('/')
        );
        debug!(%url, model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Sonar request failed: {}", e);
                ProviderError::RemoteCall(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Sonar response body: {}", e);
            ProviderError::RemoteCall(e.to_string())
        })?;

        if !status.is_success() {
            error!("Sonar returned {}: {}", status, body);
            return Err(ProviderError::RemoteCall(format!(
                "Request failed: {}\nBody: {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Sonar response is not valid JSON: {}", e);
            ProviderError::ResponseFormat(e.to_string())
        })
    }
}

#[async_trait]
impl Provider for SonarProvider {
    async fn complete_raw(&self, messages: &[Message]) -> ProviderResult<Value> {
        let payload = json!({
            "model": self.config.model,
            "messages": messages,
        });

        self.post(payload).await
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let messages = [
            Message::system(self.config.system_prompt.as_str()),
            Message::user(prompt),
        ];

        let response = self.complete_raw(&messages).await?;
        response_text(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer, api_key: Option<&str>) -> SonarProvider {
        let config = SonarProviderConfig::new(api_key.map(String::from)).with_host(server.uri());
        SonarProvider::new(config).unwrap()
    }

    fn completion_body(text: &str) -> Value {
        json!({
            "id": "sonar-123",
            "model": "sonar-pro",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "citations": ["https://docs.aws.amazon.com/"]
        })
    }

    #[tokio::test]
    async fn test_complete_raw_passes_body_through() -> Result<()> {
        let mock_server = MockServer::start().await;
        let response_body = completion_body("Hello from Sonar");
        let messages = vec![Message::user("Hello?")];

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test_api_key"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({
                "model": "sonar-pro",
                "messages": [{"role": "user", "content": "Hello?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, Some("test_api_key"));
        let response = provider.complete_raw(&messages).await?;

        assert_eq!(response, response_body);
        Ok(())
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_json(json!({
                "model": "sonar-pro",
                "messages": [
                    {"role": "system", "content": "You are a concise, trusted cloud governance assistant."},
                    {"role": "user", "content": "Which S3 buckets are public?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("None.")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, Some("test_api_key"));
        let answer = provider.complete("Which S3 buckets are public?").await?;

        assert_eq!(answer, "None.");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_credential_skips_network() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, None);

        let err = provider.complete("anything").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential(_)));
        assert_eq!(err.to_string(), "Missing PERPLEXITY_API_KEY");

        let err = provider
            .complete_raw(&[Message::user("anything")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_remote_call_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, Some("bad_key"));
        match provider.complete_raw(&[Message::user("hi")]).await {
            Err(ProviderError::RemoteCall(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid api key"));
            }
            other => panic!("Expected RemoteCall error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, Some("test_api_key"));
        let result = provider.complete("hi").await;
        assert!(matches!(result, Err(ProviderError::RemoteCall(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_response_format_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, Some("test_api_key"));
        let result = provider.complete_raw(&[Message::user("hi")]).await;
        assert!(matches!(result, Err(ProviderError::ResponseFormat(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_remote_call_error() {
        let config = SonarProviderConfig::new(Some("test_api_key".to_string()))
            .with_host("http://127.0.0.1:1");
        let provider = SonarProvider::new(config).unwrap();

        let result = provider.complete("hi").await;
        assert!(matches!(result, Err(ProviderError::RemoteCall(_))));
    }
}
