use std::fmt;
use std::time::Duration;

pub const SONAR_HOST: &str = "https://api.perplexity.ai";
pub const SONAR_MODEL: &str = "sonar-pro";
pub const SONAR_SYSTEM_PROMPT: &str = "You are a concise, trusted cloud governance assistant.";
pub const SONAR_TIMEOUT_SECS: u64 = 30;

/// Environment variables that may hold the Sonar credential, in lookup order
pub const API_KEY_ENV_VARS: [&str; 2] = ["PERPLEXITY_API_KEY", "SONAR_API_KEY"];

#[derive(Clone)]
pub struct SonarProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub timeout: Duration,
}

impl SonarProviderConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            host: SONAR_HOST.to_string(),
            api_key,
            model: SONAR_MODEL.to_string(),
            system_prompt: SONAR_SYSTEM_PROMPT.to_string(),
            timeout: Duration::from_secs(SONAR_TIMEOUT_SECS),
        }
    }

    /// Default config with the credential taken from the first of [`API_KEY_ENV_VARS`] set
    pub fn from_env() -> Self {
        Self::new(api_key_from_env())
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for SonarProviderConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

// The credential must never reach the logs
impl fmt::Debug for SonarProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SonarProviderConfig")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|key| !key.is_empty()))
}
