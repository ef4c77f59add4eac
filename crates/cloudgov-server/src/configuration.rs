use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use cloudgov::providers::configs::{
    api_key_from_env, SonarProviderConfig, SONAR_HOST, SONAR_MODEL, SONAR_SYSTEM_PROMPT,
    SONAR_TIMEOUT_SECS,
};
use config::{Config, Environment};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: default_provider_host(),
            api_key: None,
            model: default_model(),
            system_prompt: default_system_prompt(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderSettings {
    // Convert to the cloudgov SonarProviderConfig
    pub fn into_config(self) -> SonarProviderConfig {
        SonarProviderConfig {
            host: self.host,
            api_key: self.api_key,
            model: self.model,
            system_prompt: self.system_prompt,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PromptSettings {
    /// Read prompt content from this directory instead of the embedded copy
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolSettings {
    /// Also expose the cost change and startup plan tools
    #[serde(default)]
    pub governance: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub prompts: PromptSettings,
    #[serde(default)]
    pub tools: ToolSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut settings = Self::load_and_validate()?;

        // Fall back to the provider's conventional variables
        if settings.provider.api_key.as_deref().map_or(true, str::is_empty) {
            settings.provider.api_key = api_key_from_env();
        }

        Ok(settings)
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        // Start with default configuration
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            // Provider defaults
            .set_default("provider.host", default_provider_host())?
            .set_default("provider.model", default_model())?
            .set_default("provider.system_prompt", default_system_prompt())?
            .set_default("provider.timeout_secs", default_timeout_secs())?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // Handle both NotFound and missing field message variants
                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5005
}

fn default_provider_host() -> String {
    SONAR_HOST.to_string()
}

fn default_model() -> String {
    SONAR_MODEL.to_string()
}

fn default_system_prompt() -> String {
    SONAR_SYSTEM_PROMPT.to_string()
}

fn default_timeout_secs() -> u64 {
    SONAR_TIMEOUT_SECS
}
