use thiserror::Error;

/// Failures of a single call to the completion provider
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No credential was configured, nothing was sent
    #[error("Missing {0}")]
    MissingCredential(String),

    /// Transport failure or a non-2xx status from the provider
    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    /// The provider answered with something we could not interpret
    #[error("Invalid response format: {0}")]
    ResponseFormat(String),
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool not found")]
    NotFound(String),

    #[error("Tool '{0}' is already registered")]
    Duplicate(String),

    #[error("Tool '{id}' could not render its prompt: {source}")]
    Template {
        id: String,
        #[source]
        source: tera::Error,
    },

    #[error("Tool '{id}' failed: {source}")]
    Execution {
        id: String,
        #[source]
        source: ProviderError,
    },
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt '{0}' not found")]
    NotFound(String),

    #[error("Failed to read prompt '{id}': {source}")]
    Read {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ProviderResult<T> = Result<T, ProviderError>;
pub type ToolResult<T> = Result<T, ToolError>;
pub type PromptResult<T> = Result<T, PromptError>;
