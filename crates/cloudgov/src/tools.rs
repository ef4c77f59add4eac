use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ToolResult;
use crate::models::tool::{ToolInfo, ToolOutput};
use crate::providers::base::Provider;

pub mod builtin;
pub mod registry;

pub use builtin::PromptTool;
pub use registry::ToolRegistry;

/// A named capability that turns arbitrary input into an answer from the provider
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the public description of the tool
    fn info(&self) -> &ToolInfo;

    fn id(&self) -> &str {
        &self.info().id
    }

    /// Run the tool against the given provider
    async fn run(&self, provider: &dyn Provider, input: &Value) -> ToolResult<ToolOutput>;
}
