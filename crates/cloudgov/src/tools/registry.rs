use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use super::builtin::{cost_change_summary, cost_summary, infra_risks, startup_plan};
use super::Tool;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::{ToolInfo, ToolOutput};
use crate::providers::base::Provider;

/// The set of tools exposed to clients, in registration order
pub struct ToolRegistry {
    provider: Arc<dyn Provider>,
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry whose tools will run against `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            tools: Vec::new(),
        }
    }

    /// The cost summary and infra risk tools
    pub fn builtin(provider: Arc<dyn Provider>) -> Self {
        let mut registry = Self::new(provider);
        registry.tools.push(Box::new(cost_summary()));
        registry.tools.push(Box::new(infra_risks()));
        registry
    }

    /// Add the cost change and startup plan tools
    pub fn register_governance_tools(&mut self) -> ToolResult<()> {
        self.register(cost_change_summary())?;
        self.register(startup_plan())
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> ToolResult<()> {
        if self.get(tool.id()).is_some() {
            return Err(ToolError::Duplicate(tool.id().to_string()));
        }
        self.tools.push(Box::new(tool));
        Ok(())
    }

    pub fn list(&self) -> Vec<ToolInfo> {
        self.tools.iter().map(|tool| tool.info().clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.id() == id)
            .map(|tool| &**tool)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the tool registered under `id`
    pub async fn invoke(&self, id: &str, input: &Value) -> ToolResult<ToolOutput> {
        let tool = self
            .get(id)
            .ok_or_else(|| ToolError::NotFound(id.to_string()))?;

        info!(tool = id, "invoking tool");
        tool.run(self.provider.as_ref(), input).await.map_err(|e| {
            error!("Tool '{}' error: {}", id, e);
            e
        })
    }
}
