use cloudgov::prompts::PromptRegistry;
use cloudgov::providers::base::Provider;
use cloudgov::tools::ToolRegistry;
use std::sync::Arc;

/// Shared application state, built once at startup and read-only afterwards
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn Provider>,
    pub tools: Arc<ToolRegistry>,
    pub prompts: Arc<PromptRegistry>,
}

impl AppState {
    pub fn new(provider: Arc<dyn Provider>, tools: ToolRegistry, prompts: PromptRegistry) -> Self {
        Self {
            provider,
            tools: Arc::new(tools),
            prompts: Arc::new(prompts),
        }
    }
}
