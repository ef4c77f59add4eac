mod configuration;
mod error;
mod routes;
mod state;

use cloudgov::prompts::PromptRegistry;
use cloudgov::providers::base::Provider;
use cloudgov::providers::sonar::SonarProvider;
use cloudgov::tools::ToolRegistry;
use configuration::Settings;
use state::AppState;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading any configuration
    if let Ok(path) = dotenv::dotenv() {
        println!("Loaded environment from {:?}", path);
    }

    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let settings = Settings::new()?;
    let addr = settings.server.socket_addr()?;

    if settings.provider.api_key.is_none() {
        warn!("no Sonar API key configured, /query and /tool/:id will fail until one is set");
    }

    let provider: Arc<dyn Provider> = Arc::new(SonarProvider::new(settings.provider.into_config())?);

    let mut tools = ToolRegistry::builtin(provider.clone());
    if settings.tools.governance {
        tools.register_governance_tools()?;
    }

    let prompts = match settings.prompts.dir {
        Some(dir) => {
            info!("serving prompts from {}", dir.display());
            PromptRegistry::from_dir(dir)
        }
        None => PromptRegistry::builtin(),
    };

    info!("registered {} tools", tools.len());
    let app = routes::configure(AppState::new(provider, tools, prompts));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("cloudgov server ready at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
