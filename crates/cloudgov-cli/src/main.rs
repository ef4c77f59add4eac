mod inputs;

use anyhow::{Context, Result};
use bat::PrettyPrinter;
use clap::{Parser, Subcommand};
use cliclack::spinner;
use console::style;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

use cloudgov::prompts::PromptRegistry;
use cloudgov::providers::base::Provider;
use cloudgov::providers::configs::{api_key_from_env, SonarProviderConfig, SONAR_HOST, SONAR_MODEL};
use cloudgov::providers::sonar::SonarProvider;
use cloudgov::tools::builtin::{COST_CHANGE_SUMMARY, COST_SUMMARY, INFRA_RISKS, STARTUP_PLAN};
use cloudgov::tools::ToolRegistry;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sonar API Key (can also be set via PERPLEXITY_API_KEY or SONAR_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Sonar API host
    #[arg(long, global = true, default_value = SONAR_HOST)]
    host: String,

    /// Model to use
    #[arg(short, long, global = true, default_value = SONAR_MODEL)]
    model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a free-form governance question
    Ask { question: String },
    /// Summarize AWS cost data and suggest optimizations
    CostSummary {
        /// JSON or text file with cost data, `-` for stdin
        file: PathBuf,
    },
    /// Review an AWS infrastructure snapshot for security and cost risks
    InfraRisks {
        /// JSON or text file with the snapshot, `-` for stdin
        file: PathBuf,
    },
    /// Compare two AWS cost reports
    CostChange { before: PathBuf, after: PathBuf },
    /// Propose an AWS setup for a monthly budget in USD
    StartupPlan { budget_usd: u32 },
    /// List the available tools
    Tools,
    /// Print the governance prompts
    Prompts,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let api_key = cli.api_key.clone().or_else(api_key_from_env);
    let config = SonarProviderConfig::new(api_key)
        .with_host(&cli.host)
        .with_model(&cli.model);
    let provider: Arc<dyn Provider> = Arc::new(SonarProvider::new(config)?);

    let mut tools = ToolRegistry::builtin(provider.clone());
    tools.register_governance_tools()?;

    match cli.command {
        Command::Ask { question } => {
            let answer = with_spinner(provider.complete(&question)).await?;
            render(&answer);
        }
        Command::CostSummary { file } => {
            run_tool(&tools, COST_SUMMARY, inputs::read_input(&file)?).await?;
        }
        Command::InfraRisks { file } => {
            run_tool(&tools, INFRA_RISKS, inputs::read_input(&file)?).await?;
        }
        Command::CostChange { before, after } => {
            let input = json!({
                "before": inputs::read_input(&before)?,
                "after": inputs::read_input(&after)?,
            });
            run_tool(&tools, COST_CHANGE_SUMMARY, input).await?;
        }
        Command::StartupPlan { budget_usd } => {
            run_tool(&tools, STARTUP_PLAN, json!({ "budget_usd": budget_usd })).await?;
        }
        Command::Tools => {
            for tool in tools.list() {
                println!(
                    "{} {}\n  {}",
                    style(&tool.id).bold().green(),
                    style(format!("({})", tool.title)).dim(),
                    tool.description
                );
            }
        }
        Command::Prompts => {
            for prompt in PromptRegistry::builtin().list().await? {
                println!("{}", style(&prompt.title).bold().green());
                render(&prompt.content);
            }
        }
    }

    Ok(())
}

async fn run_tool(tools: &ToolRegistry, id: &str, input: Value) -> Result<()> {
    let output = with_spinner(tools.invoke(id, &input))
        .await
        .with_context(|| format!("running {}", id))?;
    render(&output.result);
    Ok(())
}

async fn with_spinner<T, E>(call: impl std::future::Future<Output = Result<T, E>>) -> Result<T, E> {
    let spin = spinner();
    spin.start("awaiting reply");
    let result = call.await;
    spin.stop("");
    result
}

fn render(content: &str) {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .unwrap_or_else(|_| {
            println!("{}", content);
            true
        });
    println!();
}
