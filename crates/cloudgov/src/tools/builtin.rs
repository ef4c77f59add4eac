use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;

use super::Tool;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::{ToolInfo, ToolOutput};
use crate::prompt_template::{input_context, render_prompt};
use crate::providers::base::Provider;

pub const COST_SUMMARY: &str = "get_cost_summary";
pub const INFRA_RISKS: &str = "get_infra_risks";
pub const COST_CHANGE_SUMMARY: &str = "get_cost_change_summary";
pub const STARTUP_PLAN: &str = "get_startup_plan";

/// A tool that fills a fixed template with its input and asks the provider about it
pub struct PromptTool {
    info: ToolInfo,
    template: Cow<'static, str>,
}

impl PromptTool {
    pub fn new(info: ToolInfo, template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            info,
            template: template.into(),
        }
    }

    /// Render the prompt that would be sent for this input
    pub fn prompt(&self, input: &Value) -> ToolResult<String> {
        render_prompt(&self.template, &input_context(input)).map_err(|source| {
            ToolError::Template {
                id: self.info.id.clone(),
                source,
            }
        })
    }
}

#[async_trait]
impl Tool for PromptTool {
    fn info(&self) -> &ToolInfo {
        &self.info
    }

    async fn run(&self, provider: &dyn Provider, input: &Value) -> ToolResult<ToolOutput> {
        let prompt = self.prompt(input)?;
        let answer = provider
            .complete(&prompt)
            .await
            .map_err(|source| ToolError::Execution {
                id: self.info.id.clone(),
                source,
            })?;
        Ok(ToolOutput::new(answer))
    }
}

pub fn cost_summary() -> PromptTool {
    PromptTool::new(
        ToolInfo::new(
            COST_SUMMARY,
            "Get Cloud Cost Summary",
            "Summarizes AWS cost using Perplexity Sonar",
        ),
        include_str!("../../templates/cost_summary.md"),
    )
}

pub fn infra_risks() -> PromptTool {
    PromptTool::new(
        ToolInfo::new(
            INFRA_RISKS,
            "Detect Infra Risks",
            "Analyzes AWS infra for risks using Sonar",
        ),
        include_str!("../../templates/infra_risks.md"),
    )
}

/// Expects `{"before": .., "after": ..}`
pub fn cost_change_summary() -> PromptTool {
    PromptTool::new(
        ToolInfo::new(
            COST_CHANGE_SUMMARY,
            "Summarize Cost Changes",
            "Compares two AWS cost reports and highlights what changed",
        ),
        include_str!("../../templates/cost_change_summary.md"),
    )
}

/// Expects `{"budget_usd": ..}`
pub fn startup_plan() -> PromptTool {
    PromptTool::new(
        ToolInfo::new(
            STARTUP_PLAN,
            "Plan Startup Infrastructure",
            "Proposes an AWS setup and budget breakdown for a monthly budget",
        ),
        include_str!("../../templates/startup_plan.md"),
    )
}
