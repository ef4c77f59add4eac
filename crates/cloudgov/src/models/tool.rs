use serde::{Deserialize, Serialize};

/// The public description of a tool, as listed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Unique identifier used to invoke the tool
    pub id: String,
    /// Human readable name
    pub title: String,
    /// What the tool does
    pub description: String,
}

impl ToolInfo {
    pub fn new<I, T, D>(id: I, title: T, description: D) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        ToolInfo {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The result of running a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub result: String,
}

impl ToolOutput {
    pub fn new<S: Into<String>>(result: S) -> Self {
        ToolOutput {
            result: result.into(),
        }
    }
}
