use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Prompt,
}

/// Static reference content exposed for discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    #[serde(rename = "type")]
    pub prompt_type: PromptType,
    pub title: String,
    pub content: String,
}

impl Prompt {
    pub fn new<I, T, C>(id: I, title: T, content: C) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        C: Into<String>,
    {
        Prompt {
            id: id.into(),
            prompt_type: PromptType::Prompt,
            title: title.into(),
            content: content.into(),
        }
    }
}
