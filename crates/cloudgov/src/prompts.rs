use include_dir::{include_dir, Dir};
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::{PromptError, PromptResult};
use crate::models::prompt::Prompt;

static BUILTIN_PROMPTS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/prompts");

pub const GOVERNANCE_GUIDE: &str = "governance_guide";

#[derive(Debug, Clone)]
struct PromptEntry {
    id: String,
    title: String,
    file: String,
}

#[derive(Debug, Clone)]
enum PromptSource {
    /// Content compiled into the binary
    Embedded(&'static Dir<'static>),
    /// Content read from disk on every load
    Directory(PathBuf),
}

/// Static reference content, keyed by id, listed for discovery
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    source: PromptSource,
    entries: Vec<PromptEntry>,
}

impl PromptRegistry {
    /// The governance guide, served from the embedded copy
    pub fn builtin() -> Self {
        Self::with_default_entries(PromptSource::Embedded(&BUILTIN_PROMPTS))
    }

    /// The same prompts as [`PromptRegistry::builtin`], read from files in `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_default_entries(PromptSource::Directory(dir.into()))
    }

    fn with_default_entries(source: PromptSource) -> Self {
        let mut registry = Self {
            source,
            entries: Vec::new(),
        };
        registry.register(GOVERNANCE_GUIDE, "Governance Guide", "governance.md");
        registry
    }

    /// Register a prompt backed by `file`; a later registration of the same id replaces it
    pub fn register(&mut self, id: &str, title: &str, file: &str) {
        let entry = PromptEntry {
            id: id.to_string(),
            title: title.to_string(),
            file: file.to_string(),
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Load every registered prompt, in registration order
    pub async fn list(&self) -> PromptResult<Vec<Prompt>> {
        let mut prompts = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            prompts.push(self.load(entry).await?);
        }
        Ok(prompts)
    }

    pub async fn get(&self, id: &str) -> PromptResult<Prompt> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| PromptError::NotFound(id.to_string()))?;
        self.load(entry).await
    }

    async fn load(&self, entry: &PromptEntry) -> PromptResult<Prompt> {
        let content = match &self.source {
            PromptSource::Embedded(dir) => dir
                .get_file(&entry.file)
                .and_then(|file| file.contents_utf8())
                .map(String::from)
                .ok_or_else(|| PromptError::NotFound(entry.id.clone()))?,
            PromptSource::Directory(dir) => {
                match tokio::fs::read_to_string(dir.join(&entry.file)).await {
                    Ok(content) => content,
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        return Err(PromptError::NotFound(entry.id.clone()))
                    }
                    Err(source) => {
                        return Err(PromptError::Read {
                            id: entry.id.clone(),
                            source,
                        })
                    }
                }
            }
        };

        Ok(Prompt::new(&entry.id, &entry.title, content))
    }
}
