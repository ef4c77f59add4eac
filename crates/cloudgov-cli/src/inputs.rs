use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read tool input from a file, or stdin for `-`
///
/// JSON content is passed on as JSON, anything else as a plain string.
pub fn read_input(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading input from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading input from {}", path.display()))?
    };

    Ok(parse_input(&text))
}

fn parse_input(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
