use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tera::{Context, Error as TeraError, Tera};

use crate::providers::utils::input_to_text;

/// Render a raw Tera template with the given context
pub fn render_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

/// Build the template context for a tool input
///
/// `input` always holds the whole input as text. When the input is an object, each
/// top-level field is also available under its own name.
pub fn input_context(input: &Value) -> HashMap<String, String> {
    let mut context = HashMap::new();
    if let Value::Object(fields) = input {
        for (key, value) in fields {
            context.insert(key.clone(), input_to_text(value));
        }
    }
    context.insert("input".to_string(), input_to_text(input));
    context
}
