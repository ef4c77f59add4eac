pub mod errors;
pub mod models;
pub mod prompt_template;
pub mod prompts;
pub mod providers;
pub mod tools;
