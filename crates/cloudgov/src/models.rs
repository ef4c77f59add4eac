//! These models represent the objects passed between the HTTP surface, the registries
//! and the completion provider
//!
//! Messages go out to the provider in the chat-completion shape unchanged, so the
//! internal message struct doubles as the wire format. Tool and prompt descriptors are
//! what the listing endpoints return.
pub mod message;
pub mod prompt;
pub mod role;
pub mod tool;
