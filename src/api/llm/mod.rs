pub mod client;
pub mod models;

pub use client::{ChatCompletionsClient, ChatModel};
pub use models::{ChatMessage, LlmError, Role, ToolSpec};
