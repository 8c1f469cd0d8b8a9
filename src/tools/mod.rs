//! Tools the model can invoke during an agent run
//!
//! A tool is an explicit capability: a name, a description, a JSON schema for
//! its arguments and an async `invoke`. The agent advertises every registered
//! tool to the model and dispatches the model's tool calls through
//! [`ToolRegistry::invoke`], which always produces text for the model.

pub mod crypto_price;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use crate::api::llm::models::{FunctionSpec, ToolSpec};

pub use crypto_price::CryptoPriceTool;

#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Tells the model when and how to call this tool
    fn description(&self) -> &str;

    /// JSON schema of the argument object
    fn parameters(&self) -> Value;

    /// Run the tool; the returned text is handed back to the model as-is
    async fn invoke(&self, args: Value) -> Result<String, ToolError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            kind: "function".to_string(),
            function: FunctionSpec {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters(),
            },
        }
    }
}

/// Deserialize a tool's argument object into its typed form
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// The set of tools offered to the model
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(Box::new(tool));
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Dispatch a model tool call. `arguments` is the raw JSON string the model sent.
    ///
    /// Unknown tools, unparsable arguments and tool errors are rendered as text
    /// so the model can explain them instead of the run failing.
    pub async fn invoke(&self, name: &str, arguments: &str) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            warn!(tool = name, "model requested an unknown tool");
            return format!("❌ Unknown tool '{}'", name);
        };

        let args: Value = if arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str(arguments) {
                Ok(args) => args,
                Err(e) => {
                    warn!(tool = name, error = %e, "malformed tool arguments");
                    return format!("❌ Tool '{}' failed: invalid arguments: {}", name, e);
                }
            }
        };

        debug!(tool = name, %args, "invoking tool");
        match tool.invoke(args).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                format!("❌ Tool '{}' failed: {}", name, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    struct EchoTool;

    #[derive(Deserialize)]
    struct EchoArgs {
        text: String,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the text back"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })
        }

        async fn invoke(&self, args: Value) -> Result<String, ToolError> {
            let args: EchoArgs = parse_args(args)?;
            if args.text == "boom" {
                return Err(ToolError::InvalidArguments("boom is not allowed".to_string()));
            }
            Ok(args.text)
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry
    }

    #[test]
    fn test_specs_describe_tools() {
        let specs = registry().specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].kind, "function");
        assert_eq!(specs[0].function.name, "echo");
        assert_eq!(specs[0].function.parameters["required"], json!(["text"]));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = registry();
        registry.register(EchoTool);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_success() {
        assert_eq!(registry().invoke("echo", r#"{"text":"hi"}"#).await, "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_rendered() {
        assert_eq!(registry().invoke("nope", "{}").await, "❌ Unknown tool 'nope'");
    }

    #[tokio::test]
    async fn test_bad_arguments_rendered() {
        let registry = registry();

        let not_json = registry.invoke("echo", "{text").await;
        assert!(not_json.starts_with("❌ Tool 'echo' failed: invalid arguments"), "{not_json}");

        let missing_field = registry.invoke("echo", "").await;
        assert!(missing_field.contains("missing field `text`"), "{missing_field}");
    }

    #[tokio::test]
    async fn test_tool_error_rendered() {
        assert_eq!(
            registry().invoke("echo", r#"{"text":"boom"}"#).await,
            "❌ Tool 'echo' failed: invalid arguments: boom is not allowed"
        );
    }
}
