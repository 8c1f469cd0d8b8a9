use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::api::llm::{ChatMessage, ChatModel, LlmError, Role, ToolSpec};
use crate::tools::ToolRegistry;

/// System prompt for the crypto assistant
pub const CRYPTO_AGENT_INSTRUCTIONS: &str = "You are a crypto assistant.

When the user asks for a coin price (e.g. BTC, ETH, SOL), use the `get_crypto_price` tool with the coin's ticker.

Assume the user always means the USDT pair (BTC -> BTCUSDT). Never ask which exchange; Binance is always used.
If the tool reports a failure, tell the user the price could not be fetched and why, in one short sentence.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Message is empty")]
    EmptyInput,
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("Model returned an empty reply")]
    EmptyReply,
    #[error("Gave up after {0} model turns without a final answer")]
    MaxTurnsExceeded(usize),
    #[error("Agent run timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Drives one conversation turn: model -> tool calls -> model ... -> final text
pub struct CryptoAgent {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    instructions: String,
    max_turns: usize,
    timeout: Duration,
}

impl CryptoAgent {
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolRegistry, max_turns: usize, timeout: Duration) -> Self {
        Self {
            model,
            tools,
            instructions: CRYPTO_AGENT_INSTRUCTIONS.to_string(),
            max_turns,
            timeout,
        }
    }

    /// Answer a single user message. No history is carried between calls.
    pub async fn run(&self, input: &str) -> Result<String, AgentError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AgentError::EmptyInput);
        }

        match tokio::time::timeout(self.timeout, self.run_turns(input)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "agent run timed out");
                Err(AgentError::Timeout(self.timeout))
            }
        }
    }

    async fn run_turns(&self, input: &str) -> Result<String, AgentError> {
        let specs: Vec<ToolSpec> = self.tools.specs();
        let mut messages = vec![
            ChatMessage::system(self.instructions.clone()),
            ChatMessage::user(input),
        ];

        for turn in 1..=self.max_turns {
            let reply = self.model.complete(&messages, &specs).await?;

            if reply.tool_calls.is_empty() {
                let text = reply.content.unwrap_or_default();
                if text.trim().is_empty() {
                    return Err(AgentError::EmptyReply);
                }
                info!(turn, "agent produced final reply");
                return Ok(text);
            }

            debug!(turn, calls = reply.tool_calls.len(), "model requested tool calls");
            let calls = reply.tool_calls.clone();
            messages.push(ChatMessage {
                role: Role::Assistant,
                ..reply
            });

            for call in calls {
                let output = self.tools.invoke(&call.function.name, &call.function.arguments).await;
                messages.push(ChatMessage::tool_result(call.id, output));
            }
        }

        warn!(max_turns = self.max_turns, "agent exceeded turn limit");
        Err(AgentError::MaxTurnsExceeded(self.max_turns))
    }
}
