use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LlmError, ToolSpec};
use tracing::{debug, warn};

/// Upper bound on provider error bodies kept in [`LlmError::Api`]
const MAX_ERROR_BODY: usize = 200;

/// A hosted model that can answer a conversation, optionally asking for tool calls
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the conversation so far and return the assistant's next message
    async fn complete(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ChatMessage, LlmError>;
}

/// Client for any OpenAI-compatible `chat/completions` endpoint
pub struct ChatCompletionsClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn create_headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| LlmError::Request(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }
}

#[async_trait]
impl ChatModel for ChatCompletionsClient {
    async fn complete(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ChatMessage, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            tools,
        };
        debug!(model = %self.model, messages = messages.len(), tools = tools.len(), "requesting chat completion");

        let response = self.http_client
            .post(&url)
            .headers(self.create_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Auth failure bodies can echo key fragments, keep them out of logs and replies
            let message = if status.as_u16() == 401 || status.as_u16() == 403 {
                format!("authentication failed (HTTP {})", status.as_u16())
            } else {
                match response.text().await {
                    Ok(body) => summarize_body(&body),
                    Err(e) => format!("<body read error: {}>", e),
                }
            };
            warn!(status = status.as_u16(), "chat completion failed");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyChoices)?;
        debug!(finish_reason = ?choice.finish_reason, tool_calls = choice.message.tool_calls.len(), "chat completion received");

        Ok(choice.message)
    }
}

fn summarize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}
