//! Client for Groq's OpenAI-compatible chat-completions endpoint.

use crate::domain::model::CompletionRequest;
use crate::domain::ports::ChatModel;
use crate::utils::error::{Result, TutorError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone)]
pub struct GroqSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Extra attempts after the first one for retryable failures.
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl GroqSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
            retry_attempts: 2,
            retry_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct GroqClient {
    client: Client,
    settings: GroqSettings,
}

impl GroqClient {
    pub fn new(settings: GroqSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("LLM API response status: {}", status);

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|b| b.error.message)
                .unwrap_or(raw);
            return Err(TutorError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(TutorError::EmptyCompletion)
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.send_once(request).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() && attempt < self.settings.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "⚠️ LLM request failed ({}), retrying {}/{} in {:?}",
                        e,
                        attempt,
                        self.settings.retry_attempts,
                        self.settings.retry_delay
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
