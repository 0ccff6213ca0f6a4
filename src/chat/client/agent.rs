use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::context::{ChatMessage, MessageRole};

use super::providers::ClientConfig;

/// Prefix of the assistant text stored in place of a reply when the upstream call fails.
pub const UPSTREAM_ERROR_PREFIX: &str = "Error al contactar la API: ";

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(String),
    #[error("Error code: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
    #[error("completion response contained no choices")]
    EmptyChoices,
}

/// Anything that can turn an ordered transcript into the text of one reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        client: &ClientConfig,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, UpstreamError>;
}

/// Sends the transcript and logs how it went; never retries.
pub async fn invoke(
    backend: &dyn CompletionBackend,
    client: &ClientConfig,
    messages: &[ChatMessage],
    max_tokens: u32,
) -> Result<String, UpstreamError> {
    log::debug!(
        "sending {} messages via {} route (max_tokens={max_tokens})",
        messages.len(),
        client.route.kind()
    );

    let result = backend.complete(client, messages, max_tokens).await;

    if let Err(why) = &result {
        log::warn!("completion via {} route failed: {why}", client.route.kind());
    }

    result
}

/// Renders a completion outcome the way it is stored and shown: failures become assistant text.
pub fn flatten(result: Result<String, UpstreamError>) -> String {
    match result {
        Ok(text) => text,
        Err(why) => format!("{UPSTREAM_ERROR_PREFIX}{why}"),
    }
}

/// Speaks the OpenAI chat completions protocol over reqwest.
pub struct OpenAiBackend {
    http: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        client: &ClientConfig,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, UpstreamError> {
        let body = ApiRequest {
            model: &client.model,
            messages: messages
                .iter()
                .map(|m| ApiRequestMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            max_tokens,
        };

        let mut request = self
            .http
            .post(client.completions_url())
            .bearer_auth(&client.api_key)
            .json(&body);
        for (name, value) in client.route.extra_headers() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: ApiResponse =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or(UpstreamError::EmptyChoices)?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

// ─── wire types ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiRequestMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ApiRequestMessage<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
