//! Test doubles shared by the engine and HTTP tests.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;

use crate::config::structure::{ChatGateConfigInner, LLMConfig, ProxyConfig};

use super::{
    attachment::{AttachmentError, TextExtractor},
    client::{ClientConfig, CompletionBackend, UpstreamError},
    context::ChatMessage,
};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub client: ClientConfig,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Answers calls from a fixed script, in order, and records what it was sent.
pub struct ScriptedBackend {
    answers: Mutex<VecDeque<Result<String, UpstreamError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub fn new(answers: impl IntoIterator<Item = Result<String, UpstreamError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn replies(answers: &[&str]) -> Self {
        Self::new(answers.iter().map(|a| Ok(a.to_string())))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        client: &ClientConfig,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(RecordedCall {
            client: client.clone(),
            messages: messages.to_vec(),
            max_tokens,
        });

        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(UpstreamError::Transport("script exhausted".to_string())))
    }
}

pub struct StubExtractor {
    pages: Vec<String>,
}

impl StubExtractor {
    pub fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl TextExtractor for StubExtractor {
    fn pages(&self, _document: &[u8]) -> Result<Vec<String>, AttachmentError> {
        Ok(self.pages.clone())
    }
}

pub fn test_config() -> ChatGateConfigInner {
    ChatGateConfigInner {
        llm: LLMConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        },
        proxy: ProxyConfig {
            base_url: Some("https://proxy.example/v1".to_string()),
            header_value: Some("endpoint-7".to_string()),
        },
        ..Default::default()
    }
}
