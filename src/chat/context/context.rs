use std::{collections::HashMap, fmt::Display};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::message::ChatMessage;

/// Opaque key a client presents to find its conversation again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-session transcript storage.
///
/// Conversations only ever grow: messages are appended to the tail and the
/// whole sequence is dropped on [`ConversationStore::reset`]. There is no
/// per-session locking, so two requests racing on one session interleave
/// their appends.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the stored sequence, or an empty one for unknown sessions.
    async fn get_or_create(&self, session: &SessionId) -> Vec<ChatMessage>;

    async fn append(&self, session: &SessionId, message: ChatMessage);

    /// Appends `message`, putting `seed` in front of it when the conversation
    /// is empty. Both happen under one write so a session is seeded at most once.
    /// Returns the message that was last before the call.
    async fn append_seeded(
        &self,
        session: &SessionId,
        seed: ChatMessage,
        message: ChatMessage,
    ) -> Option<ChatMessage>;

    async fn reset(&self, session: &SessionId);
}

#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Vec<ChatMessage>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn get_or_create(&self, session: &SessionId) -> Vec<ChatMessage> {
        let sessions = self.sessions.read().await;
        if let Some(messages) = sessions.get(session) {
            return messages.clone();
        }
        drop(sessions);

        self.sessions
            .write()
            .await
            .entry(session.clone())
            .or_default()
            .clone()
    }

    async fn append(&self, session: &SessionId, message: ChatMessage) {
        self.sessions
            .write()
            .await
            .entry(session.clone())
            .or_default()
            .push(message);
    }

    async fn append_seeded(
        &self,
        session: &SessionId,
        seed: ChatMessage,
        message: ChatMessage,
    ) -> Option<ChatMessage> {
        let mut sessions = self.sessions.write().await;
        let messages = sessions.entry(session.clone()).or_default();

        let previous = messages.last().cloned();
        if previous.is_none() {
            messages.push(seed);
        }
        messages.push(message);

        previous
    }

    async fn reset(&self, session: &SessionId) {
        if self.sessions.write().await.remove(session).is_some() {
            log::debug!("dropped conversation for session {session}");
        }
    }
}
