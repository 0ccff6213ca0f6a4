use std::sync::Arc;

use crate::{
    chat::{
        attachment::{TextExtractor, assemble},
        client::{CompletionBackend, flatten, invoke, select_client},
        context::{ChatMessage, ConversationStore, SessionId},
        verdict::{Verdict, classify},
    },
    config::structure::ChatGateConfigInner,
    utils,
};

use super::error::ChatError;

/// One user turn as received from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub message: String,
    pub pdf_b64: Option<String>,
    pub use_proxy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub reply: String,
    pub verdict: Verdict,
}

pub struct ChatEngine {
    config: ChatGateConfigInner,
    store: Arc<dyn ConversationStore>,
    backend: Arc<dyn CompletionBackend>,
    extractor: Arc<dyn TextExtractor>,
}

impl ChatEngine {
    pub fn new(
        config: ChatGateConfigInner,
        store: Arc<dyn ConversationStore>,
        backend: Arc<dyn CompletionBackend>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            config,
            store,
            backend,
            extractor,
        }
    }

    /// Runs a full turn: assemble, store, complete, store the reply, classify.
    ///
    /// Client selection and attachment handling happen before the store is
    /// touched, so a rejected turn leaves the conversation as it was.
    pub async fn user_prompt(
        &self,
        session: &SessionId,
        turn: ChatTurn,
    ) -> Result<ChatOutcome, ChatError> {
        let client = select_client(turn.use_proxy, &self.config.llm, &self.config.proxy)?;
        let content = assemble(
            &turn.message,
            turn.pdf_b64.as_deref(),
            self.extractor.as_ref(),
        )?;

        self.push_user_turn(session, content).await;

        let history = self.store.get_or_create(session).await;
        let result = invoke(
            self.backend.as_ref(),
            &client,
            &history,
            self.config.llm.max_tokens,
        )
        .await;

        let reply = flatten(result);
        self.store
            .append(session, ChatMessage::assistant(reply.clone()))
            .await;

        let verdict = classify(
            &reply,
            &client,
            self.backend.as_ref(),
            &self.config.verdict,
        )
        .await;

        log::info!(
            "session {session}: answered {} messages via {} route, verdict {verdict}",
            history.len(),
            client.route.kind()
        );

        Ok(ChatOutcome { reply, verdict })
    }

    pub async fn reset(&self, session: &SessionId) {
        self.store.reset(session).await;
        log::info!("session {session}: conversation reset");
    }

    /// Appends the user message, seeding the system prompt into an empty conversation first.
    async fn push_user_turn(&self, session: &SessionId, content: String) {
        let previous = self
            .store
            .append_seeded(
                session,
                ChatMessage::system(self.config.prompt.system.clone()),
                ChatMessage::user(content),
            )
            .await;

        match previous {
            None => log::debug!("session {session}: new conversation"),
            Some(last) => log::debug!(
                "session {session}: last message {} ago",
                utils::time_to_string(chrono::Utc::now() - last.sent_at)
            ),
        }
    }
}
