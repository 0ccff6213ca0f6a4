use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::config::structure::VerdictConfig;

use super::{
    client::{ClientConfig, CompletionBackend, invoke},
    context::ChatMessage,
    prompt::TemplateVariables,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Unknown")]
    Unknown,

    #[serde(rename = "Prompt-Injection-Detected")]
    PromptInjectionDetected,

    #[serde(rename = "YES")]
    Yes,

    #[serde(rename = "NO")]
    No,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_plain::to_string(self)
            .map_err(|_| std::fmt::Error)?
            .fmt(f)
    }
}

impl Verdict {
    /// Reads the evaluator's answer. "SI" is checked first, so an answer
    /// holding both tokens counts as approval.
    pub fn parse(evaluation: &str) -> Self {
        let normalized = evaluation.trim().to_uppercase();

        if normalized.contains("SI") {
            Verdict::Yes
        } else if normalized.contains("NO") {
            Verdict::No
        } else {
            Verdict::Unknown
        }
    }
}

/// Judges an assistant reply: a proxy block short-circuits, anything else
/// goes through one short evaluation completion. Never fails.
pub async fn classify(
    reply: &str,
    client: &ClientConfig,
    backend: &dyn CompletionBackend,
    config: &VerdictConfig,
) -> Verdict {
    if !config.blocked_marker.is_empty() && reply.contains(&config.blocked_marker) {
        log::info!("reply carries the proxy block marker");
        return Verdict::PromptInjectionDetected;
    }

    let prompt = TemplateVariables::new(reply).substitute_template(&config.evaluation_template);

    match invoke(
        backend,
        client,
        &[ChatMessage::user(prompt)],
        config.max_tokens,
    )
    .await
    {
        Ok(evaluation) => {
            let verdict = Verdict::parse(&evaluation);
            log::debug!("evaluator answered {evaluation:?}, verdict {verdict}");
            verdict
        }
        Err(why) => {
            log::warn!("evaluation call failed, verdict unknown: {why}");
            Verdict::Unknown
        }
    }
}
