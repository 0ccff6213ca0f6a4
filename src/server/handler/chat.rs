use axum::{Json, body::Bytes, extract::State};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};

use crate::chat::{
    engine::{ChatError, ChatTurn},
    verdict::Verdict,
};

use super::{Data, error::ApiError, session};

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    mensaje: Option<String>,
    archivo_pdf_b64: Option<String>,
    #[serde(rename = "GuardiumAI")]
    guardium_ai: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct ChatResponse {
    respuesta: String,
    aprobado: Verdict,
}

impl TryFrom<ChatRequest> for ChatTurn {
    type Error = ChatError;

    fn try_from(request: ChatRequest) -> Result<Self, Self::Error> {
        let message = request
            .mensaje
            .ok_or_else(|| ChatError::Validation("missing \"mensaje\"".to_string()))?;

        Ok(ChatTurn {
            message,
            pdf_b64: request.archivo_pdf_b64,
            use_proxy: request.guardium_ai.unwrap_or(true),
        })
    }
}

/// The body is parsed by hand so a malformed one gets the same JSON error as a missing field.
pub fn parse_turn(body: &[u8]) -> Result<ChatTurn, ChatError> {
    serde_json::from_slice::<ChatRequest>(body)
        .map_err(|e| ChatError::Validation(e.to_string()))?
        .try_into()
}

pub async fn chat(
    State(data): State<Data>,
    jar: SignedCookieJar,
    body: Bytes,
) -> Result<(SignedCookieJar, Json<ChatResponse>), ApiError> {
    let turn = parse_turn(&body)?;
    let (jar, session) = session::current_or_issue(jar, &data.cookie_name);

    let outcome = data.engine.user_prompt(&session, turn).await?;

    Ok((
        jar,
        Json(ChatResponse {
            respuesta: outcome.reply,
            aprobado: outcome.verdict,
        }),
    ))
}
