use axum::{Json, extract::State};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Serialize;

use super::{Data, session};

#[derive(Serialize)]
pub struct ResetResponse {
    status: &'static str,
}

/// Drops the caller's conversation; callers without a session get the same answer.
pub async fn reset(State(data): State<Data>, jar: SignedCookieJar) -> Json<ResetResponse> {
    if let Some(session) = session::current(&jar, &data.cookie_name) {
        data.engine.reset(&session).await;
    }

    Json(ResetResponse {
        status: "Conversación reiniciada",
    })
}
