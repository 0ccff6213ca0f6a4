use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};

use crate::chat::context::SessionId;

/// Derives the cookie signing key, falling back to a random per-process key.
///
/// With the fallback every restart invalidates existing sessions.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            log::warn!("session secret is shorter than 32 bytes, using a random key instead");
            Key::generate()
        }
        None => {
            log::warn!("no session secret configured, using a random key");
            Key::generate()
        }
    }
}

/// The session a verified cookie points at, if any.
pub fn current(jar: &SignedCookieJar, cookie_name: &str) -> Option<SessionId> {
    jar.get(cookie_name)
        .map(|cookie| SessionId::from(cookie.value().to_string()))
        .filter(|session| !session.as_str().is_empty())
}

/// Returns the jar's session, issuing a fresh signed cookie when it has none.
pub fn current_or_issue(jar: SignedCookieJar, cookie_name: &str) -> (SignedCookieJar, SessionId) {
    if let Some(session) = current(&jar, cookie_name) {
        return (jar, session);
    }

    let session = SessionId::new();
    log::debug!("issuing session {session}");

    let cookie = Cookie::build((cookie_name.to_string(), session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), session)
}
