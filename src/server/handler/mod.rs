use std::{ops::Deref, sync::Arc};

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{chat::engine::ChatEngine, config::structure::SessionConfig};

mod chat;
mod error;
mod index;
mod reset;
mod session;

pub struct InnerData {
    pub engine: ChatEngine,
    pub cookie_name: String,
    key: Key,
}

#[derive(Clone)]
pub struct Data(Arc<InnerData>);

impl Data {
    pub fn new(engine: ChatEngine, config: &SessionConfig) -> Self {
        Self(Arc::new(InnerData {
            engine,
            cookie_name: config.cookie_name.clone(),
            key: session::signing_key(config.secret.as_deref()),
        }))
    }
}

impl Deref for Data {
    type Target = InnerData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRef<Data> for Key {
    fn from_ref(data: &Data) -> Self {
        data.key.clone()
    }
}

pub fn router(data: Data, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/chat", post(chat::chat))
        .route("/reset", post(reset::reset))
        .layer(cors(cors_origins))
        .with_state(data)
}

/// Any origin may call without credentials unless origins are listed, in which
/// case only those are allowed and browsers may send the session cookie along.
fn cors(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect::<Vec<_>>();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
