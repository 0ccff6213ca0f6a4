use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::{
    chat::{
        attachment::PdfExtractor,
        client::OpenAiBackend,
        context::MemoryStore,
        engine::ChatEngine,
    },
    config::store::ChatGateConfig,
};
pub use handler::Data;

mod handler;

pub struct ChatServer {
    listener: TcpListener,
    router: Router,
}

impl ChatServer {
    pub async fn new(config: ChatGateConfig) -> Result<Self> {
        if config.llm.api_key.trim().is_empty() {
            log::warn!("no API key configured, /chat will answer 500 until one is provided");
        }

        let backend = OpenAiBackend::new(config.llm.timeout_secs.map(Duration::from_secs))?;
        let engine = ChatEngine::new(
            (*config).clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(backend),
            Arc::new(PdfExtractor),
        );

        let data = Data::new(engine, &config.session);
        let router = handler::router(data, &config.server.cors_origins);

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr).await?;
        log::info!("listening on http://{addr}");

        Ok(Self { listener, router })
    }

    pub async fn run(self) {
        let ChatServer { listener, router } = self;

        let shutdown = async {
            if let Err(why) = tokio::signal::ctrl_c().await {
                log::error!("failed to listen for ctrl-c: {why:?}");
                std::future::pending::<()>().await;
            }
            log::info!("shutting down");
        };

        if let Err(why) = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
        {
            log::error!("server error: {why:?}");
        }
    }
}
