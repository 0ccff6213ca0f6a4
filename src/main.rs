use std::path::PathBuf;

use config::store::ChatGateConfig;
use utils::log::Logger;

mod chat;
mod config;
mod server;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = ChatGateConfig::read(path)?;
    Logger::init(Logger::parse_level(config.server.log_level.as_deref()));

    let config = config.with_env();
    log::info!("loaded config from {}", config.path.display());

    let server = server::ChatServer::new(config).await?;
    server.run().await;

    Ok(())
}
