use anyhow::bail;

use super::structure::{ChatGateConfigInner, ChatGateConfigTOML};
use std::{
    ops::{Deref, DerefMut},
    path::PathBuf,
};

#[derive(Debug)]
pub struct ChatGateConfig {
    pub path: PathBuf,
    cached: ChatGateConfigTOML,
}

impl ChatGateConfig {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            return Ok(Self::new(path)?);
        }

        if !path.is_file() {
            bail!(
                "Given path exists and is not a file... either change the path or delete the file."
            );
        }

        let config_str = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            cached: toml::from_str(&config_str)?,
        })
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            cached: ChatGateConfigTOML::default(),
        };

        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }

    /// Overlays secrets and endpoints from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Empty values are treated as unset so a blank variable never wipes the file value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Some(secret) = lookup("SESSION_SECRET_KEY") {
            self.session.secret = Some(secret);
        }
        if let Some(base_url) = lookup("PROXY_BASE_URL") {
            self.proxy.base_url = Some(base_url);
        }
        if let Some(header_value) = lookup("PROXY_HEADER_IDENTIFIER") {
            self.proxy.header_value = Some(header_value);
        }
        if let Some(host) = lookup("GUARDCHAT_HOST") {
            self.server.host = host;
        }
        match lookup("GUARDCHAT_PORT").map(|port| port.parse::<u16>()) {
            Some(Ok(port)) => self.server.port = port,
            Some(Err(why)) => log::warn!("ignoring GUARDCHAT_PORT: {why}"),
            None => (),
        }

        self
    }
}

impl Deref for ChatGateConfig {
    type Target = ChatGateConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}

impl DerefMut for ChatGateConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cached.config
    }
}

impl Clone for ChatGateConfig {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            cached: self.cached.clone(),
        }
    }
}

impl PartialEq for ChatGateConfig {
    fn eq(&self, other: &Self) -> bool {
        self.cached.config == other.cached.config
    }
}
