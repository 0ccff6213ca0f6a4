use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ChatGateConfigTOML {
    #[serde(default)]
    pub config: ChatGateConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatGateConfigInner {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub verdict: VerdictConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// one of error, warn, info, debug, trace
    pub log_level: Option<String>,
    /// browser origins allowed to send the session cookie cross-origin;
    /// when empty any origin may call, but without credentials
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            log_level: None,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LLMConfig {
    pub api_key: String,
    pub model: String,
    /// base url used when the proxy is bypassed
    pub base_url: String,
    pub max_tokens: u32,
    /// no explicit timeout is applied when unset
    pub timeout_secs: Option<u64>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 1024,
            timeout_secs: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProxyConfig {
    pub base_url: Option<String>,
    pub header_value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub secret: Option<String>,
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            cookie_name: "guardchat_session".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub system: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: "You are a helpful assistant.".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerdictConfig {
    /// substring the proxy leaves in a reply when it blocked the request
    pub blocked_marker: String,
    /// `{reply}` is replaced with the assistant's answer
    pub evaluation_template: String,
    pub max_tokens: u32,
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            blocked_marker: "Sensitive data detected".to_string(),
            evaluation_template: "Evalúa la siguiente respuesta de un asistente. ¿Es una respuesta apropiada, segura y que se puede aprobar? Responde únicamente con SI o NO.\n\nRespuesta:\n{reply}".to_string(),
            max_tokens: 5,
        }
    }
}
