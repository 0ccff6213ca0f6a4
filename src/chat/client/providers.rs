use std::fmt::Display;

use reqwest::{Url, header::HeaderValue};
use serde::{Deserialize, Serialize};

use crate::config::structure::{LLMConfig, ProxyConfig};

/// Header the compliance proxy uses to pick the upstream endpoint.
pub const PROXY_HEADER_NAME: &str = "x-alltrue-llm-endpoint-identifier";

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ClientConfigError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("proxy base url is not configured")]
    MissingProxyUrl,
    #[error("base url \"{0}\" is invalid: {1}")]
    InvalidUrl(String, String),
    #[error("proxy header identifier is not configured")]
    MissingProxyHeader,
    #[error("proxy header identifier is not a valid header value")]
    InvalidProxyHeader,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "proxied")]
    Proxied,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_plain::to_string(self)
            .map_err(|_| std::fmt::Error)?
            .fmt(f)
    }
}

/// Where completion requests go and what they carry on the way.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRoute {
    Direct {
        base_url: Url,
    },
    Proxied {
        base_url: Url,
        header_value: HeaderValue,
    },
}

impl ClientRoute {
    pub fn kind(&self) -> Route {
        match self {
            ClientRoute::Direct { .. } => Route::Direct,
            ClientRoute::Proxied { .. } => Route::Proxied,
        }
    }

    pub fn base_url(&self) -> &Url {
        match self {
            ClientRoute::Direct { base_url } => base_url,
            ClientRoute::Proxied { base_url, .. } => base_url,
        }
    }

    /// Headers added on top of authorization; empty for direct calls.
    pub fn extra_headers(&self) -> Vec<(&'static str, HeaderValue)> {
        match self {
            ClientRoute::Direct { .. } => vec![],
            ClientRoute::Proxied { header_value, .. } => {
                vec![(PROXY_HEADER_NAME, header_value.clone())]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub route: ClientRoute,
}

impl ClientConfig {
    /// `{base}/chat/completions`, tolerating a trailing slash on the base.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.route.base_url().as_str().trim_end_matches('/')
        )
    }
}

/// Picks the direct or proxied configuration for a single request.
pub fn select_client(
    use_proxy: bool,
    llm: &LLMConfig,
    proxy: &ProxyConfig,
) -> Result<ClientConfig, ClientConfigError> {
    if llm.api_key.trim().is_empty() {
        return Err(ClientConfigError::MissingApiKey);
    }

    let route = match use_proxy {
        false => ClientRoute::Direct {
            base_url: parse_url(&llm.base_url)?,
        },
        true => {
            let base_url = proxy
                .base_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .ok_or(ClientConfigError::MissingProxyUrl)?;
            let header_value = proxy
                .header_value
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .ok_or(ClientConfigError::MissingProxyHeader)?;

            ClientRoute::Proxied {
                base_url: parse_url(base_url)?,
                header_value: HeaderValue::from_str(header_value)
                    .map_err(|_| ClientConfigError::InvalidProxyHeader)?,
            }
        }
    };

    Ok(ClientConfig {
        api_key: llm.api_key.clone(),
        model: llm.model.clone(),
        route,
    })
}

fn parse_url(url: &str) -> Result<Url, ClientConfigError> {
    Url::parse(url).map_err(|e| ClientConfigError::InvalidUrl(url.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm() -> LLMConfig {
        LLMConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        }
    }

    fn proxy() -> ProxyConfig {
        ProxyConfig {
            base_url: Some("https://proxy.example/v1/".to_string()),
            header_value: Some("endpoint-7".to_string()),
        }
    }

    #[test]
    fn direct_has_no_proxy_url_or_header() {
        let client = select_client(false, &llm(), &proxy()).unwrap();

        assert_eq!(client.route.kind(), Route::Direct);
        assert!(client.route.extra_headers().is_empty());
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn proxied_carries_base_url_and_identifier_header() {
        let client = select_client(true, &llm(), &proxy()).unwrap();

        assert_eq!(client.route.kind(), Route::Proxied);
        assert_eq!(
            client.completions_url(),
            "https://proxy.example/v1/chat/completions"
        );
        assert_eq!(
            client.route.extra_headers(),
            vec![(PROXY_HEADER_NAME, HeaderValue::from_static("endpoint-7"))]
        );
    }

    #[test]
    fn missing_api_key_fails_both_routes() {
        let llm = LLMConfig::default();

        assert_eq!(
            select_client(false, &llm, &proxy()),
            Err(ClientConfigError::MissingApiKey)
        );
        assert_eq!(
            select_client(true, &llm, &proxy()),
            Err(ClientConfigError::MissingApiKey)
        );
    }

    #[test]
    fn proxy_settings_only_matter_when_proxied() {
        let empty = ProxyConfig::default();

        assert!(select_client(false, &llm(), &empty).is_ok());
        assert_eq!(
            select_client(true, &llm(), &empty),
            Err(ClientConfigError::MissingProxyUrl)
        );
    }

    #[test]
    fn malformed_proxy_settings_are_rejected() {
        let bad_url = ProxyConfig {
            base_url: Some("not a url".to_string()),
            ..proxy()
        };
        assert!(matches!(
            select_client(true, &llm(), &bad_url),
            Err(ClientConfigError::InvalidUrl(..))
        ));

        let bad_header = ProxyConfig {
            header_value: Some("line\nbreak".to_string()),
            ..proxy()
        };
        assert_eq!(
            select_client(true, &llm(), &bad_header),
            Err(ClientConfigError::InvalidProxyHeader)
        );

        let no_header = ProxyConfig {
            header_value: None,
            ..proxy()
        };
        assert_eq!(
            select_client(true, &llm(), &no_header),
            Err(ClientConfigError::MissingProxyHeader)
        );
    }

    #[test]
    fn route_names_render_plainly() {
        assert_eq!(Route::Direct.to_string(), "direct");
        assert_eq!(Route::Proxied.to_string(), "proxied");
    }
}
