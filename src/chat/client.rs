mod agent;
mod providers;

pub use agent::{CompletionBackend, OpenAiBackend, UpstreamError, flatten, invoke};
pub use providers::{ClientConfig, ClientConfigError, PROXY_HEADER_NAME, Route, select_client};
