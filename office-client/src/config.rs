//! Client configuration

use std::time::Duration;

/// Environment variable holding the service base URL
pub const ENV_API_URL: &str = "OFFICE_API_URL";
/// Environment variable holding the bearer token
pub const ENV_API_TOKEN: &str = "OFFICE_API_TOKEN";
/// Environment variable holding the request timeout in seconds
pub const ENV_API_TIMEOUT: &str = "OFFICE_API_TIMEOUT";

/// Client configuration for connecting to the back-office service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Load configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> Self {
        // 没有 .env 文件时忽略
        let _ = dotenv::dotenv();

        let mut config = Self::new(
            std::env::var(ENV_API_URL).unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        config.token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.is_empty());
        config.timeout = std::env::var(ENV_API_TIMEOUT)
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
