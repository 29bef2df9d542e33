use std::time::Duration;

/// Public endpoint of the managed service.
pub const DEFAULT_ENDPOINT: &str = "https://transcoder.googleapis.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::RestConnector`].
#[derive(Clone)]
pub struct RestConfig {
    /// Base URL; `/v1/...` paths are appended to it.
    pub endpoint: String,
    /// OAuth 2.0 bearer token sent with every request.
    pub access_token: Option<String>,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("transcoder-jobs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// Hand-written so the token never reaches logs.
impl std::fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
