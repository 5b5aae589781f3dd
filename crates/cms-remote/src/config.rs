//! Connection settings for the admin API

use std::time::Duration;

use cms_core::{ExError, ExErrorKind};
use cms_core_types::Sensitive;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the admin API lives and how to authenticate against it
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Scheme, host and optional path prefix, without a trailing slash
    pub base_url: String,
    /// Value of the `token` session cookie
    pub session_token: Option<Sensitive<String>>,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Build a config, validating and normalizing the base URL
    ///
    /// # Errors
    ///
    /// Returns `ERR_CONFIG` if the URL is blank or not http(s).
    pub fn new(base_url: &str) -> Result<Self, ExError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ExError::new(ExErrorKind::Config).with_message("API base URL is empty"));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ExError::new(ExErrorKind::Config)
                .with_message(format!("API base URL must be http(s): {trimmed}")));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            session_token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.session_token = (!token.trim().is_empty()).then(|| Sensitive::new(token));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an API path starting with `/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
