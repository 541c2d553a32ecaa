//! API client configuration.
//!
//! Configuration priority: explicit constructor > `QUADRA_API_URL`
//! environment variable > local development default.

use std::env;
use std::time::Duration;

/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "QUADRA_API_URL";

/// Default per-request timeout. The backend contract leaves requests
/// untimed; the client imposes this bound so a hung request cannot pin
/// a screen in its loading state forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Creates a config for the given base URL, trailing slashes
    /// stripped so path joining is uniform.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the base URL from `QUADRA_API_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = ApiConfig::new("https://api.example.edu///");
        assert_eq!(config.base_url(), "https://api.example.edu");
    }

    #[test]
    fn test_default_timeout() {
        let config = ApiConfig::new(DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_timeout_override() {
        let config = ApiConfig::new(DEFAULT_BASE_URL).with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
