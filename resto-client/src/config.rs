//! Client configuration

use shared::Locale;

/// Client configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | RESTO_API_URL | http://localhost:4000 | Backend API base URL |
/// | RESTO_APP_URL | http://localhost:3000 | Edge server base URL (auth routes) |
/// | RESTO_LOCALE | en | UI locale used for redirects |
/// | RESTO_REQUEST_TIMEOUT_SECS | 30 | Request timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL (e.g., "http://localhost:4000")
    pub api_url: String,

    /// Edge server base URL; auth and logout calls go here
    pub app_url: String,

    /// Locale used to build login redirects
    pub locale: Locale,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, app_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            app_url: app_url.into(),
            locale: Locale::default(),
            timeout: 30,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("RESTO_API_URL").unwrap_or(defaults.api_url),
            app_url: std::env::var("RESTO_APP_URL").unwrap_or(defaults.app_url),
            locale: std::env::var("RESTO_LOCALE")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.locale),
            timeout: std::env::var("RESTO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout),
        }
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:4000", "http://localhost:3000")
    }
}
