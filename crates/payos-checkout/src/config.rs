use std::env;
use std::time::Duration;

use url::Url;

use crate::constants::{
    CANCEL_PATH, DEFAULT_API_URL, DEFAULT_APP_ORIGIN, REQUEST_TIMEOUT, SUCCESS_PATH,
};
use crate::error::CheckoutError;

/// Runtime configuration for the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Origin of the shop front-end; the gateway redirects back here.
    pub app_origin: String,
    /// Transfer description sent with every request. Empty lets the gateway
    /// derive the memo from its own order code.
    pub description: String,
    pub request_timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_origin: DEFAULT_APP_ORIGIN.to_string(),
            description: String::new(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl CheckoutConfig {
    /// Build a config from explicit URLs, validating both.
    pub fn new(api_url: &str, app_origin: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: validate_url(api_url)?,
            app_origin: validate_url(app_origin)?,
            ..Self::default()
        })
    }

    /// Read `CHECKOUT_API_URL`, `CHECKOUT_APP_ORIGIN` and `CHECKOUT_DESCRIPTION`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = var("CHECKOUT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let app_origin =
            var("CHECKOUT_APP_ORIGIN").unwrap_or_else(|| DEFAULT_APP_ORIGIN.to_string());

        let mut config = Self::new(&api_url, &app_origin)?;
        if let Some(description) = lookup("CHECKOUT_DESCRIPTION") {
            config.description = description;
        }
        tracing::debug!(api_url = %config.api_url, app_origin = %config.app_origin, "checkout config loaded");
        Ok(config)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Absolute URL for a backend path such as `/payments/payos/test`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub fn return_url(&self) -> String {
        format!("{}{}", self.app_origin, SUCCESS_PATH)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.app_origin, CANCEL_PATH)
    }
}

fn validate_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl(raw.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidUrl(raw.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<ConfigError> for CheckoutError {
    fn from(e: ConfigError) -> Self {
        CheckoutError::Config(e.to_string())
    }
}
