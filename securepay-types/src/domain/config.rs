//! Merchant configuration for the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::money::Currency;
use crate::error::DomainError;

pub const DEFAULT_LIVE_URL: &str = "https://api.securepay.com.au/xmlapi/payment";
pub const DEFAULT_TEST_URL: &str = "https://test.api.securepay.com.au/xmlapi/payment";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Which gateway account receives the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    Live,
    #[default]
    Test,
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Live => write!(f, "live"),
            GatewayMode::Test => write!(f, "test"),
        }
    }
}

impl std::str::FromStr for GatewayMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(GatewayMode::Live),
            "test" => Ok(GatewayMode::Test),
            _ => Err(DomainError::UnknownMode(s.to_string())),
        }
    }
}

/// Endpoint per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayUrls {
    pub live: String,
    pub test: String,
}

impl Default for GatewayUrls {
    fn default() -> Self {
        Self {
            live: DEFAULT_LIVE_URL.to_string(),
            test: DEFAULT_TEST_URL.to_string(),
        }
    }
}

/// Merchant credentials and connection settings.
///
/// Read-only to the gateway client; the host owns persistence.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfiguration {
    #[serde(default)]
    pub mode: GatewayMode,
    pub merchant_id: String,
    pub password: String,
    #[serde(default)]
    pub gateway_urls: GatewayUrls,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Skips TLS certificate verification. Only for sandboxes with
    /// self-signed certificates; never enable against a real gateway.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl GatewayConfiguration {
    /// Creates a configuration with default URLs, currency and timeout.
    pub fn new(
        mode: GatewayMode,
        merchant_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            merchant_id: merchant_id.into(),
            password: password.into(),
            gateway_urls: GatewayUrls::default(),
            currency: Currency::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            danger_accept_invalid_certs: false,
        }
    }

    /// Overrides the endpoint URLs.
    pub fn with_urls(mut self, live: impl Into<String>, test: impl Into<String>) -> Self {
        self.gateway_urls = GatewayUrls {
            live: live.into(),
            test: test.into(),
        };
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    /// URL the request is posted to for the configured mode.
    pub fn endpoint(&self) -> &str {
        match self.mode {
            GatewayMode::Live => &self.gateway_urls.live,
            GatewayMode::Test => &self.gateway_urls.test,
        }
    }

    /// Per-request timeout, never less than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl fmt::Debug for GatewayConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfiguration")
            .field("mode", &self.mode)
            .field("merchant_id", &self.merchant_id)
            .field("password", &"***")
            .field("gateway_urls", &self.gateway_urls)
            .field("currency", &self.currency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "danger_accept_invalid_certs",
                &self.danger_accept_invalid_certs,
            )
            .finish()
    }
}
