//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use securepay_types::domain::config::{
    DEFAULT_LIVE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEST_URL,
};
use securepay_types::{GatewayConfiguration, GatewayMode};

/// Loads the gateway configuration from `SECUREPAY_*` environment variables.
///
/// Merchant ID and password are required; everything else has a default.
pub fn from_env() -> anyhow::Result<GatewayConfiguration> {
    let mode: GatewayMode = env::var("SECUREPAY_MODE")
        .unwrap_or_else(|_| "test".to_string())
        .parse()?;

    let merchant_id = env::var("SECUREPAY_MERCHANT_ID")
        .map_err(|_| anyhow::anyhow!("SECUREPAY_MERCHANT_ID environment variable is required"))?;
    let password = env::var("SECUREPAY_PASSWORD")
        .map_err(|_| anyhow::anyhow!("SECUREPAY_PASSWORD environment variable is required"))?;

    let live_url =
        env::var("SECUREPAY_LIVE_URL").unwrap_or_else(|_| DEFAULT_LIVE_URL.to_string());
    let test_url =
        env::var("SECUREPAY_TEST_URL").unwrap_or_else(|_| DEFAULT_TEST_URL.to_string());

    let timeout_secs: u64 = env::var("SECUREPAY_TIMEOUT_SECS")
        .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
        .parse()?;

    let mut config = GatewayConfiguration::new(mode, merchant_id, password)
        .with_urls(live_url, test_url)
        .with_request_timeout(Duration::from_secs(timeout_secs));

    if let Ok(currency) = env::var("SECUREPAY_CURRENCY") {
        config.currency = currency.parse()?;
    }

    config.danger_accept_invalid_certs = env::var("SECUREPAY_DANGER_ACCEPT_INVALID_CERTS")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    Ok(config)
}
