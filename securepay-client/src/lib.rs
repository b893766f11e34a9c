//! # SecurePay Client
//!
//! HTTPS transport for the SecurePay XML API. Implements the
//! [`GatewayTransport`] port with `reqwest`.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use securepay_types::{GatewayConfiguration, GatewayMode, GatewayTransport, TransportError};
use tracing::{debug, instrument, warn};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("TLS certificate verification cannot be disabled in live mode")]
    InsecureLiveTls,
}

impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => TransportError::Timeout,
            ClientError::Http(e) => TransportError::Http(e.to_string()),
            ClientError::Api { status, message } => TransportError::Status {
                status,
                body: message,
            },
            other @ ClientError::InsecureLiveTls => TransportError::Http(other.to_string()),
        }
    }
}

/// Gateway transport client.
///
/// TLS certificates are verified unless the configuration explicitly sets
/// `danger_accept_invalid_certs`, which is refused in live mode. Every request
/// is bounded by the configured timeout.
pub struct SecurePayClient {
    http: Client,
    timeout: Duration,
}

impl SecurePayClient {
    /// Creates a client from the gateway configuration.
    pub fn new(config: &GatewayConfiguration) -> Result<Self, ClientError> {
        if config.danger_accept_invalid_certs {
            if config.mode == GatewayMode::Live {
                return Err(ClientError::InsecureLiveTls);
            }
            warn!("TLS certificate verification is DISABLED for the gateway client");
        }
        Self::build(config.request_timeout(), config.danger_accept_invalid_certs)
    }

    /// Creates a verifying client with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        Self::build(timeout, false)
    }

    fn build(timeout: Duration, danger_accept_invalid_certs: bool) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(danger_accept_invalid_certs)
            .build()?;
        Ok(Self { http, timeout })
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Posts an XML document and returns the response body.
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn post_xml(&self, url: &str, body: String) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response(&self, resp: reqwest::Response) -> Result<String, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            debug!(status = status.as_u16(), bytes = body.len(), "gateway responded");
            Ok(body)
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait::async_trait]
impl GatewayTransport for SecurePayClient {
    async fn send(&self, endpoint: &str, body: String) -> Result<String, TransportError> {
        self.post_xml(endpoint, body).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use securepay_types::GatewayMode;

    #[test]
    fn test_client_uses_configured_timeout() {
        let config = GatewayConfiguration::new(GatewayMode::Test, "ABC0001", "abc123")
            .with_request_timeout(Duration::from_secs(15));
        let client = SecurePayClient::new(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_live_mode_refuses_invalid_certs() {
        let mut config = GatewayConfiguration::new(GatewayMode::Live, "ABC0001", "abc123");
        config.danger_accept_invalid_certs = true;
        assert!(matches!(
            SecurePayClient::new(&config),
            Err(ClientError::InsecureLiveTls)
        ));
    }

    #[test]
    fn test_test_mode_allows_invalid_certs() {
        let mut config = GatewayConfiguration::new(GatewayMode::Test, "ABC0001", "abc123");
        config.danger_accept_invalid_certs = true;
        assert!(SecurePayClient::new(&config).is_ok());
    }

    #[test]
    fn test_api_error_maps_to_status() {
        let err = ClientError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(
            TransportError::from(err),
            TransportError::Status {
                status: 502,
                body: "Bad Gateway".to_string()
            }
        );
    }
}
