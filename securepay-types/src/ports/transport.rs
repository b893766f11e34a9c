//! Gateway transport port.

use crate::error::TransportError;

/// Sends a serialized request to the gateway and returns the raw reply.
///
/// Implementations make exactly one attempt per call. Resubmitting a payment
/// risks charging the card twice, so retries are left to the caller.
#[async_trait::async_trait]
pub trait GatewayTransport: Send + Sync + 'static {
    /// Posts `body` as `text/xml` to `endpoint` and returns the response text.
    async fn send(&self, endpoint: &str, body: String) -> Result<String, TransportError>;
}
