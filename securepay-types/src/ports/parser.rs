//! Response parser port.

use crate::domain::GatewayResponse;

/// Turns a raw gateway reply into a [`GatewayResponse`].
///
/// Parsing never fails: unreadable input yields an empty or partial response,
/// which the classifier reports as a transport failure.
pub trait ResponseParser: Send + Sync + 'static {
    fn parse(&self, raw: &str) -> GatewayResponse;
}
