//! Maps a flattened gateway response to a terminal [`Outcome`].

use securepay_types::{GatewayResponse, Outcome};
use tracing::warn;

/// Status code of a request the gateway processed normally.
pub const STATUS_OK: &str = "000";

pub const UNREACHABLE: &str = "gateway unreachable or response unparsable";
pub const DEFAULT_DECLINE_REASON: &str = "The payment was declined";

/// Decides the outcome; the first matching rule wins:
///
/// 1. empty response: transport failure
/// 2. `statusCode` other than `000` (or missing): soft decline
/// 3. `approved` is `No`: hard decline
/// 4. otherwise: approved with `txnID` as the remote ID
pub fn classify(response: &GatewayResponse) -> Outcome {
    if response.is_empty() {
        return Outcome::TransportFailure {
            cause: UNREACHABLE.to_string(),
        };
    }

    match response.status_code() {
        Some(STATUS_OK) => {}
        code => {
            return Outcome::SoftDecline {
                status_code: code.unwrap_or_default().to_string(),
                description: response.status_description().map(str::to_string),
            };
        }
    }

    if response.approved() == Some("No") {
        return Outcome::HardDecline {
            reason: response
                .response_text()
                .unwrap_or(DEFAULT_DECLINE_REASON)
                .to_string(),
        };
    }

    let remote_id = response.txn_id().unwrap_or_default();
    if remote_id.is_empty() {
        warn!("approved response carried no txnID");
    }
    Outcome::Approved {
        remote_id: remote_id.to_string(),
    }
}
