//! Terminal result of a payment attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GatewayError;

/// What the gateway decided.
///
/// Terminal: the caller persists or reports based on this value and never
/// resubmits automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Payment accepted; `remote_id` is the gateway's transaction ID.
    Approved { remote_id: String },
    /// Gateway-level rejection with a status code other than `000`.
    SoftDecline {
        status_code: String,
        description: Option<String>,
    },
    /// The card was explicitly not approved.
    HardDecline { reason: String },
    /// The gateway could not be reached or its reply could not be read.
    TransportFailure { cause: String },
}

impl Outcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Outcome::Approved { .. })
    }

    /// Converts to a `Result`, turning every non-approval into a typed error.
    pub fn into_result(self) -> Result<ApprovedPayment, GatewayError> {
        match self {
            Outcome::Approved { remote_id } => Ok(ApprovedPayment { remote_id }),
            Outcome::SoftDecline {
                status_code,
                description,
            } => Err(GatewayError::SoftDecline {
                status_code,
                description,
            }),
            Outcome::HardDecline { reason } => Err(GatewayError::HardDecline(reason)),
            Outcome::TransportFailure { cause } => Err(GatewayError::TransportFailure(cause)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Approved { remote_id } => write!(f, "approved ({})", remote_id),
            Outcome::SoftDecline { status_code, .. } => {
                write!(f, "gateway rejected request (status {})", status_code)
            }
            Outcome::HardDecline { reason } => write!(f, "declined: {}", reason),
            Outcome::TransportFailure { cause } => write!(f, "transport failure: {}", cause),
        }
    }
}

/// State the host moves its payment record into after approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Authorization,
    Completed,
}

/// An approved payment, ready for the host to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedPayment {
    pub remote_id: String,
}

impl ApprovedPayment {
    /// `Completed` when the payment was captured, `Authorization` otherwise.
    pub fn next_state(&self, capture: bool) -> PaymentState {
        if capture {
            PaymentState::Completed
        } else {
            PaymentState::Authorization
        }
    }
}
