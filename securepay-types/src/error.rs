//! Error types for the gateway client.

/// Domain-level errors (invalid values rejected before any request is built).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown gateway mode: {0} (expected 'live' or 'test')")]
    UnknownMode(String),
}

/// Transport-level errors returned by a [`GatewayTransport`](crate::ports::GatewayTransport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Gateway returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("Request timed out")]
    Timeout,
}

/// Errors surfaced to the payment flow.
///
/// Every non-approval is reported through one of these variants; callers pick
/// their retry and messaging policy per variant.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Please enter payment details to continue")]
    MissingPaymentDetails,

    #[error("Invalid payment details: {0}")]
    InvalidPaymentDetails(String),

    #[error("We could not connect to the payment gateway: {0}")]
    TransportFailure(String),

    #[error("Payment gateway rejected the request (status {status_code})")]
    SoftDecline {
        status_code: String,
        description: Option<String>,
    },

    #[error("The payment was declined: {0}")]
    HardDecline(String),
}

impl GatewayError {
    /// Returns true when the card holder has to supply new or corrected
    /// payment details before another attempt makes sense.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingPaymentDetails
                | GatewayError::InvalidPaymentDetails(_)
                | GatewayError::HardDecline(_)
        )
    }
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        GatewayError::TransportFailure(err.to_string())
    }
}
