//! # SecurePay Types
//!
//! Domain types and port traits for the SecurePay XML gateway client.
//! This crate has ZERO IO dependencies - only data structures, validation
//! rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Card, money, configuration, response and outcome types
//! - `ports/` - Traits the transport and parser adapters implement
//! - `error/` - Domain, transport and gateway error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ApprovedPayment, CardDetails, CardType, Currency, GatewayConfiguration, GatewayMode,
    GatewayResponse, GatewayUrls, Money, Outcome, PaymentAttempt, PaymentRequestContext,
    PaymentState,
};
pub use error::{DomainError, GatewayError, TransportError};
pub use ports::{GatewayTransport, ResponseParser};
