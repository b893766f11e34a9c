//! # SecurePay Hex
//!
//! Protocol core and application service for the SecurePay XML gateway.
//!
//! ## Architecture
//!
//! - `protocol/` - Request builder, message IDs, expiry timeout, response parser
//! - `classify` - Response to outcome decision
//! - `service` - Orchestrates one payment request-response cycle
//!
//! The service is generic over `T: GatewayTransport`, allowing the HTTPS
//! client to be replaced by an in-memory transport in tests.

pub mod classify;
pub mod protocol;
pub mod service;


pub use classify::classify;
pub use service::PaymentGatewayService;
