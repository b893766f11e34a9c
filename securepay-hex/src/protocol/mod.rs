//! SecurePay XML API protocol: request encoding and response decoding.
//!
//! - `message_id` - random correlation IDs
//! - `expiry` - card expiry to timeout value and `MM/YY`
//! - `xml` - tagged element tree and serializer
//! - `request` - payment request builder and log redaction
//! - `response` - flattening response parser

pub mod expiry;
pub mod message_id;
pub mod request;
pub mod response;
pub mod xml;

pub use request::{build, build_with, redact};
pub use response::{RegexResponseParser, parse};
