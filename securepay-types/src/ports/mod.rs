//! Port traits (interfaces for adapters).
//!
//! The gateway service depends on these traits, not on concrete
//! implementations, so the HTTP transport and the response parser can be
//! swapped independently.

mod parser;
mod transport;

pub use parser::ResponseParser;
pub use transport::GatewayTransport;
