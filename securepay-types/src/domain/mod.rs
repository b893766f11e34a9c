//! Domain models for the gateway client.

pub mod attempt;
pub mod card;
pub mod config;
pub mod money;
pub mod order;
pub mod outcome;
pub mod response;

pub use attempt::PaymentAttempt;
pub use card::{CardDetails, CardType};
pub use config::{GatewayConfiguration, GatewayMode, GatewayUrls};
pub use money::{Currency, Money};
pub use order::{PaymentRequestContext, TXN_SOURCE_XML_API, TXN_TYPE_PAYMENT};
pub use outcome::{ApprovedPayment, Outcome, PaymentState};
pub use response::GatewayResponse;
