//! Order data a payment request is built from.

use serde::{Deserialize, Serialize};

use super::money::{Currency, Money};

/// `txnType` for a standard payment.
pub const TXN_TYPE_PAYMENT: u8 = 0;

/// `txnSource` identifying an XML API request.
pub const TXN_SOURCE_XML_API: u8 = 23;

/// What the host order contributes to a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestContext {
    /// Order identifier, sent as the purchase order number
    pub order_id: String,
    /// Order total in minor units
    pub total: Money,
    pub txn_type: u8,
    pub txn_source: u8,
}

impl PaymentRequestContext {
    pub fn new(order_id: impl Into<String>, total: Money) -> Self {
        Self {
            order_id: order_id.into(),
            total,
            txn_type: TXN_TYPE_PAYMENT,
            txn_source: TXN_SOURCE_XML_API,
        }
    }

    pub fn amount(&self) -> i64 {
        self.total.amount()
    }

    pub fn currency(&self) -> Currency {
        self.total.currency()
    }
}
