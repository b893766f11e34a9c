//! Single-attempt context holding card details.

use super::card::CardDetails;
use super::order::PaymentRequestContext;

/// Everything one payment attempt needs.
///
/// The caller owns the attempt; the card is borrowed while the request is
/// built and purged once the attempt resolves.
#[derive(Debug)]
pub struct PaymentAttempt {
    order: PaymentRequestContext,
    card: Option<CardDetails>,
    capture: bool,
}

impl PaymentAttempt {
    pub fn new(order: PaymentRequestContext, card: Option<CardDetails>, capture: bool) -> Self {
        Self {
            order,
            card,
            capture,
        }
    }

    pub fn order(&self) -> &PaymentRequestContext {
        &self.order
    }

    pub fn card(&self) -> Option<&CardDetails> {
        self.card.as_ref()
    }

    pub fn capture(&self) -> bool {
        self.capture
    }

    /// Drops the card details. The memory is zeroized on drop.
    pub fn purge(&mut self) {
        self.card = None;
    }

    pub fn is_purged(&self) -> bool {
        self.card.is_none()
    }
}
