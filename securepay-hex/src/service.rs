//! Payment Gateway Service
//!
//! Drives one request-response cycle: build, send, parse, classify.
//! Contains NO transport logic - the HTTP adapter is injected through the
//! `GatewayTransport` port.

use securepay_client::{ClientError, SecurePayClient};
use securepay_types::{
    CardDetails, GatewayConfiguration, GatewayError, GatewayTransport, Outcome, PaymentAttempt,
    PaymentRequestContext, ResponseParser,
};
use tracing::{debug, error, info, instrument, warn};

use crate::classify::classify;
use crate::protocol::{self, RegexResponseParser};

/// Longest slice of a gateway reply written to the logs.
const LOGGED_RESPONSE_CHARS: usize = 256;

/// Application service for gateway payments.
///
/// Generic over `T: GatewayTransport` and `P: ResponseParser` - adapters are
/// injected at compile time. This enables:
/// - Testing with an in-memory transport
/// - Swapping the flattening parser for a full XML parser
pub struct PaymentGatewayService<T: GatewayTransport, P: ResponseParser = RegexResponseParser> {
    config: GatewayConfiguration,
    transport: T,
    parser: P,
}

impl PaymentGatewayService<SecurePayClient> {
    /// Creates a service talking HTTPS to the configured gateway.
    pub fn connect(config: GatewayConfiguration) -> Result<Self, ClientError> {
        let transport = SecurePayClient::new(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: GatewayTransport> PaymentGatewayService<T> {
    /// Creates a service with the default response parser.
    pub fn new(config: GatewayConfiguration, transport: T) -> Self {
        Self::with_parser(config, transport, RegexResponseParser)
    }
}

impl<T: GatewayTransport, P: ResponseParser> PaymentGatewayService<T, P> {
    /// Creates a service with a custom response parser.
    pub fn with_parser(config: GatewayConfiguration, transport: T, parser: P) -> Self {
        Self {
            config,
            transport,
            parser,
        }
    }

    pub fn config(&self) -> &GatewayConfiguration {
        &self.config
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits one payment and classifies the gateway's answer.
    ///
    /// Build failures are returned as errors before anything is sent.
    /// Transport failures become [`Outcome::TransportFailure`]; nothing is
    /// retried.
    #[instrument(skip_all, fields(order_id = %order.order_id, mode = %self.config.mode))]
    pub async fn submit_payment(
        &self,
        order: &PaymentRequestContext,
        card: Option<&CardDetails>,
    ) -> Result<Outcome, GatewayError> {
        let xml = protocol::build(&self.config, order, card)?;
        debug!(request = %protocol::redact(&xml), "sending payment request");

        let raw = match self.transport.send(self.config.endpoint(), xml).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "gateway transport failed");
                return Ok(Outcome::TransportFailure {
                    cause: e.to_string(),
                });
            }
        };

        let response = self.parser.parse(&raw);
        let outcome = classify(&response);

        match &outcome {
            Outcome::Approved { remote_id } => {
                info!(remote_id = %remote_id, amount = order.amount(), "payment approved");
            }
            Outcome::SoftDecline { status_code, .. } => {
                error!(
                    status_code = %status_code,
                    response = %truncate(&protocol::redact(&raw), LOGGED_RESPONSE_CHARS),
                    "gateway rejected payment request"
                );
            }
            Outcome::HardDecline { reason } => {
                warn!(reason = %reason, "payment declined");
            }
            Outcome::TransportFailure { cause } => {
                error!(
                    cause = %cause,
                    response = %truncate(&protocol::redact(&raw), LOGGED_RESPONSE_CHARS),
                    "gateway response unusable"
                );
            }
        }

        Ok(outcome)
    }

    /// Validates the attempt's card, submits it, and purges the card details
    /// whatever the result.
    #[instrument(skip_all, fields(order_id = %attempt.order().order_id))]
    pub async fn process_attempt(
        &self,
        attempt: &mut PaymentAttempt,
    ) -> Result<Outcome, GatewayError> {
        let result = self.run_attempt(attempt).await;
        attempt.purge();
        result
    }

    async fn run_attempt(&self, attempt: &PaymentAttempt) -> Result<Outcome, GatewayError> {
        let card = attempt.card().ok_or(GatewayError::MissingPaymentDetails)?;
        card.validate()?;
        debug!(card = %card.label(), "submitting attempt");
        self.submit_payment(attempt.order(), Some(card)).await
    }
}

/// Cuts `text` to at most `max` characters.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
