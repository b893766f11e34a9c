//! Payment request document builder.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::{Captures, Regex};
use securepay_types::{CardDetails, GatewayConfiguration, GatewayError, PaymentRequestContext};

use super::expiry::{compute_timeout, format_expiry};
use super::message_id::{self, MESSAGE_ID_ALPHABET, MESSAGE_ID_MAX_LENGTH, MESSAGE_ID_MIN_LENGTH};
use super::xml::{self, XmlNode};

pub const ROOT_ELEMENT: &str = "SecurePayMessage";
pub const API_VERSION: &str = "spxml-3.0";
pub const REQUEST_TYPE_PAYMENT: &str = "Payment";

/// Timestamps are sent in AEST with a literal `+600` minute offset.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S000+600";
const GATEWAY_UTC_OFFSET_HOURS: i64 = 10;

/// Builds the XML payment request for one attempt.
///
/// Fails with [`GatewayError::MissingPaymentDetails`] when no card is
/// supplied; nothing is produced in that case.
pub fn build(
    config: &GatewayConfiguration,
    order: &PaymentRequestContext,
    card: Option<&CardDetails>,
) -> Result<String, GatewayError> {
    let card = card.ok_or(GatewayError::MissingPaymentDetails)?;
    let message_id = message_id::generate(
        MESSAGE_ID_MIN_LENGTH,
        MESSAGE_ID_MAX_LENGTH,
        MESSAGE_ID_ALPHABET,
    );
    build_with(config, order, card, Utc::now(), &message_id)
}

/// Deterministic core of [`build`].
pub fn build_with(
    config: &GatewayConfiguration,
    order: &PaymentRequestContext,
    card: &CardDetails,
    now: DateTime<Utc>,
    message_id: &str,
) -> Result<String, GatewayError> {
    let timeout = compute_timeout(card.expiry_month(), card.expiry_year())?;

    let blocks = [
        XmlNode::element(
            "MessageInfo",
            vec![
                XmlNode::text("messageID", message_id),
                XmlNode::text("messageTimestamp", format_timestamp(now)),
                XmlNode::text("timeoutValue", timeout),
                XmlNode::text("apiVersion", API_VERSION),
            ],
        ),
        XmlNode::element(
            "MerchantInfo",
            vec![
                XmlNode::text("merchantID", &config.merchant_id),
                XmlNode::text("password", &config.password),
            ],
        ),
        XmlNode::text("RequestType", REQUEST_TYPE_PAYMENT),
        payment_block(order, card),
    ];

    Ok(xml::document(ROOT_ELEMENT, &blocks))
}

fn payment_block(order: &PaymentRequestContext, card: &CardDetails) -> XmlNode {
    let txn = XmlNode::element(
        "Txn",
        vec![
            XmlNode::text("txnType", order.txn_type),
            XmlNode::text("txnSource", order.txn_source),
            XmlNode::text("amount", order.amount()),
            XmlNode::text("currency", order.currency()),
            XmlNode::text("purchaseOrderNo", &order.order_id),
            XmlNode::element(
                "CreditCardInfo",
                vec![
                    XmlNode::text("cardNumber", card.number()),
                    XmlNode::text("cvv", card.security_code()),
                    XmlNode::text(
                        "expiryDate",
                        format_expiry(card.expiry_month(), card.expiry_year()),
                    ),
                ],
            ),
        ],
    )
    .with_attribute("ID", 1);

    XmlNode::element(
        "Payment",
        vec![XmlNode::element("TxnList", vec![txn]).with_attribute("count", 1)],
    )
}

/// `YYYYMMDDHHMMSS000+600` in gateway local time.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    (now.naive_utc() + Duration::hours(GATEWAY_UTC_OFFSET_HOURS))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<cardNumber>([^<]*)</cardNumber>").expect("valid regex"));
static SECRET_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(cvv|password)>[^<]*</(cvv|password)>").expect("valid regex"));

/// Masks the card number, CVV and merchant password so a request can be
/// logged.
pub fn redact(xml: &str) -> String {
    let masked = CARD_NUMBER.replace_all(xml, |caps: &Captures| {
        let number = &caps[1];
        let visible = number.len().saturating_sub(4);
        let last_four = number.get(visible..).unwrap_or("");
        format!("<cardNumber>{}{}</cardNumber>", "*".repeat(visible), last_four)
    });
    SECRET_FIELD
        .replace_all(&masked, |caps: &Captures| {
            format!("<{}>***</{}>", &caps[1], &caps[2])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use securepay_types::{Currency, GatewayMode, Money};

    fn config() -> GatewayConfiguration {
        GatewayConfiguration::new(GatewayMode::Test, "ABC0001", "abc123")
    }

    fn order() -> PaymentRequestContext {
        PaymentRequestContext::new("42", Money::new(1234, Currency::AUD).unwrap())
    }

    fn card() -> CardDetails {
        CardDetails::new("4444333322221111", "123", 7, 2026)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 2, 30, 15).unwrap()
    }

    /// Checks every tag is closed by its bare name in nesting order.
    fn assert_balanced(xml: &str) {
        let tag = Regex::new(r"<(/?)([A-Za-z]+)[^>]*>").unwrap();
        let mut stack: Vec<String> = Vec::new();
        for caps in tag.captures_iter(xml) {
            let name = caps[2].to_string();
            if &caps[1] == "/" {
                assert_eq!(stack.pop().as_deref(), Some(name.as_str()), "unbalanced {}", name);
            } else {
                stack.push(name);
            }
        }
        assert!(stack.is_empty(), "unclosed tags: {:?}", stack);
    }

    #[test]
    fn test_missing_card_fails() {
        let result = build(&config(), &order(), None);
        assert!(matches!(result, Err(GatewayError::MissingPaymentDetails)));
    }

    #[test]
    fn test_document_layout() {
        let xml = build_with(&config(), &order(), &card(), fixed_now(), "abc123def456789").unwrap();
        let timeout = compute_timeout(7, 2026).unwrap();

        let expected = format!(
            "<?xml version='1.0' encoding='UTF-8'?>
<SecurePayMessage>
  <MessageInfo>
    <messageID>abc123def456789</messageID>
    <messageTimestamp>20240305123015000+600</messageTimestamp>
    <timeoutValue>{timeout}</timeoutValue>
    <apiVersion>spxml-3.0</apiVersion>
  </MessageInfo>
  <MerchantInfo>
    <merchantID>ABC0001</merchantID>
    <password>abc123</password>
  </MerchantInfo>
  <RequestType>Payment</RequestType>
  <Payment>
    <TxnList count=\"1\">
      <Txn ID=\"1\">
        <txnType>0</txnType>
        <txnSource>23</txnSource>
        <amount>1234</amount>
        <currency>AUD</currency>
        <purchaseOrderNo>42</purchaseOrderNo>
        <CreditCardInfo>
          <cardNumber>4444333322221111</cardNumber>
          <cvv>123</cvv>
          <expiryDate>07/26</expiryDate>
        </CreditCardInfo>
      </Txn>
    </TxnList>
  </Payment>
</SecurePayMessage>"
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_output_is_balanced() {
        let xml = build(&config(), &order(), Some(&card())).unwrap();
        let body = xml.split_once("?>").unwrap().1;
        assert_balanced(body);
    }

    #[test]
    fn test_hostile_order_id_stays_well_formed() {
        let order = PaymentRequestContext::new("</Txn><x>", Money::new(1, Currency::AUD).unwrap());
        let xml = build(&config(), &order, Some(&card())).unwrap();
        assert!(xml.contains("<purchaseOrderNo>&lt;/Txn&gt;&lt;x&gt;</purchaseOrderNo>"));
        assert_balanced(xml.split_once("?>").unwrap().1);
    }

    #[test]
    fn test_two_digit_year_expiry() {
        let card = CardDetails::new("4444333322221111", "123", 7, 26);
        let xml = build(&config(), &order(), Some(&card)).unwrap();
        assert!(xml.contains("<expiryDate>07/26</expiryDate>"));
    }

    #[test]
    fn test_message_ids_differ_between_builds() {
        let id = Regex::new(r"<messageID>([0-9a-f]+)</messageID>").unwrap();
        let first = build(&config(), &order(), Some(&card())).unwrap();
        let second = build(&config(), &order(), Some(&card())).unwrap();
        let first_id = id.captures(&first).unwrap()[1].to_string();
        let second_id = id.captures(&second).unwrap()[1].to_string();
        assert!((15..=25).contains(&first_id.len()));
        assert_ne!(first_id, second_id);
    }

    #[test]
    fn test_timestamp_uses_gateway_offset() {
        let late = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(format_timestamp(late), "20250101060000000+600");
    }

    #[test]
    fn test_redact_hides_secrets() {
        let xml = build(&config(), &order(), Some(&card())).unwrap();
        let redacted = redact(&xml);

        assert!(!redacted.contains("4444333322221111"));
        assert!(redacted.contains("<cardNumber>************1111</cardNumber>"));
        assert!(redacted.contains("<cvv>***</cvv>"));
        assert!(redacted.contains("<password>***</password>"));
        assert!(redacted.contains("<amount>1234</amount>"));
    }
}
