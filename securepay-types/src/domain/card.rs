//! Raw card details for a single payment attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::GatewayError;

/// Card brands the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Amex,
    DinersClub,
    Discover,
    Jcb,
    Maestro,
    Mastercard,
    Visa,
}

/// IIN prefix ranges per brand. Ranges are inclusive and compared against a
/// prefix of the card number of the same width.
const CARD_RANGES: &[(CardType, &[(&str, &str)])] = &[
    (CardType::Visa, &[("4", "4")]),
    (CardType::Mastercard, &[("51", "55"), ("2221", "2720")]),
    (CardType::Amex, &[("34", "34"), ("37", "37")]),
    (
        CardType::DinersClub,
        &[("300", "305"), ("309", "309"), ("36", "36"), ("38", "39")],
    ),
    (
        CardType::Discover,
        &[("6011", "6011"), ("622126", "622925"), ("644", "649"), ("65", "65")],
    ),
    (CardType::Jcb, &[("3528", "3589")]),
    (
        CardType::Maestro,
        &[
            ("5018", "5018"),
            ("5020", "5020"),
            ("5038", "5038"),
            ("5612", "5612"),
            ("5893", "5893"),
            ("6304", "6304"),
            ("6759", "6759"),
            ("6761", "6763"),
            ("0604", "0604"),
            ("6390", "6390"),
        ],
    ),
];

impl CardType {
    /// Detects the brand from the leading digits of a card number.
    pub fn detect(number: &str) -> Option<CardType> {
        CARD_RANGES.iter().find_map(|(card_type, ranges)| {
            ranges
                .iter()
                .any(|&(start, end)| prefix_in_range(number, start, end))
                .then_some(*card_type)
        })
    }

    /// Human-readable brand name.
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Amex => "American Express",
            CardType::DinersClub => "Diners Club",
            CardType::Discover => "Discover Card",
            CardType::Jcb => "JCB",
            CardType::Maestro => "Maestro",
            CardType::Mastercard => "MasterCard",
            CardType::Visa => "Visa",
        }
    }
}

// Equal-width digit strings order the same lexicographically and numerically.
fn prefix_in_range(number: &str, start: &str, end: &str) -> bool {
    match number.get(..start.len()) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => {
            start <= prefix && prefix <= end
        }
        _ => false,
    }
}

/// Luhn checksum over an all-digit string.
fn luhn_valid(number: &str) -> bool {
    let mut sum = 0;
    for (i, ch) in number.chars().rev().enumerate() {
        let Some(mut digit) = ch.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// Card details entered by the card holder.
///
/// Never persisted: memory is zeroized on drop and `Debug` prints only the
/// masked number.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    number: String,
    security_code: String,
    expiry_month: u32,
    expiry_year: u32,
}

impl CardDetails {
    /// Creates card details. Spaces and dashes in the number are dropped.
    pub fn new(
        number: impl Into<String>,
        security_code: impl Into<String>,
        expiry_month: u32,
        expiry_year: u32,
    ) -> Self {
        let mut raw = number.into();
        let number = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        raw.zeroize();
        Self {
            number,
            security_code: security_code.into(),
            expiry_month,
            expiry_year,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn security_code(&self) -> &str {
        &self.security_code
    }

    pub fn expiry_month(&self) -> u32 {
        self.expiry_month
    }

    /// Expiry year as entered, either two or four digits.
    pub fn expiry_year(&self) -> u32 {
        self.expiry_year
    }

    /// Last four digits of the card number.
    pub fn last_four(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.number[start..]
    }

    /// Card number with everything but the last four digits masked.
    pub fn masked_number(&self) -> String {
        let hidden = self.number.chars().count().saturating_sub(4);
        format!("{}{}", "*".repeat(hidden), self.last_four())
    }

    pub fn card_type(&self) -> Option<CardType> {
        CardType::detect(&self.number)
    }

    /// Label shown to the card holder, e.g. "Visa ending in 1111".
    pub fn label(&self) -> String {
        let brand = self.card_type().map(|t| t.label()).unwrap_or("Card");
        format!("{} ending in {}", brand, self.last_four())
    }

    /// Checks the details are complete and plausible before anything is sent.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.number.is_empty() {
            return Err(GatewayError::InvalidPaymentDetails("card number is required".into()));
        }
        if !self.number.chars().all(|c| c.is_ascii_digit()) {
            return Err(GatewayError::InvalidPaymentDetails(
                "card number must contain only digits".into(),
            ));
        }
        if !(12..=19).contains(&self.number.len()) || !luhn_valid(&self.number) {
            return Err(GatewayError::InvalidPaymentDetails("card number is invalid".into()));
        }
        if self.security_code.is_empty()
            || !self.security_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(GatewayError::InvalidPaymentDetails("security code is invalid".into()));
        }
        if !(1..=12).contains(&self.expiry_month) {
            return Err(GatewayError::InvalidPaymentDetails(
                "expiration month is invalid".into(),
            ));
        }
        if !(self.expiry_year < 100 || (1000..=9999).contains(&self.expiry_year)) {
            return Err(GatewayError::InvalidPaymentDetails(
                "expiration year is invalid".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked_number())
            .field("security_code", &"***")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish()
    }
}
