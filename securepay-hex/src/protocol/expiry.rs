//! Card expiry handling: gateway timeout value and `MM/YY` formatting.

use chrono::NaiveDate;
use securepay_types::GatewayError;

/// Expands a two-digit year to `20YY`; four-digit years pass through.
pub fn normalize_year(year: u32) -> i32 {
    if year < 100 {
        2000 + year as i32
    } else {
        year as i32
    }
}

/// Unix timestamp of midnight UTC on the last day of the expiry month.
pub fn compute_timeout(month: u32, year: u32) -> Result<i64, GatewayError> {
    if !(1..=12).contains(&month) {
        return Err(GatewayError::InvalidPaymentDetails(
            "expiration month is invalid".into(),
        ));
    }
    let year = normalize_year(year);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .and_then(|last_day| last_day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
        .ok_or_else(|| GatewayError::InvalidPaymentDetails("expiration year is invalid".into()))
}

/// Expiry as the gateway expects it, e.g. `07/26`.
pub fn format_expiry(month: u32, year: u32) -> String {
    format!("{:02}/{:02}", month, normalize_year(year) % 100)
}
