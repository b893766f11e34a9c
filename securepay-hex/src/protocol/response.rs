//! Flattening extractor for gateway replies.
//!
//! Not a general XML parser: it pulls every innermost `<tag>value</tag>` pair
//! out of the document regardless of nesting, which is all the gateway's reply
//! shapes need. Malformed input degrades to a partial or empty response.

use std::sync::LazyLock;

use regex::Regex;
use securepay_types::{GatewayResponse, ResponseParser};

use super::xml::unescape;

/// Opening tag (attributes allowed), a text value without markup, and a
/// closing tag. Opening and closing names are compared after matching.
static TAG_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_][\w.:-]*)(?:\s[^<>]*)?>([^<]+)</([A-Za-z_][\w.:-]*)\s*>")
        .expect("valid regex")
});

/// Extracts tag/value pairs; the first occurrence of a tag wins and values
/// are trimmed.
pub fn parse(raw: &str) -> GatewayResponse {
    GatewayResponse::from_fields(TAG_PAIR.captures_iter(raw).filter_map(|caps| {
        let (open, value, close) = (&caps[1], caps[2].trim(), &caps[3]);
        (open == close && !value.is_empty())
            .then(|| (open.to_string(), unescape(value).into_owned()))
    }))
}

/// [`ResponseParser`] backed by [`parse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexResponseParser;

impl ResponseParser for RegexResponseParser {
    fn parse(&self, raw: &str) -> GatewayResponse {
        parse(raw)
    }
}
