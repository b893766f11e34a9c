//! Flattened gateway response.

use serde::Serialize;
use std::collections::HashMap;

/// Response fields keyed by tag name.
///
/// Built once per call by a [`ResponseParser`](crate::ports::ResponseParser)
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GatewayResponse {
    fields: HashMap<String, String>,
}

impl GatewayResponse {
    /// Builds a response from tag/value pairs. The first value seen for a tag
    /// is kept.
    pub fn from_fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = HashMap::new();
        for (key, value) in pairs {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { fields }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields.get(tag).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn status_code(&self) -> Option<&str> {
        self.get("statusCode")
    }

    pub fn status_description(&self) -> Option<&str> {
        self.get("statusDescription")
    }

    pub fn approved(&self) -> Option<&str> {
        self.get("approved")
    }

    pub fn response_text(&self) -> Option<&str> {
        self.get("responseText")
    }

    pub fn txn_id(&self) -> Option<&str> {
        self.get("txnID")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let response =
            GatewayResponse::from_fields([("statusCode", "000"), ("statusCode", "510")]);
        assert_eq!(response.status_code(), Some("000"));
        assert_eq!(response.len(), 1);
    }

    #[test]
    fn test_empty_response() {
        let response = GatewayResponse::default();
        assert!(response.is_empty());
        assert_eq!(response.txn_id(), None);
    }
}
