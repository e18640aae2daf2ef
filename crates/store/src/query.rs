//! Query filters for document listing.
//!
//! The store expects each filter as a JSON-encoded string in a repeated
//! `queries[]` parameter, e.g.
//! `{"method":"equal","attribute":"result","values":["pending"]}`.

use serde::Serialize;

/// A single conjunctive filter predicate.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Filter {
    Equal {
        attribute: String,
        values: Vec<serde_json::Value>,
    },
    LessThanEqual {
        attribute: String,
        values: Vec<serde_json::Value>,
    },
}

impl Filter {
    /// Match documents whose `attribute` equals `value`.
    pub fn equal(attribute: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Filter::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    /// Match documents whose `attribute` is less than or equal to `value`.
    pub fn less_than_equal(
        attribute: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Filter::LessThanEqual {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    /// Encode the filter as the wire string the store expects.
    pub fn to_wire(&self) -> String {
        // Serialization of this enum cannot fail: all fields are JSON values.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_wire_format() {
        let filter = Filter::equal("result", "pending");
        assert_eq!(
            filter.to_wire(),
            r#"{"method":"equal","attribute":"result","values":["pending"]}"#
        );
    }

    #[test]
    fn test_equal_bool_value() {
        let filter = Filter::equal("reminderSent", false);
        assert_eq!(
            filter.to_wire(),
            r#"{"method":"equal","attribute":"reminderSent","values":[false]}"#
        );
    }

    #[test]
    fn test_less_than_equal_wire_format() {
        let filter = Filter::less_than_equal("reminderDate", "2026-08-01T09:00:00Z");
        assert_eq!(
            filter.to_wire(),
            r#"{"method":"lessThanEqual","attribute":"reminderDate","values":["2026-08-01T09:00:00Z"]}"#
        );
    }
}
