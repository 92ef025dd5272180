//! Form field value objects

use super::form_state::Record;
use serde::{Deserialize, Serialize};

/// Type-safe field values
///
/// Serialized untagged, so a submission reads as plain JSON: strings, numbers,
/// string arrays, arrays of objects and nested objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    /// Ordered string sequence (tag selections, free-text entry lists)
    List(Vec<String>),
    /// Repeatable group, addressed by position
    Records(Vec<Record>),
    /// Composite sub-tree
    Group(Record),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for other kinds)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the numeric value (returns 0 for other kinds)
    pub fn as_number(&self) -> i64 {
        match self {
            FieldValue::Number(n) => *n,
            _ => 0,
        }
    }

    /// Get the string sequence (empty for other kinds)
    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    /// Get the record sequence (empty for other kinds)
    pub fn as_records(&self) -> &[Record] {
        match self {
            FieldValue::Records(records) => records,
            _ => &[],
        }
    }

    pub fn as_group(&self) -> Option<&Record> {
        match self {
            FieldValue::Group(record) => Some(record),
            _ => None,
        }
    }

    /// True for empty text, empty sequences and empty groups. Zero is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Records(records) => records.is_empty(),
            FieldValue::Group(record) => record.is_empty(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(0) => String::new(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Records(records) => format!("{} item(s)", records.len()),
            FieldValue::Group(record) => format!("{} field(s)", record.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(value: Vec<Record>) -> Self {
        FieldValue::Records(value)
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        FieldValue::Group(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_empty_text() {
        assert_eq!(FieldValue::default(), FieldValue::Text(String::new()));
    }

    #[test]
    fn test_accessors_fall_back_on_kind_mismatch() {
        let value = FieldValue::Number(42);
        assert_eq!(value.as_text(), "");
        assert!(value.as_list().is_empty());
        assert!(value.as_records().is_empty());
        assert!(value.as_group().is_none());
        assert_eq!(FieldValue::from("x").as_number(), 0);
    }

    #[test]
    fn test_is_blank() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from("a").is_blank());
        assert!(!FieldValue::Number(0).is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(FieldValue::Group(Record::new()).is_blank());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(FieldValue::Number(0).display_value(), "");
        assert_eq!(FieldValue::Number(1200).display_value(), "1200");
        assert_eq!(
            FieldValue::List(vec!["Beauty".into(), "Food".into()]).display_value(),
            "Beauty, Food"
        );
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let value = FieldValue::Group(
            Record::new()
                .update("username", "alice")
                .update("followers", 1500_i64)
                .update("tags", vec!["A".to_string()]),
        );
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"followers": 1500, "tags": ["A"], "username": "alice"})
        );
    }

    #[test]
    fn test_deserializes_nested_records() {
        let json = r#"{"pastWorks": [{"company": "Acme"}], "fee": 3}"#;
        let value: FieldValue = serde_json::from_str(json).unwrap();
        let record = value.as_group().unwrap();
        assert_eq!(record.number("fee"), 3);
        assert_eq!(record.records("pastWorks")[0].text("company"), "Acme");
    }
}
