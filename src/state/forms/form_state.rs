//! Form state tree and the single-field updater

use super::field::FieldValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A tree of named fields.
///
/// Records are persistent: `update` returns a new record and never touches the
/// receiver. Untouched children are shared by reference between the old and
/// new record and compare equal under `Arc::ptr_eq`.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Arc<BTreeMap<String, Arc<FieldValue>>>,
}

/// The full accumulated data tree of a wizard session
pub type FormState = Record;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(name, value)` pairs
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.into(), Arc::new(value.into())))
            .collect();
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Replace one direct child field, returning the new record.
    ///
    /// Unknown names are added. Composite children are replaced wholesale;
    /// callers build the new sub-tree by calling `update` one level down.
    pub fn update(&self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let mut fields = (*self.fields).clone();
        fields.insert(name.into(), Arc::new(value.into()));
        Self {
            fields: Arc::new(fields),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text value of a field, empty when absent
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map_or("", FieldValue::as_text)
    }

    /// Numeric value of a field, 0 when absent
    pub fn number(&self, name: &str) -> i64 {
        self.get(name).map_or(0, FieldValue::as_number)
    }

    /// String sequence of a field, empty when absent
    pub fn list(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(value) => value.as_list(),
            None => &[],
        }
    }

    /// Record sequence of a field, empty when absent
    pub fn records(&self, name: &str) -> &[Record] {
        match self.get(name) {
            Some(value) => value.as_records(),
            None => &[],
        }
    }

    /// Composite child of a field, an empty record when absent
    pub fn group(&self, name: &str) -> Record {
        self.get(name)
            .and_then(FieldValue::as_group)
            .cloned()
            .unwrap_or_default()
    }

    /// True when both records hold the very same allocation for `name`
    #[cfg(test)]
    pub fn shares_field(&self, other: &Record, name: &str) -> bool {
        match (self.fields.get(name), other.fields.get(name)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// True when both records are the same allocation
    pub fn ptr_eq(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Fill every field missing from `self` with the value from `defaults`.
    ///
    /// Groups present on both sides are filled recursively. Fields that are
    /// already present keep their reference.
    pub fn with_defaults(&self, defaults: &Record) -> Record {
        let mut merged = self.clone();
        for (name, default) in defaults.fields.iter() {
            match (self.get(name), default.as_ref()) {
                (None, _) => {
                    merged = merged.update(name.clone(), default.as_ref().clone());
                }
                (Some(FieldValue::Group(current)), FieldValue::Group(default_group)) => {
                    let filled = current.with_defaults(default_group);
                    if !filled.ptr_eq(current) {
                        merged = merged.update(name.clone(), filled);
                    }
                }
                _ => {}
            }
        }
        merged
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.fields == other.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter().map(|(k, v)| (k, v.as_ref())))
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;
        Ok(Record::from_fields(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FormState {
        Record::from_fields([
            ("username", FieldValue::from("alice")),
            ("bio", FieldValue::from("")),
            (
                "contactPerson",
                FieldValue::Group(Record::from_fields([("name", "Sato"), ("email", "")])),
            ),
        ])
    }

    mod update {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_sets_named_field() {
            let state = sample();
            let next = state.update("bio", "hello");
            assert_eq!(next.text("bio"), "hello");
        }

        #[test]
        fn test_siblings_keep_their_reference() {
            let state = sample();
            let next = state.update("bio", "hello");
            assert!(next.shares_field(&state, "username"));
            assert!(next.shares_field(&state, "contactPerson"));
            assert!(!next.shares_field(&state, "bio"));
        }

        #[test]
        fn test_receiver_is_untouched() {
            let state = sample();
            let _ = state.update("username", "bob");
            assert_eq!(state.text("username"), "alice");
        }

        #[test]
        fn test_unknown_field_is_added() {
            let state = sample();
            let next = state.update("nickname", "al");
            assert_eq!(next.len(), state.len() + 1);
            assert_eq!(next.text("nickname"), "al");
        }

        #[test]
        fn test_composite_spread_does_not_alias_original() {
            let state = sample();
            let contact = state.group("contactPerson");
            let next = state.update("contactPerson", contact.update("email", "s@example.com"));

            assert_eq!(state.group("contactPerson").text("email"), "");
            assert_eq!(next.group("contactPerson").text("email"), "s@example.com");
            assert!(next
                .group("contactPerson")
                .shares_field(&state.group("contactPerson"), "name"));
        }
    }

    mod readers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_absent_fields_read_as_empty_defaults() {
            let state = FormState::new();
            assert_eq!(state.text("missing"), "");
            assert_eq!(state.number("missing"), 0);
            assert!(state.list("missing").is_empty());
            assert!(state.records("missing").is_empty());
            assert!(state.group("missing").is_empty());
        }
    }

    mod with_defaults {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fills_missing_fields() {
            let defaults = Record::from_fields([("bio", ""), ("website", "")]);
            let filled = Record::new().update("bio", "hi").with_defaults(&defaults);
            assert_eq!(filled.text("bio"), "hi");
            assert!(filled.contains("website"));
        }

        #[test]
        fn test_fills_nested_groups() {
            let defaults = Record::new().update(
                "budget",
                Record::from_fields([("min", 0_i64), ("max", 0_i64)]),
            );
            let state = Record::new().update("budget", Record::new().update("min", 100_i64));
            let filled = state.with_defaults(&defaults);
            assert_eq!(filled.group("budget").number("min"), 100);
            assert!(filled.group("budget").contains("max"));
        }

        #[test]
        fn test_complete_state_is_returned_as_is() {
            let state = sample();
            let filled = state.with_defaults(&Record::from_fields([("bio", "default")]));
            assert!(filled.ptr_eq(&state));
        }
    }
}
