//! Repeatable groups: append, positional update and positional removal
//!
//! Records have no identity beyond their index. Indexes are captured from the
//! latest render, so a stale index is a caller bug; it is absorbed as a no-op.

use super::field::FieldValue;
use super::form_state::Record;

/// Append `blank` at the end of the sequence
pub fn append<T: Clone>(items: &[T], blank: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(blank);
    next
}

/// Remove the element at `index`; later elements shift down by one.
pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    if index >= items.len() {
        tracing::debug!(index, len = items.len(), "remove_at ignored stale index");
        return items.to_vec();
    }
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Replace `field` within the record at `index`, leaving every other record
/// and every other field of that record untouched.
pub fn update_at(
    records: &[Record],
    index: usize,
    field: &str,
    value: impl Into<FieldValue>,
) -> Vec<Record> {
    let Some(target) = records.get(index) else {
        tracing::debug!(index, len = records.len(), "update_at ignored stale index");
        return records.to_vec();
    };
    let replacement = target.update(field, value);
    let mut next = records.to_vec();
    next[index] = replacement;
    next
}

/// Append a trimmed free-text entry. Blank input yields `None`.
pub fn push_entry(entries: &[String], raw: &str) -> Option<Vec<String>> {
    let entry = raw.trim();
    if entry.is_empty() {
        return None;
    }
    Some(append(entries, entry.to_string()))
}
