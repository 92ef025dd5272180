//! Toggle-set selection over ordered string tags

#[cfg(test)]
use super::form_state::FormState;

/// Remove `item` if present, otherwise append it.
///
/// Order reflects toggle history: a tag removed and added again lands at the
/// end. Elements are unique as long as every insertion goes through here.
pub fn toggle(selection: &[String], item: &str) -> Vec<String> {
    match selection.iter().position(|s| s == item) {
        Some(index) => {
            let mut next = selection.to_vec();
            next.remove(index);
            next
        }
        None => {
            let mut next = Vec::with_capacity(selection.len() + 1);
            next.extend_from_slice(selection);
            next.push(item.to_string());
            next
        }
    }
}

pub fn is_selected(selection: &[String], item: &str) -> bool {
    selection.iter().any(|s| s == item)
}

/// Toggle `item` in the list stored under `field` and store the result
#[cfg(test)]
pub fn toggle_in(state: &FormState, field: &str, item: &str) -> FormState {
    state.update(field, toggle(state.list(field), item))
}
