//! Field rows: the focusable cursor positions of a step view
//!
//! A step is flattened into rows, each addressing a leaf by path. Editing a
//! row rebuilds the owning top-level field one level at a time and hands the
//! result back as a [`FieldEdit`] for the session's single mutation funnel.

use super::field::FieldValue;
use super::form_state::FormState;
use super::repeatable::{append, push_entry, remove_at, update_at};
use super::schema::{blank_record, FieldKind, FieldSpec, Step};
use super::toggle::{is_selected, toggle};

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

pub type FieldPath = Vec<Segment>;

/// A replacement value for one top-level field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone)]
pub enum RowKind {
    Text { multiline: bool },
    Number,
    /// One option of a toggle-set; the path addresses the list
    Option(&'static str),
    Select(&'static [&'static str]),
    /// Appends a blank record; the path addresses the sequence
    AddRecord(Vec<FieldSpec>),
    /// An existing free-text entry; the path ends with its index
    Entry,
    /// Pending free-text entry; the path addresses the list
    EntryInput,
}

#[derive(Debug, Clone)]
pub struct FieldRow {
    pub path: FieldPath,
    pub label: String,
    pub kind: RowKind,
    /// Nesting level, for indentation
    pub depth: u16,
}

/// Flatten a step into rows against the current state
pub fn layout_rows(step: &Step, state: &FormState) -> Vec<FieldRow> {
    let mut rows = Vec::new();
    for spec in &step.fields {
        let value = state
            .get(&spec.name)
            .cloned()
            .unwrap_or_else(|| spec.default_value());
        push_rows(
            &mut rows,
            spec,
            &value,
            vec![Segment::Field(spec.name.clone())],
            &spec.label,
            0,
        );
    }
    rows
}

fn push_rows(
    rows: &mut Vec<FieldRow>,
    spec: &FieldSpec,
    value: &FieldValue,
    path: FieldPath,
    label: &str,
    depth: u16,
) {
    let row = |kind: RowKind, path: FieldPath, label: String| FieldRow {
        path,
        label,
        kind,
        depth,
    };

    match &spec.kind {
        FieldKind::Text { multiline } => rows.push(row(
            RowKind::Text {
                multiline: *multiline,
            },
            path,
            label.to_string(),
        )),
        FieldKind::Number => rows.push(row(RowKind::Number, path, label.to_string())),
        FieldKind::Select(options) => {
            rows.push(row(RowKind::Select(*options), path, label.to_string()))
        }
        FieldKind::Choice(options) => {
            let options: &'static [&'static str] = *options;
            for option in options.iter().copied() {
                rows.push(row(
                    RowKind::Option(option),
                    path.clone(),
                    format!("{label} / {option}"),
                ));
            }
        }
        FieldKind::Group(children) => {
            let record = value.as_group().cloned().unwrap_or_default();
            for child in children {
                let child_value = record
                    .get(&child.name)
                    .cloned()
                    .unwrap_or_else(|| child.default_value());
                let mut child_path = path.clone();
                child_path.push(Segment::Field(child.name.clone()));
                push_rows(
                    rows,
                    child,
                    &child_value,
                    child_path,
                    &format!("{label} / {}", child.label),
                    depth + 1,
                );
            }
        }
        FieldKind::Records(children) => {
            for (index, record) in value.as_records().iter().enumerate() {
                for child in children {
                    let child_value = record
                        .get(&child.name)
                        .cloned()
                        .unwrap_or_else(|| child.default_value());
                    let mut child_path = path.clone();
                    child_path.push(Segment::Index(index));
                    child_path.push(Segment::Field(child.name.clone()));
                    push_rows(
                        rows,
                        child,
                        &child_value,
                        child_path,
                        &format!("{label} #{} / {}", index + 1, child.label),
                        depth + 1,
                    );
                }
            }
            rows.push(row(
                RowKind::AddRecord(children.clone()),
                path,
                format!("+ Add {}", label.to_lowercase()),
            ));
        }
        FieldKind::Entries => {
            for index in 0..value.as_list().len() {
                let mut entry_path = path.clone();
                entry_path.push(Segment::Index(index));
                rows.push(row(
                    RowKind::Entry,
                    entry_path,
                    format!("{label} #{}", index + 1),
                ));
            }
            rows.push(row(RowKind::EntryInput, path, format!("{label} (new)")));
        }
    }
}

/// Read the value a path addresses, if it still exists
pub fn read_at(state: &FormState, path: &[Segment]) -> Option<FieldValue> {
    let (Segment::Field(top), rest) = path.split_first()? else {
        return None;
    };
    let mut current = state.get(top)?.clone();
    for segment in rest {
        current = match (segment, &current) {
            (Segment::Field(name), FieldValue::Group(record)) => record.get(name)?.clone(),
            (Segment::Index(index), FieldValue::Records(records)) => {
                FieldValue::Group(records.get(*index)?.clone())
            }
            (Segment::Index(index), FieldValue::List(items)) => {
                FieldValue::Text(items.get(*index)?.clone())
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Rebuild the top-level field owning `path` with `edit` applied at the leaf.
///
/// Each level is replaced through `Record::update` (or `update_at` inside a
/// repeatable group) so untouched siblings keep their references. Returns
/// `None` when the path is stale or the edit declines.
pub fn apply_at<F>(state: &FormState, path: &[Segment], edit: F) -> Option<FieldEdit>
where
    F: FnOnce(&FieldValue) -> Option<FieldValue>,
{
    let (Segment::Field(top), rest) = path.split_first()? else {
        return None;
    };
    let current = state.get(top).cloned().unwrap_or_default();
    let value = rebuild(&current, rest, edit)?;
    Some(FieldEdit {
        field: top.clone(),
        value,
    })
}

fn rebuild<F>(value: &FieldValue, path: &[Segment], edit: F) -> Option<FieldValue>
where
    F: FnOnce(&FieldValue) -> Option<FieldValue>,
{
    match path {
        [] => edit(value),
        [Segment::Field(name), rest @ ..] => {
            let record = value.as_group().cloned().unwrap_or_default();
            let child = record.get(name).cloned().unwrap_or_default();
            let child = rebuild(&child, rest, edit)?;
            Some(FieldValue::Group(record.update(name.clone(), child)))
        }
        [Segment::Index(index), Segment::Field(name), rest @ ..] => {
            let records = value.as_records();
            let child = records.get(*index)?.get(name).cloned().unwrap_or_default();
            let child = rebuild(&child, rest, edit)?;
            Some(FieldValue::Records(update_at(records, *index, name, child)))
        }
        [Segment::Index(index)] => {
            let FieldValue::List(items) = value else {
                return None;
            };
            let item = FieldValue::Text(items.get(*index)?.clone());
            let item = edit(&item)?;
            let mut next = items.clone();
            next[*index] = item.as_text().to_string();
            Some(FieldValue::List(next))
        }
        _ => None,
    }
}

impl FieldRow {
    /// Text shown next to the label
    pub fn display(&self, state: &FormState, draft: &str) -> String {
        match &self.kind {
            RowKind::Option(option) => {
                let selected = read_at(state, &self.path)
                    .is_some_and(|value| is_selected(value.as_list(), option));
                (if selected { "[x]" } else { "[ ]" }).to_string()
            }
            RowKind::Select(_) => {
                let value = read_at(state, &self.path).unwrap_or_default();
                match value.as_text() {
                    "" => "(unspecified)".to_string(),
                    other => other.to_string(),
                }
            }
            RowKind::AddRecord(_) => String::new(),
            RowKind::EntryInput => draft.to_string(),
            RowKind::Text { .. } | RowKind::Number | RowKind::Entry => read_at(state, &self.path)
                .map(|value| value.display_value())
                .unwrap_or_default(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, RowKind::Text { multiline: true })
    }

    /// Rows that accept typed characters
    pub fn accepts_text(&self) -> bool {
        matches!(
            self.kind,
            RowKind::Text { .. } | RowKind::Number | RowKind::Entry | RowKind::EntryInput
        )
    }

    /// Typed character. Entry input rows buffer into `draft` and edit nothing.
    pub fn input_char(&self, state: &FormState, draft: &mut String, c: char) -> Option<FieldEdit> {
        match &self.kind {
            RowKind::Text { .. } | RowKind::Entry => apply_at(state, &self.path, |value| {
                let mut text = value.as_text().to_string();
                text.push(c);
                Some(FieldValue::Text(text))
            }),
            RowKind::Number => {
                let digit = i64::from(c.to_digit(10)?);
                apply_at(state, &self.path, |value| {
                    Some(FieldValue::Number(
                        value.as_number().saturating_mul(10).saturating_add(digit),
                    ))
                })
            }
            RowKind::EntryInput => {
                draft.push(c);
                None
            }
            _ => None,
        }
    }

    /// Delete one character. An entry emptied this way is dropped from its list.
    pub fn backspace(&self, state: &FormState, draft: &mut String) -> Option<FieldEdit> {
        match &self.kind {
            RowKind::Text { .. } => apply_at(state, &self.path, |value| {
                let mut text = value.as_text().to_string();
                text.pop()?;
                Some(FieldValue::Text(text))
            }),
            RowKind::Entry => {
                let mut text = read_at(state, &self.path)?.as_text().to_string();
                text.pop()?;
                if text.trim().is_empty() {
                    return self.remove(state);
                }
                apply_at(state, &self.path, |_| Some(FieldValue::Text(text)))
            }
            RowKind::Number => apply_at(state, &self.path, |value| {
                let number = value.as_number();
                (number != 0).then(|| FieldValue::Number(number / 10))
            }),
            RowKind::EntryInput => {
                draft.pop();
                None
            }
            _ => None,
        }
    }

    /// Toggle an option, cycle a select, append a record or commit an entry.
    ///
    /// A committed entry clears `draft`.
    pub fn activate(&self, state: &FormState, draft: &mut String) -> Option<FieldEdit> {
        match &self.kind {
            RowKind::Option(option) => apply_at(state, &self.path, |value| {
                Some(FieldValue::List(toggle(value.as_list(), option)))
            }),
            RowKind::Select(options) => apply_at(state, &self.path, |value| {
                Some(FieldValue::Text(next_option(options, value.as_text()).to_string()))
            }),
            RowKind::AddRecord(children) => apply_at(state, &self.path, |value| {
                Some(FieldValue::Records(append(
                    value.as_records(),
                    blank_record(children),
                )))
            }),
            RowKind::EntryInput => {
                let edit = apply_at(state, &self.path, |value| {
                    push_entry(value.as_list(), draft.as_str()).map(FieldValue::List)
                })?;
                draft.clear();
                Some(edit)
            }
            RowKind::Text { multiline: true } => apply_at(state, &self.path, |value| {
                Some(FieldValue::Text(format!("{}\n", value.as_text())))
            }),
            _ => None,
        }
    }

    /// Remove the record or entry this row belongs to
    pub fn remove(&self, state: &FormState) -> Option<FieldEdit> {
        let position = self
            .path
            .iter()
            .rposition(|segment| matches!(segment, Segment::Index(_)))?;
        let Segment::Index(index) = self.path[position] else {
            return None;
        };
        apply_at(state, &self.path[..position], |value| match value {
            FieldValue::Records(records) => Some(FieldValue::Records(remove_at(records, index))),
            FieldValue::List(items) => Some(FieldValue::List(remove_at(items, index))),
            _ => None,
        })
    }
}

fn next_option(options: &'static [&'static str], current: &str) -> &'static str {
    match options.iter().position(|option| *option == current) {
        Some(index) => options[(index + 1) % options.len()],
        None => options.first().copied().unwrap_or_default(),
    }
}

/// Cursor over a step's rows plus the pending entry text
#[derive(Debug, Clone, Default)]
pub struct FormCursor {
    pub active_row: usize,
    pub draft: String,
}

impl FormCursor {
    pub fn next_row(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_row = (self.active_row + 1) % count;
        self.draft.clear();
    }

    pub fn prev_row(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_row = if self.active_row == 0 {
            count - 1
        } else {
            self.active_row - 1
        };
        self.draft.clear();
    }

    /// Keep the cursor on a valid row after the row set shrinks
    pub fn clamp(&mut self, count: usize) {
        self.active_row = self.active_row.min(count.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::flows::FlowKind;
    use crate::state::forms::form_state::Record;
    use crate::state::forms::schema::blank_state;
    use pretty_assertions::assert_eq;

    fn step(kind: FlowKind, index: usize) -> Step {
        kind.steps().remove(index)
    }

    fn row_named<'a>(rows: &'a [FieldRow], label: &str) -> &'a FieldRow {
        rows.iter()
            .find(|row| row.label == label)
            .unwrap_or_else(|| panic!("no row labelled {label}"))
    }

    fn apply(state: &FormState, edit: Option<FieldEdit>) -> FormState {
        let edit = edit.expect("edit expected");
        state.update(edit.field, edit.value)
    }

    mod layout {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_basic_info_rows() {
            let step = step(FlowKind::Influencer, 0);
            let rows = layout_rows(&step, &blank_state(&[step.clone()]));
            let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
            assert_eq!(labels, vec!["Name", "Email"]);
        }

        #[test]
        fn test_choice_expands_to_one_row_per_option() {
            let step = step(FlowKind::Influencer, 1);
            let rows = layout_rows(&step, &blank_state(&[step.clone()]));
            let options = rows
                .iter()
                .filter(|r| matches!(r.kind, RowKind::Option(_)))
                .count();
            assert_eq!(options, crate::state::forms::flows::GENRES.len());
        }

        #[test]
        fn test_records_rows_follow_sequence_length() {
            let step = step(FlowKind::Influencer, 2);
            let state = blank_state(&[step.clone()]);
            let before = layout_rows(&step, &state).len();

            let add = layout_rows(&step, &state)
                .into_iter()
                .find(|r| matches!(r.kind, RowKind::AddRecord(_)))
                .unwrap();
            let state = apply(&state, add.activate(&state, &mut String::new()));
            let rows = layout_rows(&step, &state);

            assert_eq!(rows.len(), before + 3);
            assert_eq!(rows[0].label, "Past work #1 / Company");
            assert_eq!(
                rows[0].path,
                vec![
                    Segment::Field("pastWorks".into()),
                    Segment::Index(0),
                    Segment::Field("company".into()),
                ]
            );
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_into_nested_group_keeps_siblings_shared() {
            let step = step(FlowKind::Influencer, 1);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "SNS / Instagram / Username");

            let next = apply(&state, row.input_char(&state, &mut String::new(), 'r'));
            let platforms = next.group("platforms");
            assert_eq!(platforms.group("instagram").text("username"), "r");
            assert!(platforms.shares_field(&state.group("platforms"), "youtube"));
            assert!(platforms
                .group("instagram")
                .shares_field(&state.group("platforms").group("instagram"), "followers"));
            assert!(next.shares_field(&state, "categories"));
        }

        #[test]
        fn test_number_rows_accept_digits_only() {
            let step = step(FlowKind::Influencer, 2);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "Desired fee / Video");

            assert!(row.input_char(&state, &mut String::new(), 'x').is_none());
            let state = apply(&state, row.input_char(&state, &mut String::new(), '5'));
            let state = apply(&state, row.input_char(&state, &mut String::new(), '0'));
            assert_eq!(state.group("desiredFee").number("video"), 50);

            let state = apply(&state, row.backspace(&state, &mut String::new()));
            assert_eq!(state.group("desiredFee").number("video"), 5);
        }

        #[test]
        fn test_backspace_on_empty_text_is_noop() {
            let step = step(FlowKind::Company, 0);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            assert!(rows[0].backspace(&state, &mut String::new()).is_none());
        }

        #[test]
        fn test_option_rows_toggle_in_history_order() {
            let step = step(FlowKind::Company, 1);
            let mut state = blank_state(&[step.clone()]);
            for label in [
                "Target / Age groups / Teens",
                "Target / Age groups / Late 30s",
                "Target / Age groups / Teens",
                "Target / Age groups / Teens",
            ] {
                let rows = layout_rows(&step, &state);
                let row = row_named(&rows, label);
                state = apply(&state, row.activate(&state, &mut String::new()));
            }
            assert_eq!(
                state.group("targetDemographics").list("ageGroups"),
                &["Late 30s".to_string(), "Teens".to_string()]
            );
            let rows = layout_rows(&step, &state);
            assert_eq!(
                row_named(&rows, "Target / Age groups / Teens").display(&state, ""),
                "[x]"
            );
        }

        #[test]
        fn test_select_cycles_through_options() {
            let step = step(FlowKind::Company, 1);
            let mut state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "Target / Gender");
            assert_eq!(row.display(&state, ""), "(unspecified)");

            let mut seen = Vec::new();
            for _ in 0..3 {
                state = apply(&state, row.activate(&state, &mut String::new()));
                seen.push(state.group("targetDemographics").text("gender").to_string());
            }
            assert_eq!(seen, vec!["male", "female", ""]);
        }

        #[test]
        fn test_entry_input_buffers_then_commits_trimmed() {
            let step = step(FlowKind::Influencer, 2);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "NG list / Products (new)");

            let mut draft = String::new();
            for c in " Brand X ".chars() {
                assert!(row.input_char(&state, &mut draft, c).is_none());
            }
            let state = apply(&state, row.activate(&state, &mut draft));
            assert_eq!(
                state.group("ngList").list("products"),
                &["Brand X".to_string()]
            );
            assert!(draft.is_empty());
        }

        #[test]
        fn test_blank_entry_is_not_committed() {
            let step = step(FlowKind::Influencer, 2);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "NG list / Companies (new)");
            let mut draft = "   ".to_string();
            assert!(row.activate(&state, &mut draft).is_none());
            assert_eq!(draft, "   ");
        }

        #[test]
        fn test_remove_record_shifts_later_records() {
            let step = step(FlowKind::Influencer, 2);
            let mut state = blank_state(&[step.clone()]);
            for company in ["First", "Second"] {
                let rows = layout_rows(&step, &state);
                let add = rows
                    .iter()
                    .find(|r| matches!(r.kind, RowKind::AddRecord(_)))
                    .unwrap();
                state = apply(&state, add.activate(&state, &mut String::new()));
                let index = state.records("pastWorks").len() - 1;
                state = state.update(
                    "pastWorks",
                    update_at(state.records("pastWorks"), index, "company", company),
                );
            }

            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "Past work #1 / Period");
            let state = apply(&state, row.remove(&state));
            assert_eq!(state.records("pastWorks").len(), 1);
            assert_eq!(state.records("pastWorks")[0].text("company"), "Second");
        }

        #[test]
        fn test_remove_entry() {
            let state = FormState::new().update(
                "ngList",
                Record::new().update("products", vec!["A".to_string(), "B".to_string()]),
            );
            let step = step(FlowKind::Influencer, 2);
            let rows = layout_rows(&step, &state);
            let row = row_named(&rows, "NG list / Products #1");
            assert_eq!(row.display(&state, ""), "A");

            let state = apply(&state, row.remove(&state));
            assert_eq!(state.group("ngList").list("products"), &["B".to_string()]);
        }

        #[test]
        fn test_backspacing_entry_to_empty_drops_it() {
            let step = step(FlowKind::Influencer, 2);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            let input = row_named(&rows, "NG list / Products (new)");
            let mut draft = "XY".to_string();
            let state = apply(&state, input.activate(&state, &mut draft));

            let rows = layout_rows(&step, &state);
            let entry = row_named(&rows, "NG list / Products #1");
            let state = apply(&state, entry.backspace(&state, &mut draft));
            assert_eq!(state.group("ngList").list("products"), &["X".to_string()]);

            let state = apply(&state, entry.backspace(&state, &mut draft));
            assert!(state.group("ngList").list("products").is_empty());
        }

        #[test]
        fn test_stale_record_path_is_noop() {
            let state = FormState::new().update("pastWorks", Vec::<Record>::new());
            let path = vec![
                Segment::Field("pastWorks".into()),
                Segment::Index(3),
                Segment::Field("company".into()),
            ];
            assert!(apply_at(&state, &path, |_| Some(FieldValue::from("x"))).is_none());
            assert!(read_at(&state, &path).is_none());
        }

        #[test]
        fn test_remove_on_plain_field_is_noop() {
            let step = step(FlowKind::Influencer, 0);
            let state = blank_state(&[step.clone()]);
            let rows = layout_rows(&step, &state);
            assert!(rows[0].remove(&state).is_none());
        }
    }

    mod cursor {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_and_prev_wrap() {
            let mut cursor = FormCursor::default();
            cursor.prev_row(3);
            assert_eq!(cursor.active_row, 2);
            cursor.next_row(3);
            assert_eq!(cursor.active_row, 0);
        }

        #[test]
        fn test_moving_clears_draft() {
            let mut cursor = FormCursor {
                active_row: 0,
                draft: "pending".into(),
            };
            cursor.next_row(2);
            assert!(cursor.draft.is_empty());
        }

        #[test]
        fn test_clamp() {
            let mut cursor = FormCursor {
                active_row: 9,
                draft: String::new(),
            };
            cursor.clamp(4);
            assert_eq!(cursor.active_row, 3);
            cursor.clamp(0);
            assert_eq!(cursor.active_row, 0);
        }
    }
}
