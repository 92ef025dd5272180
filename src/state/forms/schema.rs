//! Step and field descriptors

use super::field::FieldValue;
use super::form_state::{FormState, Record};
use std::fmt;
use std::sync::Arc;

/// Shape of a field as the step views see it
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text { multiline: bool },
    Number,
    /// Multi-select over a fixed catalog, stored as a toggle-set
    Choice(&'static [&'static str]),
    /// Single select; the empty string means unspecified
    Select(&'static [&'static str]),
    Group(Vec<FieldSpec>),
    /// Repeatable group of records shaped by the children
    Records(Vec<FieldSpec>),
    /// Free-text list with add/remove
    Entries,
}

/// A named field with its label and kind
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text { multiline: false })
    }

    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text { multiline: true })
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn choice(name: &str, label: &str, options: &'static [&'static str]) -> Self {
        Self::new(name, label, FieldKind::Choice(options))
    }

    pub fn select(name: &str, label: &str, options: &'static [&'static str]) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn group(name: &str, label: &str, children: Vec<FieldSpec>) -> Self {
        Self::new(name, label, FieldKind::Group(children))
    }

    pub fn records(name: &str, label: &str, children: Vec<FieldSpec>) -> Self {
        Self::new(name, label, FieldKind::Records(children))
    }

    pub fn entries(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Entries)
    }

    /// Empty value for this field
    pub fn default_value(&self) -> FieldValue {
        match &self.kind {
            FieldKind::Text { .. } | FieldKind::Select(_) => FieldValue::Text(String::new()),
            FieldKind::Number => FieldValue::Number(0),
            FieldKind::Choice(_) | FieldKind::Entries => FieldValue::List(Vec::new()),
            FieldKind::Group(children) => FieldValue::Group(blank_record(children)),
            FieldKind::Records(_) => FieldValue::Records(Vec::new()),
        }
    }
}

/// A record holding the default value of every field in `fields`
pub fn blank_record(fields: &[FieldSpec]) -> Record {
    Record::from_fields(
        fields
            .iter()
            .map(|field| (field.name.as_str(), field.default_value())),
    )
}

/// Union of the defaults of every step's owned fields
pub fn blank_state(steps: &[Step]) -> Record {
    steps
        .iter()
        .fold(Record::new(), |acc, step| acc.with_defaults(&step.defaults()))
}

/// Predicate gating forward navigation out of a step
#[derive(Clone)]
pub struct Readiness(Arc<dyn Fn(&FormState) -> bool + Send + Sync>);

impl Readiness {
    pub fn always() -> Self {
        Self::custom(|_| true)
    }

    /// Ready when the top-level field is present and not blank
    pub fn non_empty(field: &'static str) -> Self {
        Self::custom(move |state| state.get(field).is_some_and(|value| !value.is_blank()))
    }

    /// Ready when `group.field` is present and not blank
    pub fn non_empty_in(group: &'static str, field: &'static str) -> Self {
        Self::custom(move |state| {
            state
                .group(group)
                .get(field)
                .is_some_and(|value| !value.is_blank())
        })
    }

    pub fn custom(predicate: impl Fn(&FormState) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Ready when every predicate holds
    pub fn all(parts: Vec<Readiness>) -> Self {
        Self::custom(move |state| parts.iter().all(|part| part.check(state)))
    }

    pub fn check(&self, state: &FormState) -> bool {
        (self.0)(state)
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Readiness(..)")
    }
}

/// One screen's worth of fields plus its readiness predicate
#[derive(Debug, Clone)]
pub struct Step {
    pub title: String,
    pub fields: Vec<FieldSpec>,
    readiness: Readiness,
}

impl Step {
    /// Create an always-ready step
    pub fn new(title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.to_string(),
            fields,
            readiness: Readiness::always(),
        }
    }

    pub fn ready_when(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    /// Top-level fields this step owns
    #[cfg(test)]
    pub fn owned_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn is_ready(&self, state: &FormState) -> bool {
        self.readiness.check(state)
    }

    pub fn defaults(&self) -> Record {
        blank_record(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GENDERS: &[&str] = &["", "male", "female"];

    mod field_spec {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_values_by_kind() {
            assert_eq!(FieldSpec::text("a", "A").default_value(), FieldValue::from(""));
            assert_eq!(FieldSpec::number("n", "N").default_value(), FieldValue::Number(0));
            assert_eq!(
                FieldSpec::choice("c", "C", &["x"]).default_value(),
                FieldValue::List(vec![])
            );
            assert_eq!(
                FieldSpec::select("g", "G", GENDERS).default_value(),
                FieldValue::from("")
            );
            assert_eq!(
                FieldSpec::records("r", "R", vec![]).default_value(),
                FieldValue::Records(vec![])
            );
        }

        #[test]
        fn test_group_default_is_nested_blank_record() {
            let spec = FieldSpec::group(
                "budget",
                "Budget",
                vec![FieldSpec::number("min", "Min"), FieldSpec::number("max", "Max")],
            );
            let value = spec.default_value();
            let record = value.as_group().unwrap();
            assert_eq!(record.len(), 2);
            assert_eq!(record.number("max"), 0);
        }
    }

    mod readiness {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_always() {
            assert!(Readiness::always().check(&FormState::new()));
        }

        #[test]
        fn test_non_empty_ignores_whitespace() {
            let ready = Readiness::non_empty("username");
            assert!(!ready.check(&FormState::new()));
            assert!(!ready.check(&FormState::new().update("username", "  ")));
            assert!(ready.check(&FormState::new().update("username", "alice")));
        }

        #[test]
        fn test_non_empty_in_group() {
            let ready = Readiness::non_empty_in("contactPerson", "name");
            let state = FormState::new()
                .update("contactPerson", Record::new().update("name", "Sato"));
            assert!(ready.check(&state));
            assert!(!ready.check(&FormState::new()));
        }

        #[test]
        fn test_all_requires_every_part() {
            let ready = Readiness::all(vec![
                Readiness::non_empty("name"),
                Readiness::non_empty("email"),
            ]);
            let state = FormState::new().update("name", "Rin");
            assert!(!ready.check(&state));
            assert!(ready.check(&state.update("email", "rin@example.com")));
        }
    }

    mod step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_step_is_always_ready() {
            let step = Step::new("Bio", vec![FieldSpec::multiline("bio", "Bio")]);
            assert!(step.is_ready(&FormState::new()));
        }

        #[test]
        fn test_owned_fields_and_defaults() {
            let step = Step::new(
                "Profile",
                vec![FieldSpec::text("name", "Name"), FieldSpec::entries("ng", "NG")],
            )
            .ready_when(Readiness::non_empty("name"));

            let owned: Vec<_> = step.owned_fields().collect();
            assert_eq!(owned, vec!["name", "ng"]);
            assert!(!step.is_ready(&step.defaults()));
            assert_eq!(step.defaults().list("ng").len(), 0);
        }
    }
}
