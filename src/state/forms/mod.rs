//! Form domain layer
//!
//! Multi-step form composition: an immutable field tree with single-field
//! updates, toggle-set and repeatable-group helpers, and the wizard session
//! that sequences steps over that tree.

mod binding;
mod field;
mod flows;
mod form_state;
mod repeatable;
mod schema;
mod toggle;
mod wizard;

pub use binding::{layout_rows, FieldEdit, FieldRow, FormCursor, RowKind};
pub use flows::FlowKind;
pub use form_state::{FormState, Record};
pub use wizard::{Submission, WizardSession};
