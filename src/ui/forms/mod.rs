//! Form rendering module
//!
//! - `field_renderer`: row lines and the active field editor
//! - `wizard_form`: the step view of a running wizard

mod field_renderer;
mod wizard_form;

pub use wizard_form::draw_wizard;
