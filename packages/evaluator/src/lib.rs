//! # FormCraft Evaluator
//!
//! Runtime evaluation over form documents: conditional visibility, per-field
//! validation, render-plan resolution, and page/section navigation.
//!
//! Everything here is a pure function of `(document, values)`. The values
//! map is the single source of truth for what a respondent has entered;
//! evaluation never mutates the document.

mod conditional;
mod navigation;
mod render;
mod validation;

pub use conditional::{evaluate, evaluate_checked, evaluate_in, DataQualityWarning, Effect, ValueMap};
pub use navigation::{first_section_id, next_page_index, next_section_id};
pub use render::{
    resolve_form, submission_values, validate_visible, ControlArchetype, FormPlan, RenderedField,
    RenderedPage, RenderedSection,
};
pub use validation::{validate_field, FieldError};
