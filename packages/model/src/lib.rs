//! # FormCraft Model
//!
//! The form document model: a `Project` owns pages, pages own sections,
//! sections place fields into column layouts. Fields themselves live in one
//! canonical collection on the project (the arena) and are referenced by id
//! everywhere else.
//!
//! ## Ownership
//!
//! ```text
//! Project
//! ├── fields: Vec<Field>          ← the arena (single authority)
//! └── pages: Vec<Page>
//!     └── sections: Vec<Section>
//!         ├── fields: Vec<String>    ← ordered field ids
//!         └── layout.columns[n].fields: Vec<String>
//! ```
//!
//! Sections and columns never hold `Field` values, only ids. There is
//! exactly one place that can go stale, and `Project::audit` reports it.

pub mod conditional;
pub mod field;
pub mod id;
pub mod layout;
pub mod page;
pub mod project;
pub mod rules;
pub mod section;

pub use conditional::{
    Condition, ConditionOperator, ConditionalAction, ConditionalRules, LogicalOperator,
};
pub use field::{Alignment, Field, FieldMetadata, FieldStyling, FieldType, FieldWidth};
pub use id::fresh_id;
pub use layout::{Column, Layout, LayoutAlignment, LayoutType};
pub use page::{NavigationConfig, Page};
pub use project::{
    AccessibilitySettings, AnimationPreset, DocumentWarning, LayoutOrientation, Project, Settings,
    Theme, ValidationTiming, WarningLevel,
};
pub use rules::{RegexCompileError, ValidationRules};
pub use section::Section;
