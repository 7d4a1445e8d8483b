//! # FormCraft Editor
//!
//! Document editing engine for form projects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Project / Page / Section / Field     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations + placement + events      │
//! │  - Validate-then-apply mutations            │
//! │  - Pure engine entry point (new document)   │
//! │  - Drag gesture → mutation resolution       │
//! │  - Collaboration update events              │
//! │  - Undo/redo, per-actor sessions            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Semantics
//!
//! - Operations are all-or-nothing: a failed mutation returns an error and
//!   the input document is untouched.
//! - Every successful mutation bumps `version` by exactly 1 and refreshes
//!   `updated_at`.
//! - Deleting a page or section removes field *placements*; the fields stay
//!   in the project's canonical collection.
//! - Remote collaboration updates are replayed through the same engine in
//!   receipt order; last writer wins, no merge is attempted.

mod engine;
mod events;
mod mutations;
mod placement;
mod session;
mod undo_stack;
mod updates;

pub use engine::{apply, add_field, add_page, add_section, duplicate_field, Applied};
pub use events::{CollaborationUpdate, UpdateKind};
pub use mutations::{EntityKind, Mutation, MutationError};
pub use placement::{resolve, DragSource, DropTarget};
pub use session::EditSession;
pub use undo_stack::UndoStack;
pub use updates::{FieldUpdates, PageUpdates, ProjectUpdates, SectionUpdates};

// Re-export the model root for convenience
pub use formcraft_model::Project;
