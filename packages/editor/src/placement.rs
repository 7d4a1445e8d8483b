//! Drag gesture resolution.
//!
//! Turns a (source, target) drag descriptor into a concrete mutation, or
//! into nothing when the drop lands outside any valid container. A cancelled
//! gesture is not an error; the caller just doesn't apply anything.

use crate::mutations::Mutation;
use formcraft_model::{Field, FieldType, Project};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSource {
    /// A palette item: dropping it creates a fresh field of this type.
    Palette { field_type: FieldType },
    /// A field already placed in the document.
    Existing { field_id: String },
}

/// Where the drag was released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropTarget {
    /// A section's terminal drop zone, optionally a specific column.
    Section {
        section_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column: Option<usize>,
    },
    /// The drop zone immediately after an existing field.
    AfterField { field_id: String },
}

/// Resolve a gesture into a mutation. `None` means the gesture is cancelled:
/// the target did not resolve to a real container, or the move is a self-drop.
/// A field is never fabricated without a resolved container.
pub fn resolve(project: &Project, source: &DragSource, target: &DropTarget) -> Option<Mutation> {
    let mutation = match source {
        DragSource::Palette { field_type } => {
            let (section_id, column, after_field) = resolve_target(project, target)?;
            Mutation::AddField {
                section_id,
                column,
                after_field,
                field: Field::from_palette(*field_type),
            }
        }
        DragSource::Existing { field_id } => {
            project.field(field_id)?;
            if let DropTarget::AfterField { field_id: anchor } = target {
                if anchor == field_id {
                    return None;
                }
            }
            let (section_id, column, after_field) = resolve_target(project, target)?;
            Mutation::MoveField {
                field_id: field_id.clone(),
                section_id,
                column: column.unwrap_or(0),
                after_field,
            }
        }
    };
    trace!(op = mutation.kind_name(), "drag gesture resolved");
    Some(mutation)
}

/// Normalize a drop target to (section, column, anchor). `None` when the
/// target references nothing real.
fn resolve_target(
    project: &Project,
    target: &DropTarget,
) -> Option<(String, Option<usize>, Option<String>)> {
    match target {
        DropTarget::Section { section_id, column } => {
            let section = project.find_section(section_id)?;
            if let Some(column) = column {
                if *column >= section.layout.columns.len() {
                    return None;
                }
            }
            Some((section_id.clone(), *column, None))
        }
        DropTarget::AfterField { field_id } => {
            let container = project.container_of(field_id)?;
            Some((container.id.clone(), None, Some(field_id.clone())))
        }
    }
}
