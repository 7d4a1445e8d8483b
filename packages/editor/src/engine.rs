//! Pure mutation entry point: validate, clone, apply, stamp.
//!
//! The input document is never modified. A failed mutation returns the error
//! and leaves the caller holding the original; a successful one returns a new
//! document with `version` bumped by exactly 1.

use crate::mutations::{Mutation, MutationError};
use formcraft_model::{FieldType, Project};
use tracing::debug;

/// The result of a successful mutation.
#[derive(Debug, Clone)]
pub struct Applied {
    pub project: Project,
    /// Id of the entity the mutation created, when it created one.
    pub created_id: Option<String>,
}

/// Apply a mutation to a document, producing a new document.
///
/// All-or-nothing: validation failures and apply failures both leave the
/// input untouched and bump nothing.
pub fn apply(project: &Project, mutation: &Mutation) -> Result<Applied, MutationError> {
    mutation.validate(project)?;

    let mut next = project.clone();
    mutation.apply(&mut next)?;
    next.touch();

    debug!(
        op = mutation.kind_name(),
        version = next.version,
        created = mutation.created_id(),
        "mutation applied"
    );

    Ok(Applied {
        project: next,
        created_id: mutation.created_id().map(str::to_owned),
    })
}

/// Append a fresh page. Returns the new document and the page id.
pub fn add_page(project: &Project) -> Result<(Project, String), MutationError> {
    apply_created(project, Mutation::add_page(project))
}

/// Append a fresh section to a page. Returns the new document and the
/// section id.
pub fn add_section(
    project: &Project,
    page_id: &str,
) -> Result<(Project, String), MutationError> {
    apply_created(project, Mutation::add_section(project, page_id))
}

/// Add a palette-default field to a section. Returns the new document and
/// the field id.
pub fn add_field(
    project: &Project,
    section_id: &str,
    field_type: FieldType,
) -> Result<(Project, String), MutationError> {
    apply_created(project, Mutation::add_field_from_palette(section_id, field_type))
}

/// Duplicate a field in place. Returns the new document and the copy's id.
pub fn duplicate_field(
    project: &Project,
    field_id: &str,
) -> Result<(Project, String), MutationError> {
    apply_created(project, Mutation::duplicate_field(field_id))
}

fn apply_created(
    project: &Project,
    mutation: Mutation,
) -> Result<(Project, String), MutationError> {
    // The creation constructors always synthesize an id.
    let id = mutation.created_id().map(str::to_owned).unwrap_or_default();
    let applied = apply(project, &mutation)?;
    Ok((applied.project, id))
}
