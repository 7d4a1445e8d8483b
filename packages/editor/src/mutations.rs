//! # Document Mutations
//!
//! High-level semantic operations on form documents.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one semantic operation
//! 2. **Validated**: All mutations validate structural constraints first
//! 3. **Replayable**: Entity synthesis (ids, defaults) happens in the
//!    constructors, so applying the same mutation twice to the same base
//!    document gives the same result
//!
//! ## Mutation Semantics
//!
//! ### DeletePage
//! - Cascades removal of contained sections and their field placements
//! - Fields stay in the canonical collection (orphans are permitted)
//! - Fails on the last remaining page: a project always has ≥1 page
//!
//! ### ReorderFields
//! - Replaces a section's id ordering
//! - Fails unless the id set matches the existing set exactly
//!
//! ### MoveField
//! - Atomic relocation of a placement to a new section/column
//! - The field itself never moves; only its placement does

use crate::updates::{FieldUpdates, PageUpdates, ProjectUpdates, SectionUpdates};
use formcraft_model::{fresh_id, Field, FieldType, Page, Project, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Entity kinds referenced by mutation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Page,
    Section,
    Field,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Page => write!(f, "page"),
            EntityKind::Section => write!(f, "section"),
            EntityKind::Field => write!(f, "field"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl MutationError {
    fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Semantic mutations over a form document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Append a page (already synthesized with id, title, navigation).
    AddPage { page: Page },

    UpdatePage {
        page_id: String,
        updates: PageUpdates,
    },

    /// Remove a page and cascade its sections' placements.
    DeletePage { page_id: String },

    /// Append a section to a page.
    AddSection {
        page_id: String,
        section: Section,
    },

    UpdateSection {
        section_id: String,
        updates: SectionUpdates,
    },

    DeleteSection { section_id: String },

    /// Add a field to the canonical collection and place it in a section.
    /// `after_field` wins over `column` when both are set.
    AddField {
        section_id: String,
        column: Option<usize>,
        after_field: Option<String>,
        field: Field,
    },

    UpdateField {
        field_id: String,
        updates: FieldUpdates,
    },

    /// Remove a field from the canonical collection and every placement.
    DeleteField { field_id: String },

    /// Clone a field under `new_id`, inserted right after the source.
    DuplicateField {
        field_id: String,
        new_id: String,
    },

    /// Replace a section's field id ordering. The id set must match.
    ReorderFields {
        section_id: String,
        field_ids: Vec<String>,
    },

    /// Relocate a field placement to another section/column.
    MoveField {
        field_id: String,
        section_id: String,
        column: usize,
        after_field: Option<String>,
    },

    UpdateProject { updates: ProjectUpdates },
}

impl Mutation {
    /// Synthesize an `AddPage` with default navigation; order and title
    /// follow the current page count.
    pub fn add_page(project: &Project) -> Self {
        let count = project.pages.len() as u32;
        Mutation::AddPage {
            page: Page::new(format!("Page {}", count + 1), count),
        }
    }

    /// Synthesize an `AddSection` with a single-column layout; order follows
    /// the page's current section count.
    pub fn add_section(project: &Project, page_id: impl Into<String>) -> Self {
        let page_id = page_id.into();
        let order = project
            .page(&page_id)
            .map(|p| p.sections.len() as u32)
            .unwrap_or(0);
        Mutation::AddSection {
            page_id,
            section: Section::new(order),
        }
    }

    /// Synthesize an `AddField` from a palette field type.
    pub fn add_field_from_palette(section_id: impl Into<String>, field_type: FieldType) -> Self {
        Mutation::AddField {
            section_id: section_id.into(),
            column: None,
            after_field: None,
            field: Field::from_palette(field_type),
        }
    }

    /// Synthesize a `DuplicateField` with a fresh target id.
    pub fn duplicate_field(field_id: impl Into<String>) -> Self {
        Mutation::DuplicateField {
            field_id: field_id.into(),
            new_id: fresh_id("field"),
        }
    }

    /// Short name for logging and undo descriptions.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Mutation::AddPage { .. } => "add_page",
            Mutation::UpdatePage { .. } => "update_page",
            Mutation::DeletePage { .. } => "delete_page",
            Mutation::AddSection { .. } => "add_section",
            Mutation::UpdateSection { .. } => "update_section",
            Mutation::DeleteSection { .. } => "delete_section",
            Mutation::AddField { .. } => "add_field",
            Mutation::UpdateField { .. } => "update_field",
            Mutation::DeleteField { .. } => "delete_field",
            Mutation::DuplicateField { .. } => "duplicate_field",
            Mutation::ReorderFields { .. } => "reorder_fields",
            Mutation::MoveField { .. } => "move_field",
            Mutation::UpdateProject { .. } => "update_project",
        }
    }

    /// Id of the entity this mutation creates, if any.
    pub fn created_id(&self) -> Option<&str> {
        match self {
            Mutation::AddPage { page } => Some(&page.id),
            Mutation::AddSection { section, .. } => Some(&section.id),
            Mutation::AddField { field, .. } => Some(&field.id),
            Mutation::DuplicateField { new_id, .. } => Some(new_id),
            _ => None,
        }
    }

    /// Validate without applying.
    pub fn validate(&self, project: &Project) -> Result<(), MutationError> {
        match self {
            Mutation::AddPage { page } => {
                if project.page(&page.id).is_some() {
                    return Err(MutationError::InvariantViolation(format!(
                        "page id {} already exists",
                        page.id
                    )));
                }
                Ok(())
            }

            Mutation::UpdatePage { page_id, .. } => project
                .page(page_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::not_found(EntityKind::Page, page_id)),

            Mutation::DeletePage { page_id } => {
                if project.page(page_id).is_none() {
                    return Err(MutationError::not_found(EntityKind::Page, page_id));
                }
                if project.pages.len() <= 1 {
                    return Err(MutationError::InvariantViolation(
                        "a project must always have at least one page".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::AddSection { page_id, section } => {
                if project.page(page_id).is_none() {
                    return Err(MutationError::not_found(EntityKind::Page, page_id));
                }
                if project.find_section(&section.id).is_some() {
                    return Err(MutationError::InvariantViolation(format!(
                        "section id {} already exists",
                        section.id
                    )));
                }
                Ok(())
            }

            Mutation::UpdateSection { section_id, .. } => project
                .find_section(section_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id)),

            Mutation::DeleteSection { section_id } => project
                .find_section(section_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id)),

            Mutation::AddField {
                section_id,
                column,
                after_field,
                field,
            } => {
                let section = project
                    .find_section(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                if project.field(&field.id).is_some() {
                    return Err(MutationError::InvariantViolation(format!(
                        "field id {} already exists",
                        field.id
                    )));
                }
                if field.options.is_some() != field.field_type.is_choice() {
                    return Err(MutationError::InvariantViolation(format!(
                        "options are only valid on choice types, not '{}'",
                        field.field_type.name()
                    )));
                }
                if let Some(column) = column {
                    if *column >= section.layout.columns.len() {
                        return Err(MutationError::InvariantViolation(format!(
                            "column {} out of range for section {}",
                            column, section_id
                        )));
                    }
                }
                if let Some(anchor) = after_field {
                    if !section.contains_field(anchor) {
                        return Err(MutationError::not_found(EntityKind::Field, anchor));
                    }
                }
                Ok(())
            }

            Mutation::UpdateField { field_id, updates } => {
                let field = project
                    .field(field_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Field, field_id))?;
                if updates.options.is_some() && !field.field_type.is_choice() {
                    return Err(MutationError::InvariantViolation(format!(
                        "options are only valid on choice types, not '{}'",
                        field.field_type.name()
                    )));
                }
                Ok(())
            }

            Mutation::DeleteField { field_id } => project
                .field(field_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::not_found(EntityKind::Field, field_id)),

            Mutation::DuplicateField { field_id, new_id } => {
                if project.field(field_id).is_none() {
                    return Err(MutationError::not_found(EntityKind::Field, field_id));
                }
                if project.field(new_id).is_some() {
                    return Err(MutationError::InvariantViolation(format!(
                        "field id {} already exists",
                        new_id
                    )));
                }
                Ok(())
            }

            Mutation::ReorderFields {
                section_id,
                field_ids,
            } => {
                let section = project
                    .find_section(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                let existing: HashSet<&str> = section.fields.iter().map(String::as_str).collect();
                let incoming: HashSet<&str> = field_ids.iter().map(String::as_str).collect();
                if existing != incoming || field_ids.len() != section.fields.len() {
                    return Err(MutationError::InvariantViolation(format!(
                        "reorder id set does not match the fields of section {}",
                        section_id
                    )));
                }
                Ok(())
            }

            Mutation::MoveField {
                field_id,
                section_id,
                column,
                after_field,
            } => {
                if project.field(field_id).is_none() {
                    return Err(MutationError::not_found(EntityKind::Field, field_id));
                }
                let target = project
                    .find_section(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                if *column >= target.layout.columns.len() {
                    return Err(MutationError::InvariantViolation(format!(
                        "column {} out of range for section {}",
                        column, section_id
                    )));
                }
                if let Some(anchor) = after_field {
                    if anchor != field_id && !target.contains_field(anchor) {
                        return Err(MutationError::not_found(EntityKind::Field, anchor));
                    }
                }
                Ok(())
            }

            Mutation::UpdateProject { .. } => Ok(()),
        }
    }

    /// Apply to a document. Callers go through [`crate::engine::apply`],
    /// which validates first and keeps the original untouched on failure.
    pub(crate) fn apply(&self, project: &mut Project) -> Result<(), MutationError> {
        match self {
            Mutation::AddPage { page } => {
                project.pages.push(page.clone());
                Ok(())
            }

            Mutation::UpdatePage { page_id, updates } => {
                let page = project
                    .page_mut(page_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Page, page_id))?;
                updates.apply_to(page);
                Ok(())
            }

            Mutation::DeletePage { page_id } => {
                project.pages.retain(|p| p.id != *page_id);
                Ok(())
            }

            Mutation::AddSection { page_id, section } => {
                let page = project
                    .page_mut(page_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Page, page_id))?;
                page.sections.push(section.clone());
                Ok(())
            }

            Mutation::UpdateSection {
                section_id,
                updates,
            } => {
                let section = project
                    .find_section_mut(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                updates.apply_to(section);
                Ok(())
            }

            Mutation::DeleteSection { section_id } => {
                for page in &mut project.pages {
                    page.sections.retain(|s| s.id != *section_id);
                }
                Ok(())
            }

            Mutation::AddField {
                section_id,
                column,
                after_field,
                field,
            } => {
                let mut field = field.clone();
                if let Some(metadata) = &mut field.metadata {
                    metadata.section = Some(section_id.clone());
                }
                let field_id = field.id.clone();
                project.fields.push(field);

                let section = project
                    .find_section_mut(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                match after_field {
                    Some(anchor) => section.insert_field_after(anchor, field_id),
                    None => section.push_field(field_id, column.unwrap_or(0)),
                }
                Ok(())
            }

            Mutation::UpdateField { field_id, updates } => {
                let field = project
                    .field_mut(field_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Field, field_id))?;
                updates.apply_to(field);
                Ok(())
            }

            Mutation::DeleteField { field_id } => {
                project.fields.retain(|f| f.id != *field_id);
                for page in &mut project.pages {
                    for section in &mut page.sections {
                        section.remove_field(field_id);
                    }
                }
                Ok(())
            }

            Mutation::DuplicateField { field_id, new_id } => {
                let source = project
                    .field(field_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Field, field_id))?;
                let copy = source.duplicate_as(new_id.clone());

                // Insert into the arena immediately after the source.
                let arena_pos = project
                    .fields
                    .iter()
                    .position(|f| f.id == *field_id)
                    .map(|p| p + 1)
                    .unwrap_or(project.fields.len());
                project.fields.insert(arena_pos, copy);

                // Place right after the source in its containing section.
                let container = project.container_of(field_id).map(|s| s.id.clone());
                if let Some(section_id) = container {
                    if let Some(section) = project.find_section_mut(&section_id) {
                        section.insert_field_after(field_id, new_id.clone());
                    }
                }
                Ok(())
            }

            Mutation::ReorderFields {
                section_id,
                field_ids,
            } => {
                let section = project
                    .find_section_mut(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                section.fields = field_ids.clone();
                section.layout.reorder(field_ids);
                Ok(())
            }

            Mutation::MoveField {
                field_id,
                section_id,
                column,
                after_field,
            } => {
                for page in &mut project.pages {
                    for section in &mut page.sections {
                        section.remove_field(field_id);
                    }
                }
                let target = project
                    .find_section_mut(section_id)
                    .ok_or_else(|| MutationError::not_found(EntityKind::Section, section_id))?;
                match after_field {
                    Some(anchor) if target.contains_field(anchor) => {
                        target.insert_field_after(anchor, field_id.clone());
                    }
                    _ => target.push_field(field_id.clone(), *column),
                }
                if let Some(field) = project.field_mut(field_id) {
                    if let Some(metadata) = &mut field.metadata {
                        metadata.section = Some(section_id.clone());
                    }
                }
                Ok(())
            }

            Mutation::UpdateProject { updates } => {
                updates.apply_to(project);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization_round_trip() {
        let mutation = Mutation::DeleteField {
            field_id: "field-123".to_string(),
        };
        let json = serde_json::to_string(&mutation).unwrap();
        let back: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, back);
    }

    #[test]
    fn test_validate_rejects_unknown_ids() {
        let project = Project::new("Survey");
        let mutation = Mutation::DeleteField {
            field_id: "nope".to_string(),
        };
        assert_eq!(
            mutation.validate(&project),
            Err(MutationError::NotFound {
                kind: EntityKind::Field,
                id: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_add_page_synthesizes_title_from_count() {
        let project = Project::new("Survey");
        let mutation = Mutation::add_page(&project);
        match &mutation {
            Mutation::AddPage { page } => {
                assert_eq!(page.title, "Page 2");
                assert_eq!(page.order, 1);
                assert!(page.navigation.show_previous);
            }
            other => panic!("unexpected mutation: {:?}", other),
        }
    }

    #[test]
    fn test_created_id_reported_for_creations() {
        let project = Project::new("Survey");
        let mutation = Mutation::add_page(&project);
        assert!(mutation.created_id().is_some());
        let mutation = Mutation::UpdateProject {
            updates: ProjectUpdates::default(),
        };
        assert!(mutation.created_id().is_none());
    }
}
