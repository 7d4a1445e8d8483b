//! Collaboration update events.
//!
//! Each successfully applied mutation can be wrapped as one broadcastable
//! event carrying the mutation itself as the payload, so remote peers replay
//! it through the same engine. Transport, ordering, and conflict resolution
//! live outside; last writer wins.

use crate::mutations::Mutation;
use chrono::{DateTime, Utc};
use formcraft_model::fresh_id;
use serde::{Deserialize, Serialize};

/// Coarse event kind for fan-out filtering. One kind per mutation family;
/// duplication broadcasts as an add, reorder and move both broadcast as a
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    PageAdded,
    PageUpdated,
    PageDeleted,
    SectionAdded,
    SectionUpdated,
    SectionDeleted,
    FieldAdded,
    FieldUpdated,
    FieldDeleted,
    FieldMoved,
    ProjectUpdated,
}

/// A single mutation's effect, wrapped for broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationUpdate {
    pub id: String,
    pub kind: UpdateKind,
    /// Ids of the entities the mutation touched (created, updated, or moved).
    pub entity_ids: Vec<String>,
    /// The mutation itself; receivers replay it verbatim.
    pub mutation: Mutation,
    pub actor_id: String,
    pub timestamp: DateTime<Utc>,
    /// Document version the sender observed after applying.
    pub version: u64,
}

impl CollaborationUpdate {
    /// Wrap an already-applied mutation. `version` is the sender's document
    /// version after the apply.
    pub fn new(actor_id: impl Into<String>, mutation: Mutation, version: u64) -> Self {
        Self {
            id: fresh_id("update"),
            kind: kind_of(&mutation),
            entity_ids: entity_ids_of(&mutation),
            mutation,
            actor_id: actor_id.into(),
            timestamp: Utc::now(),
            version,
        }
    }
}

fn kind_of(mutation: &Mutation) -> UpdateKind {
    match mutation {
        Mutation::AddPage { .. } => UpdateKind::PageAdded,
        Mutation::UpdatePage { .. } => UpdateKind::PageUpdated,
        Mutation::DeletePage { .. } => UpdateKind::PageDeleted,
        Mutation::AddSection { .. } => UpdateKind::SectionAdded,
        Mutation::UpdateSection { .. } => UpdateKind::SectionUpdated,
        Mutation::DeleteSection { .. } => UpdateKind::SectionDeleted,
        Mutation::AddField { .. } | Mutation::DuplicateField { .. } => UpdateKind::FieldAdded,
        Mutation::UpdateField { .. } => UpdateKind::FieldUpdated,
        Mutation::DeleteField { .. } => UpdateKind::FieldDeleted,
        Mutation::ReorderFields { .. } | Mutation::MoveField { .. } => UpdateKind::FieldMoved,
        Mutation::UpdateProject { .. } => UpdateKind::ProjectUpdated,
    }
}

fn entity_ids_of(mutation: &Mutation) -> Vec<String> {
    match mutation {
        Mutation::AddPage { page } => vec![page.id.clone()],
        Mutation::UpdatePage { page_id, .. } | Mutation::DeletePage { page_id } => {
            vec![page_id.clone()]
        }
        Mutation::AddSection { page_id, section } => vec![page_id.clone(), section.id.clone()],
        Mutation::UpdateSection { section_id, .. }
        | Mutation::DeleteSection { section_id } => vec![section_id.clone()],
        Mutation::AddField {
            section_id, field, ..
        } => vec![section_id.clone(), field.id.clone()],
        Mutation::UpdateField { field_id, .. } | Mutation::DeleteField { field_id } => {
            vec![field_id.clone()]
        }
        Mutation::DuplicateField { field_id, new_id } => {
            vec![field_id.clone(), new_id.clone()]
        }
        Mutation::ReorderFields { section_id, .. } => vec![section_id.clone()],
        Mutation::MoveField {
            field_id,
            section_id,
            ..
        } => vec![field_id.clone(), section_id.clone()],
        Mutation::UpdateProject { .. } => Vec::new(),
    }
}
