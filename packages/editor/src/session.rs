//! Per-actor edit sessions.
//!
//! One session owns one in-memory document and drives every local change
//! through the engine. Local mutations are recorded for undo and queued in
//! the outbox for broadcast; remote updates are replayed in receipt order
//! and never enter this actor's undo history.

use crate::engine;
use crate::events::CollaborationUpdate;
use crate::mutations::{Mutation, MutationError};
use crate::placement::{resolve, DragSource, DropTarget};
use crate::undo_stack::UndoStack;
use formcraft_model::Project;
use tracing::{info, warn};

#[derive(Debug)]
pub struct EditSession {
    actor_id: String,
    project: Project,
    history: UndoStack,
    outbox: Vec<CollaborationUpdate>,
}

impl EditSession {
    pub fn new(actor_id: impl Into<String>, project: Project) -> Self {
        Self {
            actor_id: actor_id.into(),
            project,
            history: UndoStack::new(),
            outbox: Vec::new(),
        }
    }

    /// Start a session on a brand-new document.
    pub fn create(actor_id: impl Into<String>, title: impl Into<String>) -> Self {
        let actor_id = actor_id.into();
        let mut project = Project::new(title);
        project.created_by = Some(actor_id.clone());
        Self::new(actor_id, project)
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Apply a local mutation: validate, swap in the new document, record
    /// the old one for undo, and queue a broadcast event. Returns the id of
    /// any entity the mutation created.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<String>, MutationError> {
        let applied = engine::apply(&self.project, &mutation)?;
        let before = std::mem::replace(&mut self.project, applied.project);
        self.history.record(before);
        self.outbox.push(CollaborationUpdate::new(
            self.actor_id.clone(),
            mutation,
            self.project.version,
        ));
        Ok(applied.created_id)
    }

    /// Resolve and apply a drag gesture. A cancelled gesture returns
    /// `Ok(None)` without touching the document.
    pub fn drag(
        &mut self,
        source: &DragSource,
        target: &DropTarget,
    ) -> Result<Option<String>, MutationError> {
        match resolve(&self.project, source, target) {
            Some(mutation) => self.apply(mutation),
            None => Ok(None),
        }
    }

    /// Replay a remote actor's update in receipt order. Last writer wins;
    /// an update that no longer validates against this replica is dropped.
    pub fn apply_remote(&mut self, update: &CollaborationUpdate) {
        if update.actor_id == self.actor_id {
            return;
        }
        match engine::apply(&self.project, &update.mutation) {
            Ok(applied) => {
                info!(
                    actor = %update.actor_id,
                    op = update.mutation.kind_name(),
                    "remote update applied"
                );
                self.project = applied.project;
            }
            Err(err) => {
                warn!(
                    actor = %update.actor_id,
                    op = update.mutation.kind_name(),
                    error = %err,
                    "remote update dropped"
                );
            }
        }
    }

    /// Take the queued broadcast events, leaving the outbox empty.
    pub fn drain_outbox(&mut self) -> Vec<CollaborationUpdate> {
        std::mem::take(&mut self.outbox)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step the document back one local mutation.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.project.clone()) {
            Some(previous) => {
                self.project = previous;
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone mutation.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.project.clone()) {
            Some(next) => {
                self.project = next;
                true
            }
            None => false,
        }
    }
}
