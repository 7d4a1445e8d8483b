//! Snapshot-based undo/redo.
//!
//! Mutations are pure and return fresh documents, so history is just a stack
//! of snapshots. Recording a new state clears the redo branch, the usual
//! linear-history model.

use formcraft_model::Project;

#[derive(Debug)]
pub struct UndoStack {
    undo: Vec<Project>,
    redo: Vec<Project>,
    /// Bounded history; the oldest snapshot is dropped past this.
    limit: usize,
}

const DEFAULT_LIMIT: usize = 100;

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state being replaced. Call with the document as it was
    /// *before* a successful mutation.
    pub fn record(&mut self, before: Project) {
        if self.undo.len() >= self.limit {
            self.undo.remove(0);
        }
        self.undo.push(before);
        self.redo.clear();
    }

    /// Step back. `current` is pushed onto the redo branch.
    pub fn undo(&mut self, current: Project) -> Option<Project> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Project) -> Option<Project> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
