//! Undo and redo over whole-graph snapshots.
//!
//! [`FlowGraph`] is a value, so history is a pair of snapshot stacks:
//! callers record a checkpoint before each user-visible mutation and swap
//! graphs on undo/redo. Restored graphs are always internally consistent
//! because snapshots are taken between mutations, never during one.

use crate::graph::FlowGraph;

/// Default number of undo steps retained.
pub const DEFAULT_CAPACITY: usize = 100;

pub struct History {
    undo: Vec<FlowGraph>,
    redo: Vec<FlowGraph>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the state the graph is about to leave.
    ///
    /// Any redo branch is discarded: after a new mutation there is nothing
    /// to redo onto. The oldest snapshot is dropped once capacity is hit.
    pub fn checkpoint(&mut self, graph: &FlowGraph) {
        self.redo.clear();
        if self.undo.len() == self.capacity {
            self.undo.remove(0);
        }
        self.undo.push(graph.clone());
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Step back one checkpoint, exchanging the current graph for the saved
    /// one. Returns `None` (leaving `current` in place) with empty history.
    pub fn undo(&mut self, current: &FlowGraph) -> Option<FlowGraph> {
        let restored = self.undo.pop()?;
        self.redo.push(current.clone());
        Some(restored)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &FlowGraph) -> Option<FlowGraph> {
        let restored = self.redo.pop()?;
        self.undo.push(current.clone());
        Some(restored)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
