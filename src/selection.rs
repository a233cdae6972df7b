//! Selection state over nodes and edges.
//!
//! The diagram selects cells, not just nodes: a rubberband sweep picks up
//! edges too, and delete acts on whatever is selected. [`SelectionManager`]
//! keeps the canonical set and mirrors it into Slint models for the UI.

use std::collections::HashSet;

use slint::{Model, VecModel};

/// A selectable diagram cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellId {
    Node(i32),
    Edge(i32),
}

impl CellId {
    pub fn node_id(self) -> Option<i32> {
        match self {
            CellId::Node(id) => Some(id),
            CellId::Edge(_) => None,
        }
    }

    pub fn edge_id(self) -> Option<i32> {
        match self {
            CellId::Edge(id) => Some(id),
            CellId::Node(_) => None,
        }
    }
}

#[derive(Default)]
pub struct SelectionManager {
    selected: HashSet<CellId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on a cell.
    ///
    /// A plain click makes the cell the sole selection; a modified click
    /// (shift held) toggles the cell in and out of the current set.
    pub fn handle_interaction(&mut self, cell: CellId, shift_held: bool) {
        if shift_held {
            if !self.selected.remove(&cell) {
                self.selected.insert(cell);
            }
        } else {
            if self.selected.len() == 1 && self.selected.contains(&cell) {
                return;
            }
            self.selected.clear();
            self.selected.insert(cell);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection with the cells a rubberband sweep caught.
    pub fn replace_with_boxed(
        &mut self,
        nodes: impl IntoIterator<Item = i32>,
        edges: impl IntoIterator<Item = i32>,
    ) {
        self.selected.clear();
        self.selected.extend(nodes.into_iter().map(CellId::Node));
        self.selected.extend(edges.into_iter().map(CellId::Edge));
    }

    /// Replace the selection with an arbitrary cell set.
    pub fn replace_selection(&mut self, cells: impl IntoIterator<Item = CellId>) {
        self.selected.clear();
        self.selected.extend(cells);
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.selected.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.selected.iter().copied()
    }

    /// Ids of the selected nodes only.
    pub fn selected_nodes(&self) -> Vec<i32> {
        self.selected.iter().filter_map(|c| c.node_id()).collect()
    }

    /// Ids of the selected edges only.
    pub fn selected_edges(&self) -> Vec<i32> {
        self.selected.iter().filter_map(|c| c.edge_id()).collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Mirror the selection into per-kind Slint models for highlighting.
    pub fn sync_to_models(&self, nodes: &VecModel<i32>, edges: &VecModel<i32>) {
        // Clear and repopulate so the models match exactly
        while nodes.row_count() > 0 {
            nodes.remove(0);
        }
        while edges.row_count() > 0 {
            edges.remove(0);
        }
        for cell in &self.selected {
            match cell {
                CellId::Node(id) => nodes.push(*id),
                CellId::Edge(id) => edges.push(*id),
            }
        }
    }

    /// Rebuild the selection from per-kind Slint models (after the UI edited
    /// them directly).
    pub fn sync_from_models(
        &mut self,
        nodes: &dyn Model<Data = i32>,
        edges: &dyn Model<Data = i32>,
    ) {
        self.selected.clear();
        for i in 0..nodes.row_count() {
            if let Some(id) = nodes.row_data(i) {
                self.selected.insert(CellId::Node(id));
            }
        }
        for i in 0..edges.row_count() {
            if let Some(id) = edges.row_data(i) {
                self.selected.insert(CellId::Edge(id));
            }
        }
    }
}
