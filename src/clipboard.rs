//! Copy, cut, and paste of subgraphs.
//!
//! The clipboard stores detached copies of nodes and of the edges that run
//! between them. Pasting materializes fresh cells with new ids, shifted by a
//! fixed offset so the copy does not land exactly on the original; pasting
//! again cascades the offset.

use tracing::debug;

use crate::graph::{Anchor, FlowGraph};
use crate::selection::CellId;
use crate::shape::NodeShape;
use crate::style::{EdgeStyle, NodeData};

/// How far pasted cells are shifted from the copied originals.
pub const PASTE_OFFSET: f32 = 32.0;

#[derive(Clone)]
struct CopiedNode {
    /// Id the node had in the source graph, used only as a remap key.
    key: i32,
    shape: NodeShape,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    data: NodeData,
}

#[derive(Clone)]
struct CopiedEdge {
    /// Anchors referencing [`CopiedNode::key`]s.
    source: Anchor,
    target: Anchor,
    style: EdgeStyle,
}

pub struct Clipboard {
    nodes: Vec<CopiedNode>,
    edges: Vec<CopiedEdge>,
    offset: f32,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self::with_offset(PASTE_OFFSET)
    }

    pub fn with_offset(offset: f32) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Copy the given cells out of the graph.
    ///
    /// Selected edges are copied only when both of their endpoint nodes are
    /// part of the same copy; an edge cannot be pasted without its nodes.
    /// Unknown ids are skipped. Replaces any previous clipboard content.
    pub fn copy(&mut self, graph: &FlowGraph, cells: impl IntoIterator<Item = CellId>) {
        self.clear();
        let mut edge_ids = Vec::new();
        for cell in cells {
            match cell {
                CellId::Node(id) => {
                    if let Some(node) = graph.node(id) {
                        self.nodes.push(CopiedNode {
                            key: node.id,
                            shape: node.shape.clone(),
                            x: node.x,
                            y: node.y,
                            width: node.width,
                            height: node.height,
                            data: node.data.clone(),
                        });
                    }
                }
                CellId::Edge(id) => edge_ids.push(id),
            }
        }
        for id in edge_ids {
            if let Some(edge) = graph.edge(id) {
                let both_copied = self.has_key(edge.source.node) && self.has_key(edge.target.node);
                if both_copied {
                    self.edges.push(CopiedEdge {
                        source: edge.source,
                        target: edge.target,
                        style: edge.style.clone(),
                    });
                }
            }
        }
        debug!(nodes = self.nodes.len(), edges = self.edges.len(), "cells copied");
    }

    /// Copy the given cells, then remove them from the graph.
    pub fn cut(&mut self, graph: &mut FlowGraph, cells: impl IntoIterator<Item = CellId>) {
        let cells: Vec<CellId> = cells.into_iter().collect();
        self.copy(graph, cells.iter().copied());
        for cell in cells {
            match cell {
                // Cascades over anchored edges, including uncopied ones
                CellId::Node(id) => {
                    graph.remove_node(id);
                }
                CellId::Edge(id) => {
                    graph.remove_edge(id);
                }
            }
        }
    }

    /// Materialize the clipboard content into the graph.
    ///
    /// Every pasted cell gets a fresh id; internal edges are re-anchored to
    /// the pasted nodes and re-routed at their new positions. Returns the
    /// new cells so the caller can select them, empty if the clipboard is
    /// empty.
    pub fn paste(&mut self, graph: &mut FlowGraph) -> Vec<CellId> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut created = Vec::new();
        let mut remap = Vec::with_capacity(self.nodes.len());
        for copied in &self.nodes {
            let id = graph.add_node(
                copied.shape.clone(),
                (
                    copied.x + self.offset,
                    copied.y + self.offset,
                    copied.width,
                    copied.height,
                ),
                copied.data.clone(),
            );
            remap.push((copied.key, id));
            created.push(CellId::Node(id));
        }

        let lookup = |key: i32| remap.iter().find(|(k, _)| *k == key).map(|(_, id)| *id);
        for copied in &self.edges {
            let (Some(source), Some(target)) =
                (lookup(copied.source.node), lookup(copied.target.node))
            else {
                continue;
            };
            if let Ok(id) = graph.connect(
                Anchor::new(source, copied.source.magnet),
                Anchor::new(target, copied.target.magnet),
            ) {
                let style = copied.style.clone();
                graph.update_edge_style(id, move |s| *s = style);
                created.push(CellId::Edge(id));
            }
        }

        // Cascade: the next paste of the same content lands further out
        for node in &mut self.nodes {
            node.x += self.offset;
            node.y += self.offset;
        }

        debug!(cells = created.len(), "cells pasted");
        created
    }

    fn has_key(&self, key: i32) -> bool {
        self.nodes.iter().any(|n| n.key == key)
    }
}
