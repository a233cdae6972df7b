//! The owned graph context: nodes, magnet-anchored edges, and the queries
//! and mutations the editor is built on.
//!
//! [`FlowGraph`] is an explicit value, not ambient global state; an
//! application can hold several independent graphs and test them without any
//! rendering backend. Every public mutation leaves the graph consistent
//! before returning: cached edge paths match current magnet positions, and no
//! edge ever references a removed node.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::connector::{ConnectorRegistry, PathData, Point};
use crate::hit_test::{self, NodeBounds};
use crate::shape::NodeShape;
use crate::style::{EdgeStyle, NodeData};

/// A named connection point on a node's boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Magnet {
    Top,
    Right,
    Bottom,
    Left,
}

impl Magnet {
    pub const ALL: [Magnet; 4] = [Magnet::Top, Magnet::Right, Magnet::Bottom, Magnet::Left];
}

/// One endpoint of an edge: a node plus the magnet it attaches to.
///
/// Anchors record the relation only; they do not own the node. Removing a
/// node removes every edge anchored to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub node: i32,
    pub magnet: Magnet,
}

impl Anchor {
    pub fn new(node: i32, magnet: Magnet) -> Self {
        Self { node, magnet }
    }
}

/// A diagram element with geometry, a shape tag, and a data payload.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: i32,
    pub shape: NodeShape,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub data: NodeData,
    /// Whether this node's magnets are drawn (toggled on hover).
    pub magnets_visible: bool,
}

impl Node {
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Position of a magnet: the midpoint of the corresponding bounds edge.
    pub fn magnet_position(&self, magnet: Magnet) -> Point {
        match magnet {
            Magnet::Top => Point::new(self.x + self.width / 2.0, self.y),
            Magnet::Right => Point::new(self.x + self.width, self.y + self.height / 2.0),
            Magnet::Bottom => Point::new(self.x + self.width / 2.0, self.y + self.height),
            Magnet::Left => Point::new(self.x, self.y + self.height / 2.0),
        }
    }
}

impl NodeBounds for &Node {
    fn id(&self) -> i32 {
        self.id
    }
    fn rect(&self) -> (f32, f32, f32, f32) {
        self.bounds()
    }
}

/// A directed connector between two nodes' magnets.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: i32,
    pub source: Anchor,
    pub target: Anchor,
    pub style: EdgeStyle,
    /// Routed geometry, kept consistent with the endpoints' current
    /// positions by every graph mutation.
    pub path: PathData,
}

/// Why a connection attempt was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("source node {0} does not exist")]
    MissingSource(i32),
    #[error("target node {0} does not exist")]
    MissingTarget(i32),
    #[error("an identical edge already connects these magnets")]
    Duplicate,
    #[error("self-connections are disabled for this graph")]
    SelfLoop,
}

/// A node's data payload was replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct DataChange {
    pub node: i32,
    pub status: String,
}

/// An owned flow-diagram graph.
#[derive(Clone)]
pub struct FlowGraph {
    nodes: HashMap<i32, Node>,
    /// Insertion-ordered so rendering and iteration are deterministic.
    edges: Vec<Edge>,
    connectors: ConnectorRegistry,
    next_node_id: i32,
    next_edge_id: i32,
    allow_self_loops: bool,
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowGraph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            connectors: ConnectorRegistry::new(),
            next_node_id: 1,
            next_edge_id: 1,
            allow_self_loops: true,
        }
    }

    /// Reject edges whose source and target node are the same.
    pub fn set_allow_self_loops(&mut self, allow: bool) {
        self.allow_self_loops = allow;
    }

    pub fn connectors(&self) -> &ConnectorRegistry {
        &self.connectors
    }

    /// Mutable access to the connector registry. Existing edge paths are not
    /// re-routed automatically; call [`FlowGraph::reroute_all`] after
    /// changing the default connector.
    pub fn connectors_mut(&mut self) -> &mut ConnectorRegistry {
        &mut self.connectors
    }

    // === Nodes ===

    pub fn add_node(
        &mut self,
        shape: NodeShape,
        bounds: (f32, f32, f32, f32),
        data: NodeData,
    ) -> i32 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        let (x, y, width, height) = bounds;
        self.nodes.insert(
            id,
            Node {
                id,
                shape,
                x,
                y,
                width,
                height,
                data,
                magnets_visible: false,
            },
        );
        debug!(node = id, "node added");
        id
    }

    pub fn node(&self, id: i32) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Remove a node and, transitively, every edge anchored to it.
    pub fn remove_node(&mut self, id: i32) -> bool {
        if self.nodes.remove(&id).is_none() {
            return false;
        }
        let before = self.edges.len();
        self.edges
            .retain(|e| e.source.node != id && e.target.node != id);
        let cascaded = before - self.edges.len();
        if cascaded > 0 {
            debug!(node = id, edges = cascaded, "cascaded edge removal");
        }
        true
    }

    /// Translate a node and re-route every edge touching it, so cached paths
    /// are fresh before the next render.
    pub fn move_node(&mut self, id: i32, dx: f32, dy: f32) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.x += dx;
                node.y += dy;
            }
            None => return false,
        }
        self.reroute_node_edges(id);
        true
    }

    pub fn set_node_bounds(&mut self, id: i32, bounds: (f32, f32, f32, f32)) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                (node.x, node.y, node.width, node.height) = bounds;
            }
            None => return false,
        }
        self.reroute_node_edges(id);
        true
    }

    pub fn set_magnets_visible(&mut self, id: i32, visible: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.magnets_visible = visible;
                true
            }
            None => false,
        }
    }

    /// Replace a node's data payload, reporting the change for synchronous
    /// style reaction.
    pub fn set_node_data(&mut self, id: i32, data: NodeData) -> Option<DataChange> {
        let node = self.nodes.get_mut(&id)?;
        node.data = data;
        Some(DataChange {
            node: id,
            status: node.data.status.clone(),
        })
    }

    /// Replace only the status tag of a node's payload.
    pub fn set_node_status(&mut self, id: i32, status: impl Into<String>) -> Option<DataChange> {
        let node = self.nodes.get_mut(&id)?;
        node.data.status = status.into();
        Some(DataChange {
            node: id,
            status: node.data.status.clone(),
        })
    }

    /// Canvas position of an anchor's magnet, if the node exists.
    pub fn anchor_position(&self, anchor: Anchor) -> Option<Point> {
        Self::anchor_point(&self.nodes, anchor)
    }

    fn anchor_point(nodes: &HashMap<i32, Node>, anchor: Anchor) -> Option<Point> {
        nodes
            .get(&anchor.node)
            .map(|n| n.magnet_position(anchor.magnet))
    }

    // === Edges ===

    /// Connect two magnets with a new edge.
    ///
    /// The edge is routed immediately with the graph's default connector and
    /// carries the default style.
    pub fn connect(&mut self, source: Anchor, target: Anchor) -> Result<i32, ConnectError> {
        let s = Self::anchor_point(&self.nodes, source)
            .ok_or(ConnectError::MissingSource(source.node))?;
        let e = Self::anchor_point(&self.nodes, target)
            .ok_or(ConnectError::MissingTarget(target.node))?;
        if !self.allow_self_loops && source.node == target.node {
            return Err(ConnectError::SelfLoop);
        }
        if self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
        {
            return Err(ConnectError::Duplicate);
        }

        let path = self.connectors.route(None, s, e);
        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id,
            source,
            target,
            style: EdgeStyle::default(),
            path,
        });
        debug!(
            edge = id,
            source = source.node,
            target = target.node,
            "edge connected"
        );
        Ok(id)
    }

    pub fn edge(&self, id: i32) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn remove_edge(&mut self, id: i32) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    /// Edges whose target is the given node.
    pub fn incoming_edges(&self, node: i32) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.target.node == node)
    }

    /// Edges whose source is the given node.
    pub fn outgoing_edges(&self, node: i32) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.source.node == node)
    }

    pub fn incoming_edge_ids(&self, node: i32) -> Vec<i32> {
        self.incoming_edges(node).map(|e| e.id).collect()
    }

    /// Mutate an edge's style in place. Returns `false` for unknown ids.
    pub fn update_edge_style(&mut self, id: i32, f: impl FnOnce(&mut EdgeStyle)) -> bool {
        match self.edges.iter_mut().find(|e| e.id == id) {
            Some(edge) => {
                f(&mut edge.style);
                true
            }
            None => false,
        }
    }

    fn reroute_node_edges(&mut self, node: i32) {
        let nodes = &self.nodes;
        let connectors = &self.connectors;
        for edge in self
            .edges
            .iter_mut()
            .filter(|e| e.source.node == node || e.target.node == node)
        {
            if let (Some(s), Some(e)) = (
                Self::anchor_point(nodes, edge.source),
                Self::anchor_point(nodes, edge.target),
            ) {
                edge.path = connectors.route(None, s, e);
            }
        }
    }

    /// Re-route every edge with the current default connector.
    pub fn reroute_all(&mut self) {
        let nodes = &self.nodes;
        let connectors = &self.connectors;
        for edge in self.edges.iter_mut() {
            if let (Some(s), Some(e)) = (
                Self::anchor_point(nodes, edge.source),
                Self::anchor_point(nodes, edge.target),
            ) {
                edge.path = connectors.route(None, s, e);
            }
        }
    }

    // === Picking facades ===

    /// Find the closest magnet within `snap_radius` of a canvas position,
    /// for drag-connect snapping.
    pub fn find_magnet_at(&self, x: f32, y: f32, snap_radius: f32) -> Option<Anchor> {
        hit_test::find_magnet_at(x, y, self.magnet_geometries(), snap_radius)
    }

    /// Find the closest edge within `hover_distance` of a canvas position.
    pub fn find_edge_at(&self, x: f32, y: f32, hover_distance: f32) -> Option<i32> {
        hit_test::find_edge_at(
            x,
            y,
            self.edges.iter().map(|e| (e.id, &e.path)),
            hover_distance,
            hit_test::DEFAULT_HIT_SAMPLES,
        )
    }

    /// Nodes whose bounds intersect the selection box.
    pub fn nodes_in_box(&self, x: f32, y: f32, width: f32, height: f32) -> Vec<i32> {
        hit_test::nodes_in_selection_box(x, y, width, height, self.nodes.values())
    }

    /// Edges with at least one endpoint inside the selection box.
    pub fn edges_in_box(&self, x: f32, y: f32, width: f32, height: f32) -> Vec<i32> {
        hit_test::edges_in_selection_box(
            x,
            y,
            width,
            height,
            self.edges.iter().map(|e| (e.id, &e.path)),
        )
    }

    fn magnet_geometries(&self) -> impl Iterator<Item = (Anchor, Point)> + '_ {
        self.nodes.values().flat_map(|node| {
            Magnet::ALL
                .iter()
                .map(move |&magnet| (Anchor::new(node.id, magnet), node.magnet_position(magnet)))
        })
    }
}
