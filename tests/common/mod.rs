//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use flow_editor::{
    Anchor, DataChange, FlowEditorController, FlowGraph, Magnet, NodeData, NodeShape,
};

/// Standard node footprint used across the suites.
pub const NODE_W: f32 = 66.0;
pub const NODE_H: f32 = 36.0;

/// Add a default-shaped node at the given position.
pub fn rect_node(graph: &mut FlowGraph, label: &str, x: f32, y: f32) -> i32 {
    graph.add_node(NodeShape::default(), (x, y, NODE_W, NODE_H), NodeData::new(label))
}

pub fn bottom(node: i32) -> Anchor {
    Anchor::new(node, Magnet::Bottom)
}

pub fn top(node: i32) -> Anchor {
    Anchor::new(node, Magnet::Top)
}

/// Build a vertical chain `n0 -> n1 -> ... -> n(count-1)`, nodes 100 units
/// apart, connected bottom-to-top. Returns node ids and edge ids.
pub fn pipeline(graph: &mut FlowGraph, count: usize) -> (Vec<i32>, Vec<i32>) {
    let nodes: Vec<i32> = (0..count)
        .map(|i| rect_node(graph, &format!("step{}", i), 0.0, i as f32 * 100.0))
        .collect();
    let edges: Vec<i32> = nodes
        .windows(2)
        .map(|pair| graph.connect(bottom(pair[0]), top(pair[1])).unwrap())
        .collect();
    (nodes, edges)
}

/// A controller pre-loaded with a two-node pipeline.
pub fn controller_with_pipeline() -> (FlowEditorController, Vec<i32>, Vec<i32>) {
    let ctrl = FlowEditorController::new();
    let (nodes, edges) = {
        let graph = ctrl.graph();
        let mut graph = graph.borrow_mut();
        pipeline(&mut graph, 2)
    };
    (ctrl, nodes, edges)
}

/// Records status-change notifications for assertion.
#[derive(Default, Clone)]
pub struct StatusRecorder {
    changes: Rc<RefCell<Vec<DataChange>>>,
}

impl StatusRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach this recorder to a controller.
    pub fn attach(&self, ctrl: &FlowEditorController) {
        let changes = self.changes.clone();
        ctrl.on_status_change(move |change| changes.borrow_mut().push(change.clone()));
    }

    pub fn changes(&self) -> Vec<DataChange> {
        self.changes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }
}
