//! Level 4: status changes and edge restyling.
//!
//! Drives status flips through both the raw reactor and the controller,
//! checking the dashed/animated running style and the return to idle.

mod common;

use common::{bottom, controller_with_pipeline, pipeline, rect_node, top, StatusRecorder};
use flow_editor::{
    EdgeStyle, EdgeStyleReactor, FlowGraph, STATUS_DEFAULT, STATUS_FAILED, STATUS_RUNNING,
    STATUS_SUCCESS,
};

fn react(graph: &mut FlowGraph, node: i32, status: &str) -> usize {
    let change = graph.set_node_status(node, status).unwrap();
    EdgeStyleReactor.apply(graph, &change)
}

#[test]
fn test_running_node_animates_incoming_edges() {
    let mut graph = FlowGraph::new();
    let (nodes, edges) = pipeline(&mut graph, 3);

    let restyled = react(&mut graph, nodes[1], STATUS_RUNNING);
    assert_eq!(restyled, 1);

    let incoming = &graph.edge(edges[0]).unwrap().style;
    assert_eq!(incoming.dash, Some(5.0));
    assert_eq!(incoming.animation_css(), "running-line 30s infinite linear");

    // The edge leaving the running node stays idle
    let outgoing = &graph.edge(edges[1]).unwrap().style;
    assert_eq!(outgoing.dash, None);
    assert_eq!(outgoing.animation_css(), "");
}

#[test]
fn test_status_walk_through_a_pipeline() {
    // Simulate a run: each step turns running then succeeds
    let mut graph = FlowGraph::new();
    let (nodes, edges) = pipeline(&mut graph, 4);

    for i in 1..nodes.len() {
        react(&mut graph, nodes[i], STATUS_RUNNING);
        assert_eq!(graph.edge(edges[i - 1]).unwrap().style.dash, Some(5.0));

        react(&mut graph, nodes[i], STATUS_SUCCESS);
        assert_eq!(graph.edge(edges[i - 1]).unwrap().style.dash, None);
    }

    // After the walk every edge is idle again
    for id in edges {
        let style = &graph.edge(id).unwrap().style;
        assert_eq!(style.dash, None);
        assert!(style.animation.is_none());
    }
}

#[test]
fn test_all_non_running_statuses_share_idle_style() {
    let mut graph = FlowGraph::new();
    let (nodes, edges) = pipeline(&mut graph, 2);

    for status in [STATUS_DEFAULT, STATUS_SUCCESS, STATUS_FAILED, "paused", ""] {
        react(&mut graph, nodes[1], STATUS_RUNNING);
        react(&mut graph, nodes[1], status);

        let style = &graph.edge(edges[0]).unwrap().style;
        assert_eq!(style.dash, None, "status {:?}", status);
        assert!(style.animation.is_none(), "status {:?}", status);
    }
}

#[test]
fn test_reactor_preserves_stroke_and_marker() {
    let mut graph = FlowGraph::new();
    let (nodes, edges) = pipeline(&mut graph, 2);
    let default = EdgeStyle::default();

    react(&mut graph, nodes[1], STATUS_RUNNING);
    react(&mut graph, nodes[1], STATUS_SUCCESS);

    let style = &graph.edge(edges[0]).unwrap().style;
    assert_eq!(style.stroke, default.stroke);
    assert_eq!(style.stroke_width, default.stroke_width);
    assert_eq!(style.target_marker, default.target_marker);
}

#[test]
fn test_fan_in_restyles_every_branch() {
    let mut graph = FlowGraph::new();
    let join = rect_node(&mut graph, "join", 200.0, 300.0);
    let mut incoming = Vec::new();
    for i in 0..3 {
        let n = rect_node(&mut graph, &format!("branch{}", i), i as f32 * 150.0, 0.0);
        incoming.push(graph.connect(bottom(n), top(join)).unwrap());
    }

    assert_eq!(react(&mut graph, join, STATUS_RUNNING), 3);
    for id in &incoming {
        assert_eq!(graph.edge(*id).unwrap().style.dash, Some(5.0));
    }

    assert_eq!(react(&mut graph, join, STATUS_FAILED), 3);
    for id in &incoming {
        assert_eq!(graph.edge(*id).unwrap().style.dash, None);
    }
}

#[test]
fn test_source_node_status_is_a_noop() {
    let mut graph = FlowGraph::new();
    let (nodes, edges) = pipeline(&mut graph, 2);

    assert_eq!(react(&mut graph, nodes[0], STATUS_RUNNING), 0);
    assert_eq!(graph.edge(edges[0]).unwrap().style.dash, None);
}

#[test]
fn test_edge_added_while_running_is_not_retroactively_styled() {
    let mut graph = FlowGraph::new();
    let (nodes, _) = pipeline(&mut graph, 2);
    react(&mut graph, nodes[1], STATUS_RUNNING);

    // A new edge into the running node gets the default style until the
    // next change notification
    let late = rect_node(&mut graph, "late", 200.0, 0.0);
    let edge = graph
        .connect(bottom(late), top(nodes[1]))
        .unwrap();
    assert_eq!(graph.edge(edge).unwrap().style.dash, None);

    // Re-reporting the same status catches it up
    react(&mut graph, nodes[1], STATUS_RUNNING);
    assert_eq!(graph.edge(edge).unwrap().style.dash, Some(5.0));
}

// ============================================================================
// Through the controller
// ============================================================================

#[test]
fn test_controller_dispatches_synchronously() {
    let (ctrl, nodes, edges) = controller_with_pipeline();

    assert!(ctrl.set_node_status(nodes[1], STATUS_RUNNING));

    let graph = ctrl.graph();
    let graph = graph.borrow();
    assert_eq!(graph.edge(edges[0]).unwrap().style.dash, Some(5.0));
    assert!(graph.node(nodes[1]).unwrap().data.is_running());
}

#[test]
fn test_controller_notifies_listeners_in_order() {
    let (ctrl, nodes, _) = controller_with_pipeline();
    let recorder = StatusRecorder::new();
    recorder.attach(&ctrl);

    ctrl.set_node_status(nodes[1], STATUS_RUNNING);
    ctrl.set_node_status(nodes[1], STATUS_SUCCESS);
    ctrl.set_node_status(nodes[0], STATUS_RUNNING);

    let changes = recorder.changes();
    assert_eq!(changes.len(), 3);
    assert_eq!((changes[0].node, changes[0].status.as_str()), (nodes[1], "running"));
    assert_eq!((changes[1].node, changes[1].status.as_str()), (nodes[1], "success"));
    assert_eq!((changes[2].node, changes[2].status.as_str()), (nodes[0], "running"));
}

#[test]
fn test_controller_ignores_unknown_node() {
    let (ctrl, _, _) = controller_with_pipeline();
    let recorder = StatusRecorder::new();
    recorder.attach(&ctrl);

    assert!(!ctrl.set_node_status(12345, STATUS_RUNNING));
    assert_eq!(recorder.len(), 0);
}

#[test]
fn test_status_styles_survive_reroute() {
    let (ctrl, nodes, edges) = controller_with_pipeline();
    ctrl.set_node_status(nodes[1], STATUS_RUNNING);

    // Moving the node re-routes the edge but keeps its style
    ctrl.graph().borrow_mut().move_node(nodes[1], 80.0, 0.0);

    let graph = ctrl.graph();
    let graph = graph.borrow();
    let edge = graph.edge(edges[0]).unwrap();
    assert_eq!(edge.style.dash, Some(5.0));
    assert_eq!(edge.path.end(), graph.anchor_position(edge.target));
}
