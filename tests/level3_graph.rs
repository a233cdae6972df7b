//! Level 3: graph topology, shapes, and the palette.

mod common;

use common::{bottom, pipeline, rect_node, top};
use flow_editor::{
    Anchor, ConnectError, FlowGraph, GroupLayout, Magnet, NodeData, NodeShape, Palette,
    Prototype, ShapeRegistry, ShapeTemplate,
};

#[test]
fn test_connect_validation_errors() {
    let mut graph = FlowGraph::new();
    let (nodes, _) = pipeline(&mut graph, 2);

    assert_eq!(
        graph.connect(bottom(999), top(nodes[1])),
        Err(ConnectError::MissingSource(999))
    );
    assert_eq!(
        graph.connect(bottom(nodes[0]), top(999)),
        Err(ConnectError::MissingTarget(999))
    );
    // The pipeline edge already exists
    assert_eq!(
        graph.connect(bottom(nodes[0]), top(nodes[1])),
        Err(ConnectError::Duplicate)
    );

    graph.set_allow_self_loops(false);
    assert_eq!(
        graph.connect(bottom(nodes[0]), top(nodes[0])),
        Err(ConnectError::SelfLoop)
    );
}

#[test]
fn test_parallel_edges_between_different_magnets() {
    let mut graph = FlowGraph::new();
    let (nodes, _) = pipeline(&mut graph, 2);

    let second = graph
        .connect(
            Anchor::new(nodes[0], Magnet::Right),
            Anchor::new(nodes[1], Magnet::Left),
        )
        .unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge(second).unwrap().source.magnet, Magnet::Right);
}

#[test]
fn test_remove_node_cascades_through_fan() {
    let mut graph = FlowGraph::new();
    let hub = rect_node(&mut graph, "hub", 200.0, 200.0);
    for i in 0..4 {
        let n = rect_node(&mut graph, &format!("in{}", i), i as f32 * 100.0, 0.0);
        graph.connect(bottom(n), top(hub)).unwrap();
    }
    let out = rect_node(&mut graph, "out", 200.0, 400.0);
    graph.connect(bottom(hub), top(out)).unwrap();
    assert_eq!(graph.edge_count(), 5);

    graph.remove_node(hub);

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_remove_edge_keeps_nodes() {
    let mut graph = FlowGraph::new();
    let (_, edges) = pipeline(&mut graph, 3);

    assert!(graph.remove_edge(edges[0]));
    assert!(!graph.remove_edge(edges[0]));

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_edge_iteration_order_is_insertion_order() {
    let mut graph = FlowGraph::new();
    let (_, edges) = pipeline(&mut graph, 5);
    let iterated: Vec<i32> = graph.edges().map(|e| e.id).collect();
    assert_eq!(iterated, edges);
}

#[test]
fn test_magnet_hover_visibility() {
    let mut graph = FlowGraph::new();
    let id = rect_node(&mut graph, "n", 0.0, 0.0);

    assert!(!graph.node(id).unwrap().magnets_visible);
    graph.set_magnets_visible(id, true);
    assert!(graph.node(id).unwrap().magnets_visible);
    graph.set_magnets_visible(id, false);
    assert!(!graph.node(id).unwrap().magnets_visible);
}

// ============================================================================
// Shapes and templates
// ============================================================================

#[test]
fn test_shape_template_variants() {
    let rect = ShapeTemplate::rect("task");
    assert_eq!(rect.shape, NodeShape::Rect { rx: 0.0, ry: 0.0 });
    assert_eq!((rect.width, rect.height), (66.0, 36.0));

    let rounded = ShapeTemplate::rect("terminator").with_shape(NodeShape::Rect { rx: 18.0, ry: 18.0 });
    assert_eq!(rounded.shape, NodeShape::Rect { rx: 18.0, ry: 18.0 });

    let custom = ShapeTemplate::template("progress-card", 176.0, 60.0);
    assert_eq!(custom.shape, NodeShape::Template { name: "progress-card".to_string() });
    assert_eq!((custom.width, custom.height), (176.0, 60.0));
}

#[test]
fn test_registry_instantiates_into_graph() {
    let mut registry = ShapeRegistry::new();
    registry.register(ShapeTemplate::rect("task"), false);
    registry.register(ShapeTemplate::template("progress-card", 176.0, 60.0), false);

    let mut graph = FlowGraph::new();
    let a = registry.instantiate("task", &mut graph, 10.0, 20.0, "Fetch").unwrap();
    let b = registry
        .instantiate("progress-card", &mut graph, 0.0, 100.0, "Train")
        .unwrap();

    assert_eq!(graph.node(a).unwrap().bounds(), (10.0, 20.0, 66.0, 36.0));
    assert_eq!(graph.node(b).unwrap().bounds(), (0.0, 100.0, 176.0, 60.0));
    assert_eq!(
        graph.node(b).unwrap().shape,
        NodeShape::Template { name: "progress-card".to_string() }
    );

    // Instantiated nodes connect like any other node
    assert!(graph.connect(bottom(a), top(b)).is_ok());
}

#[test]
fn test_palette_drop_workflow() {
    let mut registry = ShapeRegistry::new();
    registry.register(ShapeTemplate::rect("task"), false);

    let mut palette = Palette::new("Blocks");
    palette.add_group("basic", "Basic Steps", GroupLayout::default());
    palette.load(
        "basic",
        vec![
            Prototype { template: "task".to_string(), label: "Start".to_string() },
            Prototype { template: "task".to_string(), label: "Process".to_string() },
        ],
    );
    assert_eq!(palette.group("basic").unwrap().layout.columns, 2);

    let mut graph = FlowGraph::new();
    let dropped = palette
        .drop_onto(&registry, &mut graph, "basic", 1, 40.0, 80.0)
        .unwrap();

    assert_eq!(graph.node(dropped).unwrap().data.label, "Process");
    assert_eq!(graph.node(dropped).unwrap().bounds(), (40.0, 80.0, 66.0, 36.0));
}

#[test]
fn test_node_data_survives_topology_changes() {
    let mut graph = FlowGraph::new();
    let id = graph.add_node(
        NodeShape::default(),
        (0.0, 0.0, 66.0, 36.0),
        NodeData::with_status("Train", "success"),
    );

    graph.move_node(id, 100.0, 100.0);
    let node = graph.node(id).unwrap();
    assert_eq!(node.data.label, "Train");
    assert_eq!(node.data.status, "success");
}

#[test]
fn test_graph_clone_is_independent() {
    let mut graph = FlowGraph::new();
    let (nodes, _) = pipeline(&mut graph, 2);

    let snapshot = graph.clone();
    graph.remove_node(nodes[0]);

    assert_eq!(graph.node_count(), 1);
    assert_eq!(snapshot.node_count(), 2);
    assert_eq!(snapshot.edge_count(), 1);
}
