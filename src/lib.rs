//! # Flow Editor
//!
//! A headless core library for building flow-diagram editors with Slint.
//! It owns the diagram model and the algorithms around it; the UI layer
//! renders from Slint models and SVG command strings and feeds pointer and
//! key events back in.
//!
//! ## Features
//!
//! - **Owned graph model** - [`FlowGraph`] is a plain value: nodes with
//!   boundary magnets, directed edges, cascade removal, no globals
//! - **Curved edge routing** - a registry of named connectors; the default
//!   [`route_flow_connector`] draws the vertical S-curve between magnets
//! - **Status-driven styling** - [`EdgeStyleReactor`] animates the edges
//!   feeding a running node and restores them when it stops
//! - **Interaction plumbing** - selection over nodes and edges, subgraph
//!   copy/paste, snapshot undo/redo, a `"ctrl+shift+z"`-style keymap,
//!   drag-alignment snaplines
//! - **Slint at the seams** - edge paths, selection, and styles mirror into
//!   `VecModel`s via [`FlowEditorController`]
//!
//! ## Quick Start
//!
//! ```
//! use flow_editor::{Anchor, FlowGraph, Magnet, NodeData, NodeShape};
//!
//! let mut graph = FlowGraph::new();
//! let fetch = graph.add_node(NodeShape::default(), (0.0, 0.0, 66.0, 36.0),
//!     NodeData::new("Fetch"));
//! let parse = graph.add_node(NodeShape::default(), (0.0, 100.0, 66.0, 36.0),
//!     NodeData::new("Parse"));
//! let edge = graph
//!     .connect(Anchor::new(fetch, Magnet::Bottom), Anchor::new(parse, Magnet::Top))
//!     .unwrap();
//! assert!(graph.edge(edge).unwrap().path.to_svg_commands().starts_with("M 33 36"));
//! ```

pub mod clipboard;
pub mod connector;
pub mod controller;
pub mod graph;
pub mod grid;
pub mod history;
pub mod keyboard;
pub mod reactor;
pub mod selection;
pub mod shape;
pub mod snapline;
pub mod style;

pub use clipboard::{Clipboard, PASTE_OFFSET};
pub use connector::{
    distance_to_path, route_flow_connector, ConnectorRegistry, PathCommand, PathData, Point,
    DEFAULT_CONNECTOR, LEAD_OFFSET,
};
pub use controller::{EditorOptions, FlowEditorController};
pub use graph::{Anchor, ConnectError, DataChange, Edge, FlowGraph, Magnet, Node};
pub use grid::{generate_grid_mesh, GridMesh, GridOptions};
pub use history::History;
pub use hit_test::{
    edges_in_selection_box, find_edge_at, find_magnet_at, nodes_in_selection_box, NodeBounds,
    SNAP_RADIUS,
};
pub use keyboard::{default_keymap, EditorAction, Keymap, Shortcut};
pub use reactor::{EdgeStyleReactor, RUNNING_DASH};
pub use selection::{CellId, SelectionManager};
pub use shape::{
    BodyStyle, GroupLayout, LabelStyle, NodeShape, Palette, PaletteGroup, Prototype,
    ShapeRegistry, ShapeTemplate,
};
pub use snapline::{snap_to_nodes, GuideLine, SnapAdjustment, SNAP_TOLERANCE};
pub use style::{
    AnimationRepeat, AnimationTiming, EdgeStyle, NodeData, StrokeAnimation, TargetMarker,
    STATUS_DEFAULT, STATUS_FAILED, STATUS_RUNNING, STATUS_SUCCESS,
};
