//! High-level controller wiring the editor pieces together.
//!
//! [`FlowEditorController`] owns the graph, selection, clipboard, history,
//! and keymap behind `Rc<RefCell<_>>` handles, so one controller can be
//! cloned into every UI callback. It is also where the status reactor is
//! dispatched: a status change restyles incoming edges synchronously, before
//! the mutating call returns, so the UI never renders a stale style.
//!
//! # Example
//!
//! ```ignore
//! use flow_editor::{FlowEditorController, EditorAction};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = FlowEditorController::new();
//!
//!     let model = std::rc::Rc::new(slint::VecModel::<EdgeItem>::default());
//!     ctrl.bind_edge_model(model.clone(), |id, path, stroke, width, dash, animation| {
//!         EdgeItem { id, path, stroke, width, dash, animation }
//!     });
//!     window.set_edges(slint::ModelRc::from(model));
//!
//!     window.on_key_pressed({
//!         let ctrl = ctrl.clone();
//!         move |key, command, shift| ctrl.handle_key(key.as_str(), command, shift)
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slint::{Color, SharedString, VecModel};
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::graph::{Anchor, DataChange, FlowGraph};
use crate::grid::{generate_grid_mesh, GridMesh, GridOptions};
use crate::history::History;
use crate::keyboard::{default_keymap, EditorAction, Keymap};
use crate::reactor::EdgeStyleReactor;
use crate::selection::{CellId, SelectionManager};
use crate::shape::ShapeRegistry;
use crate::snapline::{snap_to_nodes, SnapAdjustment, SNAP_TOLERANCE};

/// Canvas-level configuration.
#[derive(Clone, Debug)]
pub struct EditorOptions {
    pub background: Color,
    pub grid: GridOptions,
    /// Screen-space radius within which a dragged connection snaps to a
    /// magnet.
    pub snap_radius: f32,
    /// Screen-space distance within which a click hits an edge stroke.
    pub edge_hover_distance: f32,
    /// World-space distance within which a dragged node snaps to another
    /// node's alignment lines.
    pub snapline_tolerance: f32,
    pub history_capacity: usize,
    pub allow_self_loops: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0xF2, 0xF7, 0xFA),
            grid: GridOptions::default(),
            snap_radius: 20.0,
            edge_hover_distance: 8.0,
            snapline_tolerance: SNAP_TOLERANCE,
            history_capacity: crate::history::DEFAULT_CAPACITY,
            allow_self_loops: true,
        }
    }
}

/// Per-edge render data pushed into a bound Slint model.
#[derive(Clone)]
struct EdgePathData {
    id: i32,
    commands: String,
    stroke: Color,
    stroke_width: f32,
    dash: f32,
    animation: String,
}

trait EdgeModelSyncer {
    fn sync(&self, edges: &[EdgePathData]);
}

struct ConcreteEdgeSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> EdgeModelSyncer for ConcreteEdgeSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(i32, SharedString, Color, f32, f32, SharedString) -> P,
{
    fn sync(&self, edges: &[EdgePathData]) {
        use slint::Model;
        for (i, edge) in edges.iter().enumerate() {
            let item = (self.constructor)(
                edge.id,
                SharedString::from(edge.commands.as_str()),
                edge.stroke,
                edge.stroke_width,
                edge.dash,
                SharedString::from(edge.animation.as_str()),
            );
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        while self.model.row_count() > edges.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Shared editor state plus the operations shortcuts and UI callbacks
/// trigger.
///
/// Clone the controller to share it across callbacks; all clones operate on
/// the same underlying state.
#[derive(Clone)]
pub struct FlowEditorController {
    graph: Rc<RefCell<FlowGraph>>,
    selection: Rc<RefCell<SelectionManager>>,
    clipboard: Rc<RefCell<Clipboard>>,
    history: Rc<RefCell<History>>,
    keymap: Rc<RefCell<Keymap>>,
    shapes: Rc<RefCell<ShapeRegistry>>,
    reactor: EdgeStyleReactor,
    options: Rc<EditorOptions>,
    zoom: Rc<RefCell<f32>>,
    pan_x: Rc<RefCell<f32>>,
    pan_y: Rc<RefCell<f32>>,
    dragged_node_id: Rc<RefCell<i32>>,
    status_listeners: Rc<RefCell<Vec<Box<dyn Fn(&DataChange)>>>>,
    edge_syncer: Rc<RefCell<Option<Box<dyn EdgeModelSyncer>>>>,
}

impl Default for FlowEditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEditorController {
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        let mut graph = FlowGraph::new();
        graph.set_allow_self_loops(options.allow_self_loops);
        let history = History::with_capacity(options.history_capacity);
        Self {
            graph: Rc::new(RefCell::new(graph)),
            selection: Rc::new(RefCell::new(SelectionManager::new())),
            clipboard: Rc::new(RefCell::new(Clipboard::new())),
            history: Rc::new(RefCell::new(history)),
            keymap: Rc::new(RefCell::new(default_keymap())),
            shapes: Rc::new(RefCell::new(ShapeRegistry::new())),
            reactor: EdgeStyleReactor,
            options: Rc::new(options),
            zoom: Rc::new(RefCell::new(1.0)),
            pan_x: Rc::new(RefCell::new(0.0)),
            pan_y: Rc::new(RefCell::new(0.0)),
            dragged_node_id: Rc::new(RefCell::new(0)),
            status_listeners: Rc::new(RefCell::new(Vec::new())),
            edge_syncer: Rc::new(RefCell::new(None)),
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn background(&self) -> Color {
        self.options.background
    }

    pub fn graph(&self) -> Rc<RefCell<FlowGraph>> {
        self.graph.clone()
    }

    pub fn selection(&self) -> Rc<RefCell<SelectionManager>> {
        self.selection.clone()
    }

    pub fn shapes(&self) -> Rc<RefCell<ShapeRegistry>> {
        self.shapes.clone()
    }

    pub fn keymap(&self) -> Rc<RefCell<Keymap>> {
        self.keymap.clone()
    }

    // === Viewport ===

    pub fn set_viewport(&self, zoom: f32, pan_x: f32, pan_y: f32) {
        *self.zoom.borrow_mut() = zoom;
        *self.pan_x.borrow_mut() = pan_x;
        *self.pan_y.borrow_mut() = pan_y;
    }

    pub fn zoom(&self) -> f32 {
        *self.zoom.borrow()
    }

    /// Screen coordinates to world (canvas) coordinates.
    pub fn screen_to_world(&self, x: f32, y: f32) -> (f32, f32) {
        let z = self.safe_zoom();
        (
            (x - *self.pan_x.borrow()) / z,
            (y - *self.pan_y.borrow()) / z,
        )
    }

    fn safe_zoom(&self) -> f32 {
        let zoom = *self.zoom.borrow();
        if zoom > 0.0 {
            zoom
        } else {
            1.0
        }
    }

    /// Grid mesh for the current viewport.
    pub fn generate_grid(&self, width: f32, height: f32) -> GridMesh {
        generate_grid_mesh(
            width,
            height,
            self.safe_zoom(),
            *self.pan_x.borrow(),
            *self.pan_y.borrow(),
            self.options.grid,
        )
    }

    // === Node lifecycle ===

    /// Instantiate a registered shape template at a screen position, as when
    /// a palette entry is dropped on the canvas. The new node becomes the
    /// selection.
    pub fn drop_node(&self, template: &str, x: f32, y: f32, label: &str) -> Option<i32> {
        let (wx, wy) = self.screen_to_world(x, y);
        let before = self.graph.borrow().clone();
        let id = self
            .shapes
            .borrow()
            .instantiate(template, &mut self.graph.borrow_mut(), wx, wy, label)?;
        self.history.borrow_mut().checkpoint(&before);
        self.selection
            .borrow_mut()
            .replace_selection([CellId::Node(id)]);
        Some(id)
    }

    /// Record the start of a node drag.
    pub fn begin_node_drag(&self, id: i32) {
        *self.dragged_node_id.borrow_mut() = id;
    }

    pub fn dragged_node_id(&self) -> i32 {
        *self.dragged_node_id.borrow()
    }

    /// Snapline guides for the active drag at a screen-space delta, for the
    /// UI to draw while the gesture is in progress.
    pub fn drag_guides(&self, screen_dx: f32, screen_dy: f32) -> SnapAdjustment {
        let id = *self.dragged_node_id.borrow();
        let z = self.safe_zoom();
        self.drag_snap(id, screen_dx / z, screen_dy / z)
    }

    /// Commit a finished node drag: one history step for the whole gesture,
    /// then the snapline-adjusted move plus re-route.
    pub fn commit_node_drag(&self, screen_dx: f32, screen_dy: f32) -> bool {
        let id = *self.dragged_node_id.borrow();
        let z = self.safe_zoom();
        let (dx, dy) = (screen_dx / z, screen_dy / z);
        let snap = self.drag_snap(id, dx, dy);
        let before = self.graph.borrow().clone();
        let moved = self
            .graph
            .borrow_mut()
            .move_node(id, dx + snap.dx, dy + snap.dy);
        *self.dragged_node_id.borrow_mut() = 0;
        if moved {
            self.history.borrow_mut().checkpoint(&before);
            self.sync_edge_model();
        }
        moved
    }

    /// Alignment correction for moving `id` by a world-space delta, tested
    /// against every other node.
    fn drag_snap(&self, id: i32, dx: f32, dy: f32) -> SnapAdjustment {
        let graph = self.graph.borrow();
        let Some(node) = graph.node(id) else {
            return SnapAdjustment::default();
        };
        let (x, y, w, h) = node.bounds();
        snap_to_nodes(
            (x + dx, y + dy, w, h),
            graph.nodes().filter(|n| n.id != id),
            self.options.snapline_tolerance,
        )
    }

    // === Connecting ===

    /// Start a drag-connect gesture: snap the press position to a magnet.
    pub fn begin_connect(&self, x: f32, y: f32) -> Option<Anchor> {
        let (wx, wy) = self.screen_to_world(x, y);
        let radius = self.options.snap_radius / self.safe_zoom();
        self.graph.borrow().find_magnet_at(wx, wy, radius)
    }

    /// Finish a drag-connect gesture at a screen position.
    ///
    /// Snaps to the nearest magnet and creates the edge; no edge is created
    /// when the release point is not near a magnet or validation rejects the
    /// connection.
    pub fn complete_connect(&self, source: Anchor, x: f32, y: f32) -> Option<i32> {
        let target = self.begin_connect(x, y)?;
        let before = self.graph.borrow().clone();
        match self.graph.borrow_mut().connect(source, target) {
            Ok(id) => {
                self.history.borrow_mut().checkpoint(&before);
                self.sync_edge_model();
                Some(id)
            }
            Err(err) => {
                debug!(%err, "connection rejected");
                None
            }
        }
    }

    // === Status changes ===

    /// Replace a node's status and restyle its incoming edges.
    ///
    /// The reactor and any registered listeners run before this returns, so
    /// callers observe the post-change styles immediately. Returns `false`
    /// for unknown nodes.
    pub fn set_node_status(&self, id: i32, status: &str) -> bool {
        let change = {
            let mut graph = self.graph.borrow_mut();
            let Some(change) = graph.set_node_status(id, status) else {
                return false;
            };
            self.reactor.apply(&mut graph, &change);
            change
        };
        for listener in self.status_listeners.borrow().iter() {
            listener(&change);
        }
        self.sync_edge_model();
        true
    }

    /// Register a listener invoked after each status change has been applied
    /// and reacted to.
    pub fn on_status_change(&self, listener: impl Fn(&DataChange) + 'static) {
        self.status_listeners.borrow_mut().push(Box::new(listener));
    }

    // === Picking ===

    /// Find the magnet nearest to a screen position, if any is in snap
    /// range.
    pub fn find_magnet_at_screen(&self, x: f32, y: f32) -> Option<Anchor> {
        self.begin_connect(x, y)
    }

    /// Find the edge under a screen position.
    pub fn find_edge_at_screen(&self, x: f32, y: f32) -> Option<i32> {
        let (wx, wy) = self.screen_to_world(x, y);
        let distance = self.options.edge_hover_distance / self.safe_zoom();
        self.graph.borrow().find_edge_at(wx, wy, distance)
    }

    /// Apply a click on a cell to the selection.
    pub fn select_cell(&self, cell: CellId, shift_held: bool) {
        self.selection.borrow_mut().handle_interaction(cell, shift_held);
    }

    /// Replace the selection with everything inside a screen-space
    /// rubberband box.
    pub fn select_in_box_screen(&self, x: f32, y: f32, width: f32, height: f32) {
        let (wx, wy) = self.screen_to_world(x, y);
        let z = self.safe_zoom();
        let graph = self.graph.borrow();
        let nodes = graph.nodes_in_box(wx, wy, width / z, height / z);
        let edges = graph.edges_in_box(wx, wy, width / z, height / z);
        self.selection.borrow_mut().replace_with_boxed(nodes, edges);
    }

    // === Shortcut actions ===

    /// Resolve a key event against the keymap and perform the action.
    /// Returns `true` when the event was consumed.
    pub fn handle_key(&self, key: &str, command: bool, shift: bool) -> bool {
        match self.keymap.borrow().resolve(key, command, shift) {
            Some(action) => self.perform(action),
            None => false,
        }
    }

    /// Perform an editor action. Returns `false` when the action had nothing
    /// to do (empty selection, empty clipboard, exhausted history).
    pub fn perform(&self, action: EditorAction) -> bool {
        match action {
            EditorAction::Copy => self.copy_selection(),
            EditorAction::Cut => self.cut_selection(),
            EditorAction::Paste => self.paste(),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Delete => self.delete_selection(),
            EditorAction::SelectAll => self.select_all(),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.borrow().can_redo()
    }

    fn copy_selection(&self) -> bool {
        let selection = self.selection.borrow();
        if selection.is_empty() {
            return false;
        }
        self.clipboard
            .borrow_mut()
            .copy(&self.graph.borrow(), selection.iter());
        true
    }

    fn cut_selection(&self) -> bool {
        let cells: Vec<CellId> = self.selection.borrow().iter().collect();
        if cells.is_empty() {
            return false;
        }
        self.checkpoint();
        self.clipboard
            .borrow_mut()
            .cut(&mut self.graph.borrow_mut(), cells);
        self.selection.borrow_mut().clear();
        self.sync_edge_model();
        true
    }

    /// Paste the clipboard and select the pasted cells.
    fn paste(&self) -> bool {
        if self.clipboard.borrow().is_empty() {
            return false;
        }
        self.checkpoint();
        let created = self.clipboard.borrow_mut().paste(&mut self.graph.borrow_mut());
        self.selection.borrow_mut().replace_selection(created);
        self.sync_edge_model();
        true
    }

    fn undo(&self) -> bool {
        let restored = {
            let graph = self.graph.borrow();
            self.history.borrow_mut().undo(&graph)
        };
        match restored {
            Some(graph) => {
                *self.graph.borrow_mut() = graph;
                // Restored cells may not exist in the old ids' shapes anymore
                self.selection.borrow_mut().clear();
                self.sync_edge_model();
                true
            }
            None => false,
        }
    }

    fn redo(&self) -> bool {
        let restored = {
            let graph = self.graph.borrow();
            self.history.borrow_mut().redo(&graph)
        };
        match restored {
            Some(graph) => {
                *self.graph.borrow_mut() = graph;
                self.selection.borrow_mut().clear();
                self.sync_edge_model();
                true
            }
            None => false,
        }
    }

    fn delete_selection(&self) -> bool {
        let cells: Vec<CellId> = self.selection.borrow().iter().collect();
        if cells.is_empty() {
            return false;
        }
        self.checkpoint();
        {
            let mut graph = self.graph.borrow_mut();
            // Edges first, so a selected edge of a selected node is not
            // double-removed by the cascade
            for cell in &cells {
                if let CellId::Edge(id) = cell {
                    graph.remove_edge(*id);
                }
            }
            for cell in &cells {
                if let CellId::Node(id) = cell {
                    graph.remove_node(*id);
                }
            }
        }
        self.selection.borrow_mut().clear();
        self.sync_edge_model();
        true
    }

    fn select_all(&self) -> bool {
        let graph = self.graph.borrow();
        let nodes: Vec<i32> = graph.nodes().map(|n| n.id).collect();
        let edges: Vec<i32> = graph.edges().map(|e| e.id).collect();
        if nodes.is_empty() && edges.is_empty() {
            return false;
        }
        self.selection.borrow_mut().replace_with_boxed(nodes, edges);
        true
    }

    fn checkpoint(&self) {
        self.history.borrow_mut().checkpoint(&self.graph.borrow());
    }

    // === Edge model binding ===

    /// Bind a Slint model that mirrors the graph's edges.
    ///
    /// The constructor receives `(id, path commands, stroke, stroke width,
    /// dash, animation)` per edge. After binding, every controller operation
    /// that changes edges re-syncs the model.
    pub fn bind_edge_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(i32, SharedString, Color, f32, f32, SharedString) -> P + 'static,
    {
        *self.edge_syncer.borrow_mut() = Some(Box::new(ConcreteEdgeSyncer { model, constructor }));
        self.sync_edge_model();
    }

    /// Push the current edge set into the bound model, if any.
    pub fn sync_edge_model(&self) {
        let syncer = self.edge_syncer.borrow();
        let Some(syncer) = syncer.as_ref() else {
            return;
        };
        let graph = self.graph.borrow();
        let edges: Vec<EdgePathData> = graph
            .edges()
            .map(|edge| EdgePathData {
                id: edge.id,
                commands: edge.path.to_svg_commands(),
                stroke: edge.style.stroke,
                stroke_width: edge.style.stroke_width,
                dash: edge.style.dash_or_zero(),
                animation: edge.style.animation_css(),
            })
            .collect();
        syncer.sync(&edges);
    }
}
