//! Status-driven edge restyling.
//!
//! When a node's status changes, the edges that feed into it are restyled so
//! the diagram shows where work is happening: a node entering the `running`
//! state gets dashed, animated incoming edges; leaving it returns them to the
//! solid idle stroke.

use tracing::debug;

use crate::graph::{DataChange, FlowGraph};
use crate::style::{EdgeStyle, StrokeAnimation, STATUS_RUNNING};

/// Dash segment length applied to edges entering a running node.
pub const RUNNING_DASH: f32 = 5.0;

/// Restyles a node's incoming edges whenever its data payload changes.
///
/// The reactor is stateless; it reads the new status out of the reported
/// [`DataChange`] and rewrites the style of every incoming edge. Applying the
/// same change twice yields the same styles, so callers need not dedupe
/// change notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeStyleReactor;

impl EdgeStyleReactor {
    /// Re-style all edges entering the changed node.
    ///
    /// Only the status string matters: `"running"` selects the active style,
    /// every other value (including unrecognized ones) selects the idle
    /// style. Returns the number of edges restyled; a node with no incoming
    /// edges is a no-op.
    pub fn apply(&self, graph: &mut FlowGraph, change: &DataChange) -> usize {
        let incoming = graph.incoming_edge_ids(change.node);
        if incoming.is_empty() {
            return 0;
        }

        let running = change.status == STATUS_RUNNING;
        for &edge_id in &incoming {
            graph.update_edge_style(edge_id, |style| {
                if running {
                    Self::style_running(style);
                } else {
                    Self::style_idle(style);
                }
            });
        }
        debug!(
            node = change.node,
            status = %change.status,
            edges = incoming.len(),
            "incoming edges restyled"
        );
        incoming.len()
    }

    fn style_running(style: &mut EdgeStyle) {
        style.dash = Some(RUNNING_DASH);
        style.animation = Some(StrokeAnimation::running_line());
    }

    fn style_idle(style: &mut EdgeStyle) {
        style.dash = None;
        style.animation = None;
    }
}
