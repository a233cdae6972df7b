//! Drag-alignment snaplines.
//!
//! While a node is dragged, its edges and center lines are compared against
//! every other node's; when one comes within tolerance of an alignment, the
//! drag is pulled onto it and a guide line is reported for the UI to draw.
//! Like the picking queries in `hit_test`, the computation is pure: bounds
//! in, adjustment and guides out.

use crate::hit_test::NodeBounds;

/// Default distance within which a dragged node snaps to an alignment line.
pub const SNAP_TOLERANCE: f32 = 10.0;

/// An alignment guide to render while a snap is active.
///
/// `position` is the aligned coordinate (x for vertical guides, y for
/// horizontal ones); `from`/`to` span the guide along the other axis so it
/// covers both aligned nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLine {
    pub position: f32,
    pub from: f32,
    pub to: f32,
}

/// Outcome of a snap query: the correction to add to the drag delta, plus
/// the guides to draw. Both corrections are zero when nothing aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapAdjustment {
    pub dx: f32,
    pub dy: f32,
    pub vertical: Option<GuideLine>,
    pub horizontal: Option<GuideLine>,
}

impl SnapAdjustment {
    pub fn is_snapped(&self) -> bool {
        self.vertical.is_some() || self.horizontal.is_some()
    }
}

/// Snap a dragged node's candidate bounds against the other nodes.
///
/// The candidate's left/center/right lines are tested against every other
/// node's, and likewise top/middle/bottom; per axis the closest alignment
/// within `tolerance` wins. Axes snap independently, so a drag can align
/// horizontally with one node and vertically with another.
pub fn snap_to_nodes<N, I>(bounds: (f32, f32, f32, f32), others: I, tolerance: f32) -> SnapAdjustment
where
    N: NodeBounds,
    I: IntoIterator<Item = N>,
{
    let (x, y, w, h) = bounds;
    let xs = [x, x + w / 2.0, x + w];
    let ys = [y, y + h / 2.0, y + h];

    let mut snap = SnapAdjustment::default();
    // First alignment at a given distance wins, so ties are stable
    let mut best_dx = f32::MAX;
    let mut best_dy = f32::MAX;

    for other in others {
        let (ox, oy, ow, oh) = other.rect();
        let other_xs = [ox, ox + ow / 2.0, ox + ow];
        let other_ys = [oy, oy + oh / 2.0, oy + oh];

        for &mine in &xs {
            for &theirs in &other_xs {
                let delta = theirs - mine;
                if delta.abs() <= tolerance && delta.abs() < best_dx {
                    best_dx = delta.abs();
                    snap.dx = delta;
                    snap.vertical = Some(GuideLine {
                        position: theirs,
                        from: y.min(oy),
                        to: (y + h).max(oy + oh),
                    });
                }
            }
        }
        for &mine in &ys {
            for &theirs in &other_ys {
                let delta = theirs - mine;
                if delta.abs() <= tolerance && delta.abs() < best_dy {
                    best_dy = delta.abs();
                    snap.dy = delta;
                    snap.horizontal = Some(GuideLine {
                        position: theirs,
                        from: x.min(ox),
                        to: (x + w).max(ox + ow),
                    });
                }
            }
        }
    }

    snap
}
