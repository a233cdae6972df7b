//! Edge routing for vertical flow diagrams.
//!
//! The default connector produces an S-shaped cubic curve between two magnet
//! points: a short straight lead-out from the source, a cubic bezier whose
//! curvature grows with the vertical distance between the endpoints, and a
//! short straight lead-in into the target. Connectors are registered by name
//! in a [`ConnectorRegistry`] so applications can override the routing used
//! for new edges.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Straight lead-out/lead-in length at both ends of a routed edge.
pub const LEAD_OFFSET: f32 = 4.0;

/// Name under which the default flow connector is registered.
pub const DEFAULT_CONNECTOR: &str = "flow";

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Replace non-finite coordinates with 0.0 so NaN/infinity can never
    /// reach a rendered path.
    pub fn sanitized(self) -> Self {
        Self {
            x: if self.x.is_finite() { self.x } else { 0.0 },
            y: if self.y.is_finite() { self.y } else { 0.0 },
        }
    }
}

/// A single absolute drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

/// An ordered sequence of absolute drawing commands.
///
/// Produced fresh per routing call and never mutated afterwards, only
/// replaced. Renders to a normalized SVG command string via [`fmt::Display`]
/// or [`PathData::to_svg_commands`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First point of the path, if any.
    pub fn start(&self) -> Option<Point> {
        self.commands.first().map(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::CubicTo { to, .. } => to,
        })
    }

    /// Last point of the path, if any.
    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::CubicTo { to, .. } => to,
        })
    }

    /// Render to an SVG path command string (e.g. "M 0 0 L 0 4 C 0 70 0 30 0 96 L 0 100").
    pub fn to_svg_commands(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match *command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::CubicTo { c1, c2, to } => {
                    write!(f, "C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, to.x, to.y)?
                }
            }
        }
        Ok(())
    }
}

/// Route a vertically oriented flow connector between two magnet points.
///
/// The path consists of a straight lead-out of [`LEAD_OFFSET`] below the
/// source, a cubic bezier, and a straight lead-in of the same length into the
/// target. The control points sit at
/// `(source.x, source.y + offset + control)` and
/// `(target.x, target.y - offset - control)` where
/// `control = floor((|target.y - source.y| / 3) * 2)`, so curvature scales
/// with the vertical distance and collapses to a near-straight segment when
/// the endpoints coincide.
///
/// Pure and deterministic; called once per edge render or drag frame.
/// Non-finite input coordinates are clamped to 0.0.
pub fn route_flow_connector(source: Point, target: Point) -> PathData {
    let s = source.sanitized();
    let e = target.sanitized();

    let delta_y = (e.y - s.y).abs();
    let control = (delta_y / 3.0 * 2.0).floor();

    let v1 = Point::new(s.x, s.y + LEAD_OFFSET + control);
    let v2 = Point::new(e.x, e.y - LEAD_OFFSET - control);

    let mut path = PathData::new();
    path.move_to(s);
    path.line_to(Point::new(s.x, s.y + LEAD_OFFSET));
    path.cubic_to(v1, v2, Point::new(e.x, e.y - LEAD_OFFSET));
    path.line_to(e);
    path
}

/// A routing function: source and target magnet points in, path out.
pub type ConnectorFn = dyn Fn(Point, Point) -> PathData;

/// Named registry of routing functions.
///
/// [`ConnectorRegistry::new`] pre-registers [`route_flow_connector`] under
/// [`DEFAULT_CONNECTOR`] and selects it as the default for new edges.
/// Registering a different function under the same name (with `overwrite`)
/// is how applications customize edge routing.
#[derive(Clone)]
pub struct ConnectorRegistry {
    connectors: HashMap<String, Rc<ConnectorFn>>,
    default: String,
}

impl Default for ConnectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            connectors: HashMap::new(),
            default: DEFAULT_CONNECTOR.to_string(),
        };
        registry.register(DEFAULT_CONNECTOR, Rc::new(route_flow_connector), true);
        registry
    }

    /// Register a connector under `name`.
    ///
    /// Returns `false` without replacing anything if the name is taken and
    /// `overwrite` is not set.
    pub fn register(&mut self, name: &str, connector: Rc<ConnectorFn>, overwrite: bool) -> bool {
        if !overwrite && self.connectors.contains_key(name) {
            return false;
        }
        self.connectors.insert(name.to_string(), connector);
        true
    }

    pub fn get(&self, name: &str) -> Option<Rc<ConnectorFn>> {
        self.connectors.get(name).cloned()
    }

    /// Select the default connector for new edges. Returns `false` if no
    /// connector with that name is registered.
    pub fn set_default(&mut self, name: &str) -> bool {
        if self.connectors.contains_key(name) {
            self.default = name.to_string();
            true
        } else {
            false
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    /// Route with the named connector, falling back to the default when
    /// `name` is `None` or unknown.
    pub fn route(&self, name: Option<&str>, source: Point, target: Point) -> PathData {
        let connector = name
            .and_then(|n| self.connectors.get(n))
            .or_else(|| self.connectors.get(&self.default))
            .cloned();
        match connector {
            Some(f) => f(source, target),
            // The default registration can only be missing if a caller
            // overwrote it with set_default removed; route directly.
            None => route_flow_connector(source, target),
        }
    }
}

/// Evaluate a cubic bezier at parameter t.
fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f32) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    Point::new(
        mt3 * p0.x + 3.0 * mt2 * t * c1.x + 3.0 * mt * t2 * c2.x + t3 * p3.x,
        mt3 * p0.y + 3.0 * mt2 * t * c1.y + 3.0 * mt * t2 * c2.y + t3 * p3.y,
    )
}

/// Squared distance from a point to a line segment.
fn distance_to_segment_sq(point: Point, a: Point, b: Point) -> f32 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (point.x - a.x, point.y - a.y);

    let ab_len_sq = ab.0 * ab.0 + ab.1 * ab.1;
    if ab_len_sq < f32::EPSILON {
        return ap.0 * ap.0 + ap.1 * ap.1;
    }

    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / ab_len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * ab.0, a.y + t * ab.1);

    let dx = point.x - closest.x;
    let dy = point.y - closest.y;
    dx * dx + dy * dy
}

/// Minimum distance from a point to a routed path.
///
/// Line segments are measured exactly; cubic segments are flattened into
/// `curve_samples` chords (20 when 0 is passed). Used for edge hover testing.
pub fn distance_to_path(point: Point, path: &PathData, curve_samples: usize) -> f32 {
    let curve_samples = if curve_samples == 0 { 20 } else { curve_samples };

    let mut min_dist_sq = f32::MAX;
    let mut cursor = Point::default();
    let mut has_cursor = false;

    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => {
                cursor = p;
                has_cursor = true;
            }
            PathCommand::LineTo(p) => {
                if has_cursor {
                    min_dist_sq = min_dist_sq.min(distance_to_segment_sq(point, cursor, p));
                }
                cursor = p;
                has_cursor = true;
            }
            PathCommand::CubicTo { c1, c2, to } => {
                if has_cursor {
                    let mut prev = cursor;
                    for i in 1..=curve_samples {
                        let t = i as f32 / curve_samples as f32;
                        let curr = cubic_point(cursor, c1, c2, to, t);
                        min_dist_sq = min_dist_sq.min(distance_to_segment_sq(point, prev, curr));
                        prev = curr;
                    }
                }
                cursor = to;
                has_cursor = true;
            }
        }
    }

    if min_dist_sq == f32::MAX {
        f32::MAX
    } else {
        min_dist_sq.sqrt()
    }
}
