//! Visual style records for edges and the node data payload.
//!
//! An edge's style is a plain value the renderer reads each frame: stroke
//! color and width, an optional dash pattern, an optional stroke animation,
//! and an optional arrowhead marker. [`EdgeStyle::default`] matches the style
//! applied to newly drawn edges.

use slint::Color;

/// Status tag carried by every node's data payload. The only value with
/// special meaning to edge styling is [`STATUS_RUNNING`]; all other values
/// (including unrecognized ones) are treated identically as "not running".
pub const STATUS_DEFAULT: &str = "default";
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";

/// Opaque data payload attached to a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeData {
    pub label: String,
    /// Free-form status tag; see [`STATUS_RUNNING`].
    pub status: String,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            label: String::new(),
            status: STATUS_DEFAULT.to_string(),
        }
    }
}

impl NodeData {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_status(label: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: status.into(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == STATUS_RUNNING
    }
}

/// Timing function of a stroke animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationTiming {
    Linear,
    Ease,
}

impl AnimationTiming {
    fn as_str(self) -> &'static str {
        match self {
            AnimationTiming::Linear => "linear",
            AnimationTiming::Ease => "ease",
        }
    }
}

/// Repeat behavior of a stroke animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationRepeat {
    Infinite,
    Count(u32),
}

/// A looped animation attached to an edge's rendered stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeAnimation {
    /// Animation name the renderer resolves (a keyframe set or shader id).
    pub name: String,
    pub duration_secs: f32,
    pub timing: AnimationTiming,
    pub repeat: AnimationRepeat,
}

impl StrokeAnimation {
    /// The "data flowing" animation applied to edges entering a running node:
    /// 30 second period, linear timing, infinite repeat.
    pub fn running_line() -> Self {
        Self {
            name: "running-line".to_string(),
            duration_secs: 30.0,
            timing: AnimationTiming::Linear,
            repeat: AnimationRepeat::Infinite,
        }
    }

    /// CSS-style shorthand, e.g. `"running-line 30s infinite linear"`.
    pub fn to_css(&self) -> String {
        let repeat = match self.repeat {
            AnimationRepeat::Infinite => "infinite".to_string(),
            AnimationRepeat::Count(n) => n.to_string(),
        };
        format!(
            "{} {}s {} {}",
            self.name,
            self.duration_secs,
            repeat,
            self.timing.as_str()
        )
    }
}

/// Arrowhead drawn at the target end of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetMarker {
    Block { width: f32, height: f32 },
}

/// Visual style of an edge's stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
    pub stroke: Color,
    pub stroke_width: f32,
    /// Dash segment length; `None` renders a solid line.
    pub dash: Option<f32>,
    pub animation: Option<StrokeAnimation>,
    pub target_marker: Option<TargetMarker>,
}

impl Default for EdgeStyle {
    /// Style of a freshly drawn edge: solid 2px `#A2B1C3` stroke with a
    /// 12x8 block arrowhead, no dash, no animation.
    fn default() -> Self {
        Self {
            stroke: Color::from_rgb_u8(0xA2, 0xB1, 0xC3),
            stroke_width: 2.0,
            dash: None,
            animation: None,
            target_marker: Some(TargetMarker::Block {
                width: 12.0,
                height: 8.0,
            }),
        }
    }
}

impl EdgeStyle {
    /// Dash shorthand for renderers expecting a number: 0.0 when solid.
    pub fn dash_or_zero(&self) -> f32 {
        self.dash.unwrap_or(0.0)
    }

    /// Animation shorthand for renderers expecting a string: empty when none.
    pub fn animation_css(&self) -> String {
        self.animation
            .as_ref()
            .map(StrokeAnimation::to_css)
            .unwrap_or_default()
    }
}
