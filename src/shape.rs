//! Node shapes, shape templates, and the palette.
//!
//! A node's "shape" is a tagged enumeration rather than an inheritance
//! hierarchy: each variant carries the data its rendering strategy needs.
//! [`ShapeRegistry`] maps template names to reusable [`ShapeTemplate`]s, and
//! [`Palette`] groups prototype entries for a side panel the user drags nodes
//! out of. Instantiating a prototype creates a real node in the graph.

use std::collections::HashMap;

use slint::Color;

use crate::graph::FlowGraph;
use crate::style::NodeData;

/// How a node body is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeShape {
    /// Rectangle with optional corner radii (`rx`/`ry` of 0.0 draws sharp
    /// corners; large radii approximate a stadium/terminator shape).
    Rect { rx: f32, ry: f32 },
    /// Application-supplied UI template, resolved by name at render time.
    /// The graph core treats it as opaque.
    Template { name: String },
}

impl Default for NodeShape {
    fn default() -> Self {
        NodeShape::Rect { rx: 0.0, ry: 0.0 }
    }
}

/// Fill and stroke of a node body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl Default for BodyStyle {
    fn default() -> Self {
        Self {
            fill: Color::from_rgb_u8(0xEF, 0xF4, 0xFF),
            stroke: Color::from_rgb_u8(0x5F, 0x95, 0xFF),
            stroke_width: 1.0,
        }
    }
}

/// Label text attributes of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub font_size: f32,
    pub color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: Color::from_rgb_u8(0x26, 0x26, 0x26),
        }
    }
}

/// A reusable, named node description.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeTemplate {
    pub name: String,
    pub shape: NodeShape,
    pub width: f32,
    pub height: f32,
    pub body: BodyStyle,
    pub label: LabelStyle,
}

impl ShapeTemplate {
    /// A plain 66x36 rectangle template with the default body/label styling.
    pub fn rect(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: NodeShape::default(),
            width: 66.0,
            height: 36.0,
            body: BodyStyle::default(),
            label: LabelStyle::default(),
        }
    }

    /// A template rendered by an application-supplied UI component.
    pub fn template(name: impl Into<String>, width: f32, height: f32) -> Self {
        let name = name.into();
        Self {
            shape: NodeShape::Template { name: name.clone() },
            name,
            width,
            height,
            body: BodyStyle::default(),
            label: LabelStyle::default(),
        }
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Named registry of shape templates.
pub struct ShapeRegistry {
    templates: HashMap<String, ShapeTemplate>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Register a template under its own name.
    ///
    /// Returns `false` without replacing anything if the name is taken and
    /// `overwrite` is not set.
    pub fn register(&mut self, template: ShapeTemplate, overwrite: bool) -> bool {
        if !overwrite && self.templates.contains_key(&template.name) {
            return false;
        }
        self.templates.insert(template.name.clone(), template);
        true
    }

    pub fn get(&self, name: &str) -> Option<&ShapeTemplate> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Create a node from the named template at the given canvas position.
    ///
    /// Returns the new node id, or `None` if the template is unknown.
    pub fn instantiate(
        &self,
        name: &str,
        graph: &mut FlowGraph,
        x: f32,
        y: f32,
        label: impl Into<String>,
    ) -> Option<i32> {
        let template = self.templates.get(name)?;
        Some(graph.add_node(
            template.shape.clone(),
            (x, y, template.width, template.height),
            NodeData::new(label),
        ))
    }
}

/// Grid layout of a palette group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupLayout {
    pub columns: u32,
    pub column_width: f32,
    pub row_height: f32,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            columns: 2,
            column_width: 80.0,
            row_height: 55.0,
        }
    }
}

/// A prototype entry shown in the palette: template name plus the label the
/// instantiated node will carry.
#[derive(Clone, Debug, PartialEq)]
pub struct Prototype {
    pub template: String,
    pub label: String,
}

/// A titled group of prototypes.
#[derive(Clone, Debug)]
pub struct PaletteGroup {
    pub name: String,
    pub title: String,
    pub layout: GroupLayout,
    prototypes: Vec<Prototype>,
}

impl PaletteGroup {
    pub fn prototypes(&self) -> &[Prototype] {
        &self.prototypes
    }
}

/// The side panel users drag nodes out of.
///
/// The palette holds only prototype descriptions; dropping one onto the
/// canvas goes through [`Palette::drop_onto`], which instantiates the
/// template into the graph.
pub struct Palette {
    pub title: String,
    groups: Vec<PaletteGroup>,
}

impl Palette {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            groups: Vec::new(),
        }
    }

    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        layout: GroupLayout,
    ) {
        self.groups.push(PaletteGroup {
            name: name.into(),
            title: title.into(),
            layout,
            prototypes: Vec::new(),
        });
    }

    pub fn groups(&self) -> &[PaletteGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&PaletteGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Load prototypes into a group. Returns `false` if the group is unknown.
    pub fn load(&mut self, group: &str, prototypes: Vec<Prototype>) -> bool {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(g) => {
                g.prototypes.extend(prototypes);
                true
            }
            None => false,
        }
    }

    /// Instantiate a group prototype into the graph at the drop position.
    ///
    /// Returns the new node id, or `None` if the group/index/template cannot
    /// be resolved.
    pub fn drop_onto(
        &self,
        registry: &ShapeRegistry,
        graph: &mut FlowGraph,
        group: &str,
        index: usize,
        x: f32,
        y: f32,
    ) -> Option<i32> {
        let prototype = self.group(group)?.prototypes.get(index)?.clone();
        registry.instantiate(&prototype.template, graph, x, y, prototype.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_rect() -> ShapeRegistry {
        let mut registry = ShapeRegistry::new();
        registry.register(ShapeTemplate::rect("step"), false);
        registry
    }

    #[test]
    fn test_rect_template_defaults() {
        let template = ShapeTemplate::rect("step");
        assert_eq!(template.width, 66.0);
        assert_eq!(template.height, 36.0);
        assert_eq!(template.shape, NodeShape::Rect { rx: 0.0, ry: 0.0 });
    }

    #[test]
    fn test_register_without_overwrite() {
        let mut registry = registry_with_rect();
        let replaced = registry.register(ShapeTemplate::rect("step").with_size(1.0, 1.0), false);
        assert!(!replaced);
        assert_eq!(registry.get("step").unwrap().width, 66.0);
    }

    #[test]
    fn test_register_with_overwrite() {
        let mut registry = registry_with_rect();
        assert!(registry.register(ShapeTemplate::rect("step").with_size(100.0, 40.0), true));
        assert_eq!(registry.get("step").unwrap().width, 100.0);
    }

    #[test]
    fn test_instantiate_creates_node_with_template_bounds() {
        let registry = registry_with_rect();
        let mut graph = FlowGraph::new();

        let id = registry
            .instantiate("step", &mut graph, 10.0, 20.0, "Start")
            .unwrap();

        let node = graph.node(id).unwrap();
        assert_eq!(node.bounds(), (10.0, 20.0, 66.0, 36.0));
        assert_eq!(node.data.label, "Start");
    }

    #[test]
    fn test_instantiate_unknown_template() {
        let registry = registry_with_rect();
        let mut graph = FlowGraph::new();
        assert!(registry
            .instantiate("missing", &mut graph, 0.0, 0.0, "x")
            .is_none());
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_palette_groups_and_load() {
        let mut palette = Palette::new("Progress Library");
        palette.add_group("group1", "Basics", GroupLayout::default());
        palette.add_group(
            "group2",
            "Templates",
            GroupLayout {
                columns: 1,
                column_width: 176.0,
                row_height: 70.0,
            },
        );

        assert!(palette.load(
            "group1",
            vec![Prototype {
                template: "step".to_string(),
                label: "Start".to_string(),
            }],
        ));
        assert!(!palette.load("nope", vec![]));

        assert_eq!(palette.groups().len(), 2);
        assert_eq!(palette.group("group1").unwrap().prototypes().len(), 1);
        assert_eq!(palette.group("group2").unwrap().layout.columns, 1);
    }

    #[test]
    fn test_palette_drop_onto_instantiates() {
        let registry = registry_with_rect();
        let mut palette = Palette::new("Shapes");
        palette.add_group("g", "G", GroupLayout::default());
        palette.load(
            "g",
            vec![Prototype {
                template: "step".to_string(),
                label: "Start".to_string(),
            }],
        );

        let mut graph = FlowGraph::new();
        let id = palette
            .drop_onto(&registry, &mut graph, "g", 0, 50.0, 60.0)
            .unwrap();
        assert_eq!(graph.node(id).unwrap().data.label, "Start");
    }

    #[test]
    fn test_palette_drop_unknown_index() {
        let registry = registry_with_rect();
        let mut palette = Palette::new("Shapes");
        palette.add_group("g", "G", GroupLayout::default());

        let mut graph = FlowGraph::new();
        assert!(palette
            .drop_onto(&registry, &mut graph, "g", 3, 0.0, 0.0)
            .is_none());
    }
}
