//! Node model with per-type capabilities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tessera_core::{
    Constraints, LayoutMode, LayoutPositioning, NodeId, Padding, Rect, Rgb, SizingMode,
};

/// Closed set of node types a document can contain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Page,
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Section,
    BooleanOperation,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Vector,
    Text,
    Slice,
}

/// The property groups a node type exposes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Fill and stroke paint lists
    pub paintable: bool,
    /// Ordered children
    pub container: bool,
    /// Auto-layout mode, sizing, padding and spacing
    pub layout: bool,
    /// Horizontal/vertical resize constraints
    pub constrainable: bool,
    /// Absolute/auto positioning inside an auto-layout parent
    pub positionable: bool,
}

impl NodeType {
    pub fn capabilities(&self) -> Capabilities {
        use NodeType::*;
        match self {
            Page => Capabilities {
                container: true,
                ..Default::default()
            },
            Frame | Component | ComponentSet | Instance => Capabilities {
                paintable: true,
                container: true,
                layout: true,
                constrainable: true,
                positionable: true,
            },
            Group => Capabilities {
                container: true,
                positionable: true,
                ..Default::default()
            },
            Section => Capabilities {
                paintable: true,
                container: true,
                ..Default::default()
            },
            BooleanOperation => Capabilities {
                paintable: true,
                container: true,
                positionable: true,
                ..Default::default()
            },
            Rectangle | Ellipse | Polygon | Star | Line | Vector | Text => Capabilities {
                paintable: true,
                constrainable: true,
                positionable: true,
                ..Default::default()
            },
            Slice => Capabilities {
                constrainable: true,
                ..Default::default()
            },
        }
    }

    /// Types the layout rules treat as auto-layout hosts
    pub fn is_layout_container(&self) -> bool {
        matches!(
            self,
            NodeType::Frame | NodeType::Component | NodeType::Instance | NodeType::ComponentSet
        )
    }

    pub fn as_str(&self) -> &'static str {
        use NodeType::*;
        match self {
            Page => "PAGE",
            Frame => "FRAME",
            Group => "GROUP",
            Component => "COMPONENT",
            ComponentSet => "COMPONENT_SET",
            Instance => "INSTANCE",
            Section => "SECTION",
            BooleanOperation => "BOOLEAN_OPERATION",
            Rectangle => "RECTANGLE",
            Ellipse => "ELLIPSE",
            Polygon => "POLYGON",
            Star => "STAR",
            Line => "LINE",
            Vector => "VECTOR",
            Text => "TEXT",
            Slice => "SLICE",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a paint entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Video,
}

/// Reference from a paint property to a design-system variable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type", default = "variable_alias_type")]
    pub kind: String,
    pub id: String,
}

fn variable_alias_type() -> String {
    "VARIABLE_ALIAS".to_string()
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: variable_alias_type(),
            id: id.into(),
        }
    }
}

/// One entry of a fill or stroke list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BTreeMap<String, VariableAlias>>,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self {
            kind: PaintKind::Solid,
            color: Some(color),
            opacity: None,
            bound_variables: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Bind the color property to a variable
    pub fn bound_to(mut self, variable_id: impl Into<String>) -> Self {
        self.bound_variables
            .get_or_insert_with(BTreeMap::new)
            .insert("color".to_string(), VariableAlias::new(variable_id));
        self
    }

    pub fn is_solid(&self) -> bool {
        self.kind == PaintKind::Solid
    }

    pub fn is_color_bound(&self) -> bool {
        self.bound_variables
            .as_ref()
            .map(|b| b.contains_key("color"))
            .unwrap_or(false)
    }

    /// A solid color that no variable drives
    pub fn is_unbound_solid(&self) -> bool {
        self.is_solid() && self.color.is_some() && !self.is_color_bound()
    }

    pub fn resolved_opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Fill and stroke lists of a paintable node
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paints {
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
}

/// Auto-layout attributes of a layout-capable node
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutProps {
    pub layout_mode: LayoutMode,
    pub primary_axis_sizing_mode: SizingMode,
    pub counter_axis_sizing_mode: SizingMode,
    pub padding: Padding,
    pub item_spacing: f64,
}

impl LayoutProps {
    /// Vertical auto-layout hugging its content on both axes
    pub fn vertical_hug() -> Self {
        Self {
            layout_mode: LayoutMode::Vertical,
            primary_axis_sizing_mode: SizingMode::Auto,
            counter_axis_sizing_mode: SizingMode::Auto,
            ..Default::default()
        }
    }
}

/// A node in the document tree.
///
/// Capability data lives in `Option` fields that are `Some` exactly when the
/// node's type declares the capability; [`crate::Document`] enforces this on
/// insertion, so code can match on the accessors instead of probing types.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub node_type: NodeType,
    pub visible: bool,
    pub bounds: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<Vec<NodeId>>,
    pub(crate) paints: Option<Paints>,
    pub(crate) layout: Option<LayoutProps>,
    pub(crate) constraints: Option<Constraints>,
    pub(crate) positioning: Option<LayoutPositioning>,
}

impl Node {
    /// Create a node with default data for every capability of its type
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, node_type: NodeType) -> Self {
        let caps = node_type.capabilities();
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            visible: true,
            bounds: Rect::default(),
            parent: None,
            children: caps.container.then(Vec::new),
            paints: caps.paintable.then(Paints::default),
            layout: caps.layout.then(LayoutProps::default),
            constraints: caps.constrainable.then(Constraints::default),
            positioning: caps.positionable.then(LayoutPositioning::default),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Replace the paint lists; ignored for non-paintable types
    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        if let Some(paints) = self.paints.as_mut() {
            paints.fills = fills;
        }
        self
    }

    pub fn with_strokes(mut self, strokes: Vec<Paint>) -> Self {
        if let Some(paints) = self.paints.as_mut() {
            paints.strokes = strokes;
        }
        self
    }

    pub fn with_layout(mut self, layout: LayoutProps) -> Self {
        if self.layout.is_some() {
            self.layout = Some(layout);
        }
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        if self.constraints.is_some() {
            self.constraints = Some(constraints);
        }
        self
    }

    pub fn with_positioning(mut self, positioning: LayoutPositioning) -> Self {
        if self.positioning.is_some() {
            self.positioning = Some(positioning);
        }
        self
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Children in order, `None` for non-container types
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn child_count(&self) -> usize {
        self.children.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn paints(&self) -> Option<&Paints> {
        self.paints.as_ref()
    }

    pub fn layout(&self) -> Option<&LayoutProps> {
        self.layout.as_ref()
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    pub fn positioning(&self) -> Option<LayoutPositioning> {
        self.positioning
    }

    /// True when this node arranges its children with auto-layout
    pub fn has_auto_layout(&self) -> bool {
        self.layout
            .map(|l| l.layout_mode.is_auto_layout())
            .unwrap_or(false)
    }

    /// Name of the first capability carried by this node that its type lacks
    pub(crate) fn undeclared_capability(&self) -> Option<&'static str> {
        let caps = self.node_type.capabilities();
        if self.children.is_some() != caps.container {
            return Some("children");
        }
        if self.paints.is_some() != caps.paintable {
            return Some("paints");
        }
        if self.layout.is_some() != caps.layout {
            return Some("layout");
        }
        if self.constraints.is_some() != caps.constrainable {
            return Some("constraints");
        }
        if self.positioning.is_some() != caps.positionable {
            return Some("positioning");
        }
        None
    }
}
