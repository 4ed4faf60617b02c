//! Document file format definitions

use crate::node::{LayoutProps, Node, NodeType, Paint, Paints};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tessera_core::{
    Constraints, LayoutMode, LayoutPositioning, NodeId, Padding, Rect, Result, SizingMode,
    TesseraError,
};

/// Root structure of a document file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub document: DocumentMetadata,
    /// Ids of the selected top-level nodes
    #[serde(default)]
    pub selection: Vec<NodeId>,
    pub page: NodeDef,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_visible() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A node as written in a document file, using the host's property names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDef {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default = "default_visible", skip_serializing_if = "is_true")]
    pub visible: bool,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_sizing_mode: Option<SizingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_sizing_mode: Option<SizingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_positioning: Option<LayoutPositioning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
}

impl NodeDef {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            visible: true,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fills: None,
            strokes: None,
            layout_mode: None,
            primary_axis_sizing_mode: None,
            counter_axis_sizing_mode: None,
            padding_top: None,
            padding_right: None,
            padding_bottom: None,
            padding_left: None,
            item_spacing: None,
            constraints: None,
            layout_positioning: None,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeDef) -> Self {
        self.children.push(child);
        self
    }

    fn has_layout_fields(&self) -> bool {
        self.layout_mode.is_some()
            || self.primary_axis_sizing_mode.is_some()
            || self.counter_axis_sizing_mode.is_some()
            || self.padding_top.is_some()
            || self.padding_right.is_some()
            || self.padding_bottom.is_some()
            || self.padding_left.is_some()
            || self.item_spacing.is_some()
    }

    /// Build the node this definition describes (children excluded).
    ///
    /// Properties the node type cannot carry are rejected rather than dropped.
    pub fn to_node(&self) -> Result<Node> {
        let caps = self.node_type.capabilities();
        let reject = |capability: &str| -> Result<Node> {
            Err(TesseraError::capability(&self.id, self.node_type, capability))
        };

        if (self.fills.is_some() || self.strokes.is_some()) && !caps.paintable {
            return reject("paints");
        }
        if self.has_layout_fields() && !caps.layout {
            return reject("layout");
        }
        if self.constraints.is_some() && !caps.constrainable {
            return reject("constraints");
        }
        if self.layout_positioning.is_some() && !caps.positionable {
            return reject("positioning");
        }
        if !self.children.is_empty() && !caps.container {
            return reject("children");
        }

        let mut node = Node::new(self.id.clone(), self.name.clone(), self.node_type);
        node.visible = self.visible;
        node.bounds = Rect::new(self.x, self.y, self.width, self.height);

        if let Some(paints) = node.paints.as_mut() {
            *paints = Paints {
                fills: self.fills.clone().unwrap_or_default(),
                strokes: self.strokes.clone().unwrap_or_default(),
            };
        }
        if let Some(layout) = node.layout.as_mut() {
            let defaults = LayoutProps::default();
            *layout = LayoutProps {
                layout_mode: self.layout_mode.unwrap_or(defaults.layout_mode),
                primary_axis_sizing_mode: self
                    .primary_axis_sizing_mode
                    .unwrap_or(defaults.primary_axis_sizing_mode),
                counter_axis_sizing_mode: self
                    .counter_axis_sizing_mode
                    .unwrap_or(defaults.counter_axis_sizing_mode),
                padding: Padding::new(
                    self.padding_top.unwrap_or(0.0),
                    self.padding_right.unwrap_or(0.0),
                    self.padding_bottom.unwrap_or(0.0),
                    self.padding_left.unwrap_or(0.0),
                ),
                item_spacing: self.item_spacing.unwrap_or(0.0),
            };
        }
        if let (Some(c), Some(constraints)) = (node.constraints.as_mut(), self.constraints) {
            *c = constraints;
        }
        if let (Some(p), Some(positioning)) = (node.positioning.as_mut(), self.layout_positioning) {
            *p = positioning;
        }

        Ok(node)
    }

    /// Describe a node; children are filled in by the caller
    pub fn from_node(node: &Node) -> Self {
        let mut def = NodeDef::new(node.id.clone(), node.name.clone(), node.node_type);
        def.visible = node.visible;
        def.x = node.bounds.x;
        def.y = node.bounds.y;
        def.width = node.bounds.width;
        def.height = node.bounds.height;

        if let Some(paints) = node.paints() {
            def.fills = Some(paints.fills.clone());
            def.strokes = Some(paints.strokes.clone());
        }
        if let Some(layout) = node.layout() {
            def.layout_mode = Some(layout.layout_mode);
            def.primary_axis_sizing_mode = Some(layout.primary_axis_sizing_mode);
            def.counter_axis_sizing_mode = Some(layout.counter_axis_sizing_mode);
            def.padding_top = Some(layout.padding.top);
            def.padding_right = Some(layout.padding.right);
            def.padding_bottom = Some(layout.padding.bottom);
            def.padding_left = Some(layout.padding.left);
            def.item_spacing = Some(layout.item_spacing);
        }
        def.constraints = node.constraints().copied();
        def.layout_positioning = node.positioning();
        def
    }
}

/// Serialization format of a document file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DocumentFormat::Json),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => Err(TesseraError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
