//! Color audit: solid paints that are not bound to a variable

use serde::{Deserialize, Serialize};
use tessera_core::NodeId;
use tessera_doc::{Document, Node, NodeType, Paint};
use tracing::debug;

/// Which paint list an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintSource {
    Fill,
    Stroke,
}

/// Color channels plus resolved opacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub opacity: f64,
}

/// One unbound solid paint entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnboundColor {
    #[serde(rename = "type")]
    pub source: PaintSource,
    /// Position in the original fill or stroke list
    pub index: usize,
    pub color: ColorValue,
}

/// A node with at least one unbound solid paint of its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFinding {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub colors: Vec<UnboundColor>,
    pub visible: bool,
}

/// True if any fill or stroke is a solid color without a variable binding
pub fn has_unbound_color(node: &Node) -> bool {
    node.paints()
        .map(|p| p.fills.iter().chain(&p.strokes).any(Paint::is_unbound_solid))
        .unwrap_or(false)
}

/// Unbound solid entries, fills first then strokes, in list order
pub fn extract_unbound_colors(node: &Node) -> Vec<UnboundColor> {
    let Some(paints) = node.paints() else {
        return Vec::new();
    };

    let lists = [
        (PaintSource::Fill, &paints.fills),
        (PaintSource::Stroke, &paints.strokes),
    ];

    let mut colors = Vec::new();
    for (source, list) in lists {
        for (index, paint) in list.iter().enumerate() {
            if !paint.is_unbound_solid() {
                continue;
            }
            if let Some(rgb) = paint.color {
                colors.push(UnboundColor {
                    source,
                    index,
                    color: ColorValue {
                        r: rgb.r,
                        g: rgb.g,
                        b: rgb.b,
                        opacity: paint.resolved_opacity(),
                    },
                });
            }
        }
    }
    colors
}

/// Walks a document looking for unbound colors
pub struct ColorAudit<'a> {
    doc: &'a Document,
    exclude_hidden: bool,
}

impl<'a> ColorAudit<'a> {
    pub fn new(doc: &'a Document, exclude_hidden: bool) -> Self {
        Self {
            doc,
            exclude_hidden,
        }
    }

    /// Findings for a subtree. Descendants are listed before the node itself.
    pub fn traverse(&self, id: &NodeId) -> Vec<ColorFinding> {
        let mut findings = Vec::new();
        self.collect(id, &mut findings);
        findings
    }

    /// Findings for every selected node; empty when nothing is selected
    pub fn search_selection(&self) -> Vec<ColorFinding> {
        let mut findings = Vec::new();
        for id in self.doc.selection() {
            self.collect(id, &mut findings);
        }
        findings
    }

    /// Findings for the whole page
    pub fn search_page(&self) -> Vec<ColorFinding> {
        self.traverse(self.doc.page_id())
    }

    fn collect(&self, id: &NodeId, findings: &mut Vec<ColorFinding>) {
        let Some(node) = self.doc.get(id) else {
            return;
        };

        if self.exclude_hidden && !node.visible {
            debug!(node = %id, "skipping hidden subtree");
            return;
        }

        for child in self.doc.children_of(id) {
            self.collect(child, findings);
        }

        if has_unbound_color(node) {
            let colors = extract_unbound_colors(node);
            if !colors.is_empty() {
                findings.push(ColorFinding {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    node_type: node.node_type,
                    colors,
                    visible: node.visible,
                });
            }
        }
    }
}
