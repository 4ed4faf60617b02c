//! Document - the in-memory node store the audits and fixes operate on

use crate::node::{LayoutProps, Node, NodeType};
use std::collections::HashMap;
use tessera_core::{
    Constraints, IdAllocator, LayoutMode, LayoutPositioning, NodeId, Padding, Rect, Result,
    SizingMode, TesseraError,
};

/// Id given to the page of a freshly created document
const DEFAULT_PAGE_ID: &str = "0:1";

/// Visible region of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: (f64, f64),
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: (0.0, 0.0),
            zoom: 1.0,
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// The node tree of one page plus selection and viewport state.
///
/// Nodes are indexed by id; parent/child links are stored on the nodes
/// themselves. Every mutation goes through a method here so the
/// capability invariants of [`Node`] always hold.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    nodes: HashMap<NodeId, Node>,
    page: NodeId,
    selection: Vec<NodeId>,
    viewport: Viewport,
    ids: IdAllocator,
}

impl Document {
    /// Create a document holding one empty page
    pub fn new(name: impl Into<String>) -> Self {
        let page = Node::new(DEFAULT_PAGE_ID, "Page 1", NodeType::Page);
        Self::with_page_node(name, page)
    }

    /// Create a document around an existing page node
    pub fn with_page(name: impl Into<String>, page: Node) -> Result<Self> {
        if page.node_type != NodeType::Page {
            return Err(TesseraError::InvalidStructure(format!(
                "document root {} must be a PAGE, got {}",
                page.id, page.node_type
            )));
        }
        Ok(Self::with_page_node(name, page))
    }

    fn with_page_node(name: impl Into<String>, mut page: Node) -> Self {
        page.parent = None;
        page.children = Some(Vec::new());
        let page_id = page.id.clone();
        let mut ids = IdAllocator::new();
        ids.observe(&page_id);

        let mut nodes = HashMap::new();
        nodes.insert(page_id.clone(), page);

        Self {
            name: name.into(),
            nodes,
            page: page_id,
            selection: Vec::new(),
            viewport: Viewport::default(),
            ids,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_id(&self) -> &NodeId {
        &self.page
    }

    pub fn page(&self) -> &Node {
        &self.nodes[&self.page]
    }

    /// Look up a node by id
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the store, including the page and detached nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// Any children listed on the incoming node are discarded; attach them
    /// with further `insert` calls.
    pub fn insert(&mut self, parent: &NodeId, mut node: Node) -> Result<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(TesseraError::DuplicateNodeId(node.id.to_string()));
        }
        if let Some(capability) = node.undeclared_capability() {
            return Err(TesseraError::capability(&node.id, node.node_type, capability));
        }
        self.container_children_mut(parent)?;

        let id = node.id.clone();
        self.ids.observe(&id);
        node.parent = Some(parent.clone());
        if node.children.is_some() {
            node.children = Some(Vec::new());
        }
        self.nodes.insert(id.clone(), node);
        self.container_children_mut(parent)?.push(id.clone());
        Ok(id)
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    /// Children of a node in order; empty for leaves and unknown ids
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .and_then(|n| n.children())
            .unwrap_or(&[])
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: &NodeId, id: &NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Ids of `id` and all of its descendants in pre-order
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(&current) {
                continue;
            }
            stack.extend(self.children_of(&current).iter().rev().cloned());
            out.push(current);
        }
        out
    }

    /// Bounds in page coordinates, summing offsets along the parent chain
    pub fn absolute_bounds(&self, id: &NodeId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let mut bounds = node.bounds;
        let mut current = node.parent.as_ref();
        while let Some(p) = current {
            if *p == self.page {
                break;
            }
            let parent = self.nodes.get(p)?;
            bounds.x += parent.bounds.x;
            bounds.y += parent.bounds.y;
            current = parent.parent.as_ref();
        }
        Some(bounds)
    }

    /// Move `child` to the end of `parent`'s children
    pub fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.insert_child(parent, usize::MAX, child)
    }

    /// Move `child` under `parent` at `index` (clamped to the child count)
    pub fn insert_child(&mut self, parent: &NodeId, index: usize, child: &NodeId) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(TesseraError::NodeNotFound(child.to_string()));
        }
        if *child == self.page {
            return Err(TesseraError::InvalidStructure(
                "the page cannot be reparented".to_string(),
            ));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TesseraError::InvalidStructure(format!(
                "cannot move {} inside its own subtree",
                child
            )));
        }
        self.container_children_mut(parent)?;

        self.detach(child);
        let siblings = self.container_children_mut(parent)?;
        let index = index.min(siblings.len());
        siblings.insert(index, child.clone());
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent.clone());
        }
        Ok(())
    }

    /// Detach a node and discard it together with its subtree
    pub fn remove(&mut self, id: &NodeId) -> Result<()> {
        if *id == self.page {
            return Err(TesseraError::InvalidStructure(
                "the page cannot be removed".to_string(),
            ));
        }
        if !self.nodes.contains_key(id) {
            return Err(TesseraError::NodeNotFound(id.to_string()));
        }

        self.detach(id);
        let doomed = self.descendants(id);
        for gone in &doomed {
            self.nodes.remove(gone);
        }
        self.selection.retain(|s| !doomed.contains(s));
        Ok(())
    }

    /// Generated id not yet present in the store
    fn fresh_id(&mut self) -> NodeId {
        loop {
            let id = self.ids.next_id();
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Deep-copy a subtree with fresh ids. The copy starts detached.
    pub fn clone_subtree(&mut self, id: &NodeId) -> Result<NodeId> {
        if *id == self.page {
            return Err(TesseraError::InvalidStructure(
                "the page cannot be cloned".to_string(),
            ));
        }
        if !self.nodes.contains_key(id) {
            return Err(TesseraError::NodeNotFound(id.to_string()));
        }

        let originals = self.descendants(id);
        let mapping: HashMap<NodeId, NodeId> = originals
            .iter()
            .map(|old| (old.clone(), self.fresh_id()))
            .collect();

        for old in &originals {
            let mut copy = self.nodes[old].clone();
            copy.id = mapping[old].clone();
            copy.parent = if old == id {
                None
            } else {
                copy.parent.as_ref().and_then(|p| mapping.get(p)).cloned()
            };
            if let Some(children) = copy.children.as_mut() {
                for child in children.iter_mut() {
                    *child = mapping[&*child].clone();
                }
            }
            self.nodes.insert(copy.id.clone(), copy);
        }

        Ok(mapping[id].clone())
    }

    /// Create a detached frame without auto-layout
    pub fn create_frame(&mut self, name: impl Into<String>, bounds: Rect) -> NodeId {
        let id = self.fresh_id();
        let frame = Node::new(id.clone(), name, NodeType::Frame).with_bounds(bounds);
        self.nodes.insert(id.clone(), frame);
        id
    }

    pub fn rename(&mut self, id: &NodeId, name: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_visible(&mut self, id: &NodeId, visible: bool) -> Result<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn move_to(&mut self, id: &NodeId, x: f64, y: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        node.bounds.x = x;
        node.bounds.y = y;
        Ok(())
    }

    pub fn resize(&mut self, id: &NodeId, width: f64, height: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        node.bounds.width = width;
        node.bounds.height = height;
        Ok(())
    }

    pub fn set_layout_mode(&mut self, id: &NodeId, mode: LayoutMode) -> Result<()> {
        self.layout_mut(id)?.layout_mode = mode;
        Ok(())
    }

    pub fn set_primary_axis_sizing(&mut self, id: &NodeId, mode: SizingMode) -> Result<()> {
        self.layout_mut(id)?.primary_axis_sizing_mode = mode;
        Ok(())
    }

    pub fn set_counter_axis_sizing(&mut self, id: &NodeId, mode: SizingMode) -> Result<()> {
        self.layout_mut(id)?.counter_axis_sizing_mode = mode;
        Ok(())
    }

    pub fn set_padding(&mut self, id: &NodeId, padding: Padding) -> Result<()> {
        self.layout_mut(id)?.padding = padding;
        Ok(())
    }

    pub fn set_item_spacing(&mut self, id: &NodeId, spacing: f64) -> Result<()> {
        self.layout_mut(id)?.item_spacing = spacing;
        Ok(())
    }

    pub fn set_constraints(&mut self, id: &NodeId, constraints: Constraints) -> Result<()> {
        let node = self.node_mut(id)?;
        match node.constraints.as_mut() {
            Some(c) => {
                *c = constraints;
                Ok(())
            }
            None => Err(TesseraError::capability(id, node.node_type, "constraints")),
        }
    }

    pub fn set_positioning(&mut self, id: &NodeId, positioning: LayoutPositioning) -> Result<()> {
        let node = self.node_mut(id)?;
        match node.positioning.as_mut() {
            Some(p) => {
                *p = positioning;
                Ok(())
            }
            None => Err(TesseraError::capability(id, node.node_type, "positioning")),
        }
    }

    /// Currently selected top-level nodes
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn set_selection(&mut self, ids: Vec<NodeId>) -> Result<()> {
        if let Some(missing) = ids.iter().find(|id| !self.nodes.contains_key(*id)) {
            return Err(TesseraError::NodeNotFound(missing.to_string()));
        }
        self.selection = ids;
        Ok(())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Center the viewport on the union of the given nodes and zoom to fit.
    ///
    /// Unknown ids are ignored; if none are known the viewport is unchanged.
    pub fn scroll_and_zoom_into_view(&mut self, ids: &[NodeId]) {
        let area = ids
            .iter()
            .filter_map(|id| self.absolute_bounds(id))
            .reduce(|acc, r| acc.union(&r));

        if let Some(area) = area {
            self.viewport.center = area.center();
            if area.width > 0.0 && area.height > 0.0 {
                let fit = (self.viewport.width / area.width)
                    .min(self.viewport.height / area.height);
                self.viewport.zoom = fit.clamp(0.01, 256.0);
            }
        }
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TesseraError::NodeNotFound(id.to_string()))
    }

    fn layout_mut(&mut self, id: &NodeId) -> Result<&mut LayoutProps> {
        let node = self.node_mut(id)?;
        let node_type = node.node_type;
        node.layout
            .as_mut()
            .ok_or_else(|| TesseraError::capability(id, node_type, "layout"))
    }

    fn container_children_mut(&mut self, id: &NodeId) -> Result<&mut Vec<NodeId>> {
        let node = self.node_mut(id)?;
        let node_type = node.node_type;
        node.children
            .as_mut()
            .ok_or_else(|| TesseraError::capability(id, node_type, "children"))
    }

    /// Unlink a node from its parent's child list
    fn detach(&mut self, id: &NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            if let Some(siblings) = self.nodes.get_mut(&parent).and_then(|p| p.children.as_mut()) {
                siblings.retain(|c| c != id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Paint;
    use tessera_core::Rgb;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new("Sample");
        let page = doc.page_id().clone();
        let card = doc
            .insert(
                &page,
                Node::new("1:1", "Card", NodeType::Frame)
                    .with_bounds(Rect::new(10.0, 20.0, 200.0, 100.0)),
            )
            .unwrap();
        let title = doc
            .insert(
                &card,
                Node::new("1:2", "Title", NodeType::Text)
                    .with_bounds(Rect::new(5.0, 5.0, 50.0, 10.0))
                    .with_fills(vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0))]),
            )
            .unwrap();
        let body = doc
            .insert(&card, Node::new("1:3", "Body", NodeType::Rectangle))
            .unwrap();
        (doc, card, title, body)
    }

    #[test]
    fn test_insert_and_lookup() {
        let (doc, card, title, body) = sample();
        assert_eq!(doc.node_count(), 4);
        assert_eq!(doc.children_of(&card), &[title.clone(), body][..]);
        assert_eq!(doc.parent_of(&title), Some(&card));
        assert!(doc.is_ancestor(&card, &title));
        assert!(!doc.is_ancestor(&title, &card));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let (mut doc, card, _, _) = sample();
        let result = doc.insert(&card, Node::new("1:2", "Again", NodeType::Text));
        assert!(matches!(result, Err(TesseraError::DuplicateNodeId(_))));
    }

    #[test]
    fn test_insert_into_leaf_rejected() {
        let (mut doc, _, title, _) = sample();
        let result = doc.insert(&title, Node::new("1:9", "Nested", NodeType::Text));
        assert!(matches!(result, Err(TesseraError::CapabilityMismatch { .. })));
    }

    #[test]
    fn test_layout_setter_requires_capability() {
        let (mut doc, card, title, _) = sample();
        doc.set_layout_mode(&card, LayoutMode::Horizontal).unwrap();
        assert!(doc.get(&card).unwrap().has_auto_layout());
        assert!(matches!(
            doc.set_layout_mode(&title, LayoutMode::Vertical),
            Err(TesseraError::CapabilityMismatch { .. })
        ));
    }

    #[test]
    fn test_reparent_and_cycle_guard() {
        let (mut doc, card, title, body) = sample();
        let page = doc.page_id().clone();
        doc.insert_child(&page, 0, &title).unwrap();
        assert_eq!(doc.children_of(&page)[0], title);
        assert_eq!(doc.children_of(&card), &[body][..]);

        assert!(matches!(
            doc.append_child(&card, &card),
            Err(TesseraError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_clone_subtree_fresh_ids() {
        let (mut doc, card, title, _) = sample();
        let copy = doc.clone_subtree(&card).unwrap();
        assert_ne!(copy, card);
        assert!(doc.parent_of(&copy).is_none());

        let copied_children = doc.children_of(&copy).to_vec();
        assert_eq!(copied_children.len(), 2);
        assert!(!copied_children.contains(&title));
        assert_eq!(doc.get(&copied_children[0]).unwrap().name, "Title");
        assert_eq!(doc.parent_of(&copied_children[0]), Some(&copy));

        // original untouched
        assert_eq!(doc.children_of(&card).len(), 2);
    }

    #[test]
    fn test_remove_subtree_and_selection() {
        let (mut doc, card, title, _) = sample();
        doc.set_selection(vec![title.clone()]).unwrap();
        doc.remove(&card).unwrap();
        assert!(!doc.contains(&card));
        assert!(!doc.contains(&title));
        assert!(doc.selection().is_empty());
        assert!(doc.children_of(doc.page_id()).is_empty());
    }

    #[test]
    fn test_absolute_bounds_and_viewport() {
        let (mut doc, _, title, _) = sample();
        assert_eq!(
            doc.absolute_bounds(&title),
            Some(Rect::new(15.0, 25.0, 50.0, 10.0))
        );

        doc.scroll_and_zoom_into_view(&[title.clone()]);
        assert_eq!(doc.viewport().center, (40.0, 30.0));
        assert!(doc.viewport().zoom > 1.0);

        let before = *doc.viewport();
        doc.scroll_and_zoom_into_view(&[NodeId::from("404:0")]);
        assert_eq!(*doc.viewport(), before);
    }

    #[test]
    fn test_set_selection_unknown() {
        let (mut doc, _, _, _) = sample();
        assert!(matches!(
            doc.set_selection(vec![NodeId::from("9:9")]),
            Err(TesseraError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_generated_ids_skip_taken_ids() {
        let content = r#"{
            "document": { "name": "Ids" },
            "page": {
                "id": "0:1", "name": "Page 1", "type": "PAGE",
                "children": [
                    { "id": "T:18446744073709551615", "name": "Last", "type": "FRAME" },
                    { "id": "T:0", "name": "Zero", "type": "FRAME" }
                ]
            }
        }"#;
        let mut doc = crate::load_document_str(content, crate::DocumentFormat::Json).unwrap();
        assert_eq!(doc.node_count(), 3);

        let frame = doc.create_frame("Fresh", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(frame.as_str(), "T:1");
        assert_eq!(doc.get(&NodeId::from("T:0")).unwrap().name, "Zero");

        let copy = doc.clone_subtree(&NodeId::from("T:0")).unwrap();
        assert_ne!(copy, NodeId::from("T:0"));
        assert_eq!(doc.get(&NodeId::from("T:0")).unwrap().name, "Zero");
        assert_eq!(doc.node_count(), 5);
    }
}
