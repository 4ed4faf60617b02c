//! Layout audit: rule evaluation over a node tree

use crate::config::AuditOptions;
use crate::types::{IssueDetail, IssueKind, LayoutFinding, LayoutIssue};
use tessera_core::{ConstraintType, LayoutPositioning, NodeId, SizingMode};
use tessera_doc::{Document, Node, NodeType};
use tracing::debug;

/// Evaluates the configured layout rules against a document
pub struct LayoutAudit<'a> {
    doc: &'a Document,
    options: &'a AuditOptions,
}

impl<'a> LayoutAudit<'a> {
    pub fn new(doc: &'a Document, options: &'a AuditOptions) -> Self {
        Self { doc, options }
    }

    /// Run every rule of the configured set against one node.
    ///
    /// Rules are independent of each other; a node can collect issues from
    /// several categories at once.
    pub fn check_node(&self, node: &Node) -> LayoutFinding {
        let rules = self.options.rule_set;
        let mut issues = Vec::new();

        if node.node_type.is_layout_container() {
            if let Some(layout) = node.layout() {
                if !layout.layout_mode.is_auto_layout() {
                    issues.push(LayoutIssue::new(IssueDetail::NoAutoLayout));
                } else {
                    if layout.primary_axis_sizing_mode == SizingMode::Fixed {
                        issues.push(LayoutIssue::new(IssueDetail::FixedPrimaryAxis));
                    }
                    if layout.counter_axis_sizing_mode == SizingMode::Fixed {
                        issues.push(LayoutIssue::new(IssueDetail::FixedCounterAxis));
                    }
                    if rules.evaluates(IssueKind::FixedItemSpacing) && layout.item_spacing > 0.0 {
                        issues.push(LayoutIssue::new(IssueDetail::FixedItemSpacing {
                            value: layout.item_spacing,
                        }));
                    }
                    if rules.evaluates(IssueKind::AsymmetricPadding)
                        && layout.padding.is_asymmetric()
                    {
                        issues.push(LayoutIssue::new(IssueDetail::AsymmetricPadding {
                            padding: layout.padding,
                        }));
                    }
                }
            }
        }

        // Groups can never host auto-layout
        if node.node_type == NodeType::Group && node.child_count() > 1 {
            issues.push(LayoutIssue::new(IssueDetail::GroupNotFrame));
        }

        if let Some(constraints) = node.constraints() {
            if rules.evaluates(IssueKind::ScaleConstraint) {
                let axes = constraints.axes_with(ConstraintType::Scale);
                if !axes.is_empty() {
                    issues.push(LayoutIssue::new(IssueDetail::ScaleConstraint { axes }));
                }
            }
            if rules.evaluates(IssueKind::CenterConstraint) {
                let axes = constraints.axes_with(ConstraintType::Center);
                if !axes.is_empty() {
                    issues.push(LayoutIssue::new(IssueDetail::CenterConstraint { axes }));
                }
            }
        }

        if node.positioning() == Some(LayoutPositioning::Absolute)
            && self.parent_has_auto_layout(node)
        {
            issues.push(LayoutIssue::new(IssueDetail::AbsolutePosition));
        }

        LayoutFinding::new(node.id.clone(), node.name.clone(), node.node_type, issues)
    }

    /// Findings for a subtree in pre-order; nodes without issues are omitted
    pub fn traverse(&self, id: &NodeId) -> Vec<LayoutFinding> {
        let mut findings = Vec::new();
        self.collect(id, &mut findings);
        findings
    }

    /// Findings for every selected node; empty when nothing is selected
    pub fn search_selection(&self) -> Vec<LayoutFinding> {
        let mut findings = Vec::new();
        for id in self.doc.selection() {
            self.collect(id, &mut findings);
        }
        findings
    }

    fn collect(&self, id: &NodeId, findings: &mut Vec<LayoutFinding>) {
        let Some(node) = self.doc.get(id) else {
            return;
        };

        if self.options.skips(node) {
            debug!(node = %id, name = %node.name, "skipping subtree");
            return;
        }

        let finding = self.check_node(node);
        if finding.has_issues {
            debug!(node = %id, issues = ?finding.kinds(), "layout issues");
            findings.push(finding);
        }

        for child in self.doc.children_of(id) {
            self.collect(child, findings);
        }
    }

    fn parent_has_auto_layout(&self, node: &Node) -> bool {
        node.parent()
            .and_then(|p| self.doc.get(p))
            .map(Node::has_auto_layout)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;
    use tessera_core::{Constraints, LayoutMode, Padding, Rect};
    use tessera_doc::LayoutProps;

    fn auto_layout(primary: SizingMode, counter: SizingMode) -> LayoutProps {
        LayoutProps {
            layout_mode: LayoutMode::Horizontal,
            primary_axis_sizing_mode: primary,
            counter_axis_sizing_mode: counter,
            ..Default::default()
        }
    }

    fn check(doc: &Document, options: &AuditOptions, id: &str) -> Vec<IssueKind> {
        let node = doc.get(&NodeId::from(id)).unwrap();
        LayoutAudit::new(doc, options).check_node(node).kinds()
    }

    fn single(node: Node) -> Document {
        let mut doc = Document::new("Layout");
        let page = doc.page_id().clone();
        doc.insert(&page, node).unwrap();
        doc
    }

    #[test]
    fn test_frame_without_auto_layout() {
        let doc = single(Node::new("1:1", "Card", NodeType::Frame));
        let kinds = check(&doc, &AuditOptions::default(), "1:1");
        assert_eq!(kinds, vec![IssueKind::NoAutoLayout]);
    }

    #[test]
    fn test_fixed_axes_spacing_and_padding() {
        let mut layout = auto_layout(SizingMode::Fixed, SizingMode::Fixed);
        layout.item_spacing = 8.0;
        layout.padding = Padding::new(10.0, 0.0, 10.0, 0.0);
        let doc = single(Node::new("1:1", "Row", NodeType::Component).with_layout(layout));

        let full = check(&doc, &AuditOptions::new(RuleSet::Full), "1:1");
        assert_eq!(
            full,
            vec![
                IssueKind::FixedPrimaryAxis,
                IssueKind::FixedCounterAxis,
                IssueKind::FixedItemSpacing,
                IssueKind::AsymmetricPadding,
            ]
        );

        let reduced = check(&doc, &AuditOptions::new(RuleSet::Reduced), "1:1");
        assert_eq!(
            reduced,
            vec![IssueKind::FixedPrimaryAxis, IssueKind::FixedCounterAxis]
        );
    }

    #[test]
    fn test_uniform_padding_is_fine() {
        let mut layout = auto_layout(SizingMode::Auto, SizingMode::Auto);
        layout.padding = Padding::uniform(16.0);
        let doc = single(Node::new("1:1", "Stack", NodeType::Instance).with_layout(layout));
        assert!(check(&doc, &AuditOptions::default(), "1:1").is_empty());
    }

    #[test]
    fn test_group_with_multiple_children() {
        let mut doc = Document::new("Layout");
        let page = doc.page_id().clone();
        let group = doc.insert(&page, Node::new("1:1", "Group", NodeType::Group)).unwrap();
        doc.insert(&group, Node::new("1:2", "A", NodeType::Rectangle)).unwrap();
        assert!(check(&doc, &AuditOptions::default(), "1:1").is_empty());

        doc.insert(&group, Node::new("1:3", "B", NodeType::Rectangle)).unwrap();
        assert_eq!(
            check(&doc, &AuditOptions::default(), "1:1"),
            vec![IssueKind::GroupNotFrame]
        );
    }

    #[test]
    fn test_constraints_full_only() {
        let doc = single(
            Node::new("1:1", "Badge", NodeType::Rectangle).with_constraints(Constraints::new(
                ConstraintType::Scale,
                ConstraintType::Center,
            )),
        );
        let full = check(&doc, &AuditOptions::new(RuleSet::Full), "1:1");
        assert_eq!(
            full,
            vec![IssueKind::ScaleConstraint, IssueKind::CenterConstraint]
        );
        assert!(check(&doc, &AuditOptions::new(RuleSet::Reduced), "1:1").is_empty());
    }

    #[test]
    fn test_absolute_only_matters_inside_auto_layout() {
        let mut doc = Document::new("Layout");
        let page = doc.page_id().clone();
        let list = doc
            .insert(
                &page,
                Node::new("1:1", "List", NodeType::Frame)
                    .with_layout(auto_layout(SizingMode::Auto, SizingMode::Auto)),
            )
            .unwrap();
        doc.insert(
            &list,
            Node::new("1:2", "Badge", NodeType::Rectangle)
                .with_positioning(LayoutPositioning::Absolute),
        )
        .unwrap();
        let plain = doc
            .insert(
                &page,
                Node::new("1:3", "Canvas", NodeType::Frame)
                    .with_layout(auto_layout(SizingMode::Auto, SizingMode::Auto)),
            )
            .unwrap();
        doc.set_layout_mode(&plain, LayoutMode::None).unwrap();
        doc.insert(
            &plain,
            Node::new("1:4", "Floating", NodeType::Rectangle)
                .with_positioning(LayoutPositioning::Absolute),
        )
        .unwrap();

        let options = AuditOptions::default();
        assert_eq!(
            check(&doc, &options, "1:2"),
            vec![IssueKind::AbsolutePosition]
        );
        assert!(check(&doc, &options, "1:4").is_empty());
    }

    #[test]
    fn test_traverse_pre_order_and_exclusions() {
        let mut doc = Document::new("Layout");
        let page = doc.page_id().clone();
        let root = doc
            .insert(&page, Node::new("1:1", "Screen", NodeType::Frame))
            .unwrap();
        let icon = doc
            .insert(&root, Node::new("1:2", "icon_close", NodeType::Frame))
            .unwrap();
        doc.insert(&icon, Node::new("1:3", "Glyph", NodeType::Frame))
            .unwrap();
        let hidden = doc
            .insert(
                &root,
                Node::new("1:4", "Drawer", NodeType::Frame)
                    .hidden()
                    .with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
            )
            .unwrap();
        doc.insert(&hidden, Node::new("1:5", "Drawer item", NodeType::Frame))
            .unwrap();

        let ids = |findings: Vec<LayoutFinding>| -> Vec<String> {
            findings.into_iter().map(|f| f.id.to_string()).collect()
        };

        let full = AuditOptions::new(RuleSet::Full);
        assert_eq!(
            ids(LayoutAudit::new(&doc, &full).traverse(&root)),
            vec!["1:1", "1:2", "1:3", "1:4", "1:5"]
        );

        let reduced = AuditOptions::new(RuleSet::Reduced).with_exclude_hidden(true);
        assert_eq!(
            ids(LayoutAudit::new(&doc, &reduced).traverse(&root)),
            vec!["1:1"]
        );
    }

    #[test]
    fn test_search_selection_empty() {
        let doc = single(Node::new("1:1", "Card", NodeType::Frame));
        let options = AuditOptions::default();
        assert!(LayoutAudit::new(&doc, &options).search_selection().is_empty());
    }
}
