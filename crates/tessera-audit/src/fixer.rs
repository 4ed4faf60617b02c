//! Layout auto-fix engine: clone-and-fix batches and targeted remediation

use crate::config::{AuditOptions, FixSettings};
use crate::types::{IssueKind, LayoutFinding};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tessera_core::{
    ConstraintType, LayoutMode, LayoutPositioning, NodeId, Padding, Result, SizingMode,
    TesseraError,
};
use tessera_doc::{Document, Node, NodeType};
use tracing::{debug, info, warn};

/// Outcome of one remediation against one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// The node was changed in place
    Applied,
    /// The node was swapped for a new node with this id
    Replaced(NodeId),
    /// Nothing to do; the node is already compliant
    Unchanged,
    /// The node's shape does not support this remediation
    Unsupported,
}

/// Apply the single remediation named by `kind` to a live node
pub fn remediate(doc: &mut Document, id: &NodeId, kind: IssueKind) -> Result<Remediation> {
    let node = doc
        .get(id)
        .cloned()
        .ok_or_else(|| TesseraError::NodeNotFound(id.to_string()))?;

    match kind {
        IssueKind::NoAutoLayout => {
            if node.node_type != NodeType::Frame {
                return Ok(Remediation::Unsupported);
            }
            if node.has_auto_layout() {
                return Ok(Remediation::Unchanged);
            }
            apply_vertical_hug(doc, id)?;
            Ok(Remediation::Applied)
        }
        IssueKind::FixedPrimaryAxis | IssueKind::FixedCounterAxis => {
            let Some(layout) = node.layout() else {
                return Ok(Remediation::Unsupported);
            };
            // Sizing modes mean nothing without auto-layout
            if !layout.layout_mode.is_auto_layout() {
                return Ok(Remediation::Unchanged);
            }
            let primary = kind == IssueKind::FixedPrimaryAxis;
            let current = if primary {
                layout.primary_axis_sizing_mode
            } else {
                layout.counter_axis_sizing_mode
            };
            if current != SizingMode::Fixed {
                return Ok(Remediation::Unchanged);
            }
            if primary {
                doc.set_primary_axis_sizing(id, SizingMode::Auto)?;
            } else {
                doc.set_counter_axis_sizing(id, SizingMode::Auto)?;
            }
            Ok(Remediation::Applied)
        }
        IssueKind::AsymmetricPadding => {
            let Some(layout) = node.layout() else {
                return Ok(Remediation::Unsupported);
            };
            if !layout.padding.is_asymmetric() {
                return Ok(Remediation::Unchanged);
            }
            let average = layout.padding.positive_average();
            doc.set_padding(id, Padding::uniform(average))?;
            Ok(Remediation::Applied)
        }
        IssueKind::FixedItemSpacing => {
            let Some(layout) = node.layout() else {
                return Ok(Remediation::Unsupported);
            };
            if layout.item_spacing <= 0.0 {
                return Ok(Remediation::Unchanged);
            }
            doc.set_item_spacing(id, 0.0)?;
            Ok(Remediation::Applied)
        }
        IssueKind::GroupNotFrame => {
            if node.node_type != NodeType::Group || node.child_count() == 0 {
                return Ok(Remediation::Unsupported);
            }
            let frame = convert_group_to_frame(doc, id)?;
            Ok(Remediation::Replaced(frame))
        }
        IssueKind::ScaleConstraint | IssueKind::CenterConstraint => {
            let Some(constraints) = node.constraints() else {
                return Ok(Remediation::Unsupported);
            };
            let from = if kind == IssueKind::ScaleConstraint {
                ConstraintType::Scale
            } else {
                ConstraintType::Center
            };
            let mut updated = *constraints;
            if !updated.replace(from, ConstraintType::Stretch) {
                return Ok(Remediation::Unchanged);
            }
            doc.set_constraints(id, updated)?;
            Ok(Remediation::Applied)
        }
        IssueKind::AbsolutePosition => {
            let Some(positioning) = node.positioning() else {
                return Ok(Remediation::Unsupported);
            };
            let parent_auto = node
                .parent()
                .and_then(|p| doc.get(p))
                .map(Node::has_auto_layout)
                .unwrap_or(false);
            if positioning != LayoutPositioning::Absolute || !parent_auto {
                return Ok(Remediation::Unchanged);
            }
            doc.set_positioning(id, LayoutPositioning::Auto)?;
            Ok(Remediation::Applied)
        }
    }
}

fn apply_vertical_hug(doc: &mut Document, id: &NodeId) -> Result<()> {
    doc.set_layout_mode(id, LayoutMode::Vertical)?;
    doc.set_primary_axis_sizing(id, SizingMode::Auto)?;
    doc.set_counter_axis_sizing(id, SizingMode::Auto)?;
    Ok(())
}

/// Replace a group with a vertical auto-layout frame.
///
/// The frame takes the group's name, bounds, visibility and positioning and
/// its slot in the parent; the group's children move into it in order and
/// the group is discarded. Returns the new frame's id.
pub fn convert_group_to_frame(doc: &mut Document, group_id: &NodeId) -> Result<NodeId> {
    let group = doc
        .get(group_id)
        .cloned()
        .ok_or_else(|| TesseraError::NodeNotFound(group_id.to_string()))?;
    if group.node_type != NodeType::Group {
        return Err(TesseraError::capability(group_id, group.node_type, "group conversion"));
    }
    let parent = group.parent().cloned().ok_or_else(|| {
        TesseraError::InvalidStructure(format!("group {} is not attached", group_id))
    })?;
    let index = doc
        .children_of(&parent)
        .iter()
        .position(|c| c == group_id)
        .unwrap_or(usize::MAX);

    let frame = doc.create_frame(group.name.clone(), group.bounds);
    apply_vertical_hug(doc, &frame)?;
    doc.set_visible(&frame, group.visible)?;
    if let Some(positioning) = group.positioning() {
        doc.set_positioning(&frame, positioning)?;
    }
    doc.insert_child(&parent, index, &frame)?;

    for child in group.children().unwrap_or(&[]) {
        doc.append_child(&frame, child)?;
    }
    doc.remove(group_id)?;

    debug!(group = %group_id, frame = %frame, "converted group to frame");
    Ok(frame)
}

/// One remediation scheduled against one node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFix {
    pub node: NodeId,
    pub node_name: String,
    pub kind: IssueKind,
}

impl PendingFix {
    fn new(node: &Node, kind: IssueKind) -> Self {
        Self {
            node: node.id.clone(),
            node_name: node.name.clone(),
            kind,
        }
    }

    pub fn describe(&self) -> String {
        let action = match self.kind {
            IssueKind::NoAutoLayout => "apply vertical auto layout",
            IssueKind::FixedPrimaryAxis => "hug contents on the primary axis",
            IssueKind::FixedCounterAxis => "hug contents on the counter axis",
            IssueKind::FixedItemSpacing => "reset item spacing to 0",
            IssueKind::AsymmetricPadding => "even out padding",
            IssueKind::ScaleConstraint => "replace scale constraints with stretch",
            IssueKind::CenterConstraint => "replace center constraints with stretch",
            IssueKind::AbsolutePosition => "switch to auto positioning",
            IssueKind::GroupNotFrame => "convert group to auto layout frame",
        };
        format!("{} ({}): {}", self.node_name, self.node, action)
    }
}

/// Ordered remediations for a subtree, parents before their children
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FixPlan {
    pub steps: Vec<PendingFix>,
}

impl FixPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Result of applying a plan
#[derive(Debug, Clone, Default)]
pub struct AppliedFixes {
    pub fixed_count: usize,
    /// Nodes swapped out during the pass, mapped to their replacements
    pub replacements: HashMap<NodeId, NodeId>,
}

impl AppliedFixes {
    /// Follow replacements to the node that currently stands in for `id`
    pub fn resolve<'a>(&'a self, id: &'a NodeId) -> &'a NodeId {
        let mut current = id;
        while let Some(next) = self.replacements.get(current) {
            current = next;
        }
        current
    }
}

/// A top-level node whose clone could not be fixed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixFailure {
    pub node_id: NodeId,
    pub message: String,
}

/// Summary of a clone-and-fix batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneFixReport {
    /// Fixed clones, one per top-level original, in processing order
    pub cloned_ids: Vec<NodeId>,
    pub fixed_count: usize,
    pub failures: Vec<FixFailure>,
}

impl CloneFixReport {
    /// True when there was work to do and none of it succeeded
    pub fn all_failed(&self) -> bool {
        self.cloned_ids.is_empty() && !self.failures.is_empty()
    }
}

/// Reduce a set of flagged nodes to those with no flagged ancestor.
///
/// Order of first appearance is kept; duplicates and ids missing from the
/// document are dropped.
pub fn collapse_to_topmost(doc: &Document, ids: &[NodeId]) -> Vec<NodeId> {
    let flagged: HashSet<&NodeId> = ids.iter().filter(|id| doc.contains(id)).collect();
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| flagged.contains(id))
        .filter(|id| !flagged.iter().any(|other| doc.is_ancestor(other, id)))
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect()
}

/// Plans and applies layout remediations
pub struct Fixer<'a> {
    options: &'a AuditOptions,
    settings: &'a FixSettings,
}

impl<'a> Fixer<'a> {
    pub fn new(options: &'a AuditOptions, settings: &'a FixSettings) -> Self {
        Self { options, settings }
    }

    /// Walk a subtree read-only and list the remediations it needs
    pub fn plan(&self, doc: &Document, root: &NodeId) -> FixPlan {
        let mut plan = FixPlan::default();
        self.plan_node(doc, root, &mut plan);
        plan
    }

    fn plan_node(&self, doc: &Document, id: &NodeId, plan: &mut FixPlan) {
        let Some(node) = doc.get(id) else {
            return;
        };
        if self.options.skips(node) {
            return;
        }
        let rules = self.options.rule_set;
        let mut schedule = |kind: IssueKind| plan.steps.push(PendingFix::new(node, kind));

        if let Some(layout) = node.layout() {
            let auto = layout.layout_mode.is_auto_layout();
            if node.node_type == NodeType::Frame && !auto {
                schedule(IssueKind::NoAutoLayout);
            } else if auto {
                if layout.primary_axis_sizing_mode == SizingMode::Fixed {
                    schedule(IssueKind::FixedPrimaryAxis);
                }
                if layout.counter_axis_sizing_mode == SizingMode::Fixed {
                    schedule(IssueKind::FixedCounterAxis);
                }
            }
            if rules.evaluates(IssueKind::AsymmetricPadding) && layout.padding.is_asymmetric() {
                schedule(IssueKind::AsymmetricPadding);
            }
            if rules.evaluates(IssueKind::FixedItemSpacing) && layout.item_spacing > 0.0 {
                schedule(IssueKind::FixedItemSpacing);
            }
        }

        if node.node_type == NodeType::Group && node.child_count() > 0 {
            schedule(IssueKind::GroupNotFrame);
        }

        if let Some(constraints) = node.constraints() {
            if rules.evaluates(IssueKind::ScaleConstraint)
                && !constraints.axes_with(ConstraintType::Scale).is_empty()
            {
                schedule(IssueKind::ScaleConstraint);
            }
            if rules.evaluates(IssueKind::CenterConstraint)
                && !constraints.axes_with(ConstraintType::Center).is_empty()
            {
                schedule(IssueKind::CenterConstraint);
            }
        }

        // Whether the parent has auto-layout is decided when the step runs
        if node.positioning() == Some(LayoutPositioning::Absolute) {
            schedule(IssueKind::AbsolutePosition);
        }

        for child in doc.children_of(id) {
            self.plan_node(doc, child, plan);
        }
    }

    /// Apply a plan in order, redirecting steps aimed at replaced nodes
    pub fn apply(&self, doc: &mut Document, plan: &FixPlan) -> Result<AppliedFixes> {
        let mut applied = AppliedFixes::default();
        self.apply_into(doc, plan, &mut applied)?;
        Ok(applied)
    }

    fn apply_into(
        &self,
        doc: &mut Document,
        plan: &FixPlan,
        applied: &mut AppliedFixes,
    ) -> Result<()> {
        for step in &plan.steps {
            let target = applied.resolve(&step.node).clone();
            match remediate(doc, &target, step.kind)? {
                Remediation::Applied => {
                    applied.fixed_count += 1;
                    debug!(node = %target, kind = %step.kind, "fixed");
                }
                Remediation::Replaced(new_id) => {
                    applied.fixed_count += 1;
                    debug!(node = %target, replacement = %new_id, kind = %step.kind, "replaced");
                    applied.replacements.insert(target, new_id);
                }
                Remediation::Unchanged | Remediation::Unsupported => {
                    debug!(node = %target, kind = %step.kind, "nothing to fix");
                }
            }
        }
        Ok(())
    }

    /// Plan for every top-level flagged node, computed without mutation
    pub fn dry_run(&self, doc: &Document, findings: &[LayoutFinding]) -> FixPlan {
        let ids: Vec<NodeId> = findings.iter().map(|f| f.id.clone()).collect();
        let mut plan = FixPlan::default();
        for root in collapse_to_topmost(doc, &ids) {
            self.plan_node(doc, &root, &mut plan);
        }
        plan
    }

    /// Clone every top-level flagged node next to its original and fix the
    /// clone. Originals are never touched; a failure on one node is recorded
    /// and the batch moves on.
    pub fn clone_and_fix(&self, doc: &mut Document, findings: &[LayoutFinding]) -> CloneFixReport {
        let ids: Vec<NodeId> = findings.iter().map(|f| f.id.clone()).collect();
        let roots = collapse_to_topmost(doc, &ids);
        info!(
            findings = findings.len(),
            roots = roots.len(),
            rule_set = %self.options.rule_set,
            "clone and fix"
        );

        let mut report = CloneFixReport::default();
        for root in roots {
            match self.clone_and_fix_one(doc, &root) {
                Ok((clone, fixed)) => {
                    report.cloned_ids.push(clone);
                    report.fixed_count += fixed;
                }
                Err(e) => {
                    warn!(node = %root, error = %e, "failed to fix node");
                    report.failures.push(FixFailure {
                        node_id: root,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            cloned = report.cloned_ids.len(),
            fixed = report.fixed_count,
            failed = report.failures.len(),
            "clone and fix finished"
        );
        report
    }

    fn clone_and_fix_one(&self, doc: &mut Document, root: &NodeId) -> Result<(NodeId, usize)> {
        let original = doc
            .get(root)
            .cloned()
            .ok_or_else(|| TesseraError::NodeNotFound(root.to_string()))?;
        let parent = original.parent().cloned().ok_or_else(|| {
            TesseraError::InvalidStructure(format!("node {} is not attached", root))
        })?;

        let clone = doc.clone_subtree(root)?;
        let mut applied = AppliedFixes::default();
        let result = self.fix_clone(doc, &original, &parent, &clone, &mut applied);

        let current = applied.resolve(&clone).clone();
        match result {
            Ok(()) => Ok((current, applied.fixed_count)),
            Err(e) => {
                if doc.contains(&current) {
                    doc.remove(&current)?;
                }
                Err(e)
            }
        }
    }

    fn fix_clone(
        &self,
        doc: &mut Document,
        original: &Node,
        parent: &NodeId,
        clone: &NodeId,
        applied: &mut AppliedFixes,
    ) -> Result<()> {
        let bounds = original.bounds;
        doc.move_to(clone, bounds.x + bounds.width + self.settings.clone_gap, bounds.y)?;
        doc.rename(clone, format!("{}{}", original.name, self.settings.clone_suffix))?;
        doc.append_child(parent, clone)?;

        let plan = self.plan(doc, clone);
        self.apply_into(doc, &plan, applied)
    }
}

/// Apply one remediation to one live node without cloning.
///
/// Returns false when the node is gone, its shape does not support the
/// remediation, there is nothing to change, or the mutation fails.
pub fn fix_issue(doc: &mut Document, id: &NodeId, kind: IssueKind) -> bool {
    match remediate(doc, id, kind) {
        Ok(Remediation::Unsupported) => {
            debug!(node = %id, kind = %kind, "remediation not supported");
            false
        }
        Ok(Remediation::Unchanged) => {
            debug!(node = %id, kind = %kind, "nothing to fix");
            false
        }
        Ok(outcome) => {
            info!(node = %id, kind = %kind, ?outcome, "fixed issue");
            true
        }
        Err(e) => {
            warn!(node = %id, kind = %kind, error = %e, "fix failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;
    use crate::layout::LayoutAudit;
    use tessera_core::{Constraints, Rect};
    use tessera_doc::LayoutProps;

    /// page > Screen (no auto-layout)
    ///          > Row (auto, fixed sizing, uneven padding, spacing)
    ///          > Cluster (group) > A (absolute), B (scale)
    fn screen() -> (Document, NodeId) {
        let mut doc = Document::new("Fixes");
        let page = doc.page_id().clone();
        let root = doc
            .insert(
                &page,
                Node::new("1:1", "Screen", NodeType::Frame)
                    .with_bounds(Rect::new(0.0, 0.0, 300.0, 200.0)),
            )
            .unwrap();
        doc.insert(
            &root,
            Node::new("1:2", "Row", NodeType::Frame).with_layout(LayoutProps {
                layout_mode: LayoutMode::Horizontal,
                primary_axis_sizing_mode: SizingMode::Fixed,
                counter_axis_sizing_mode: SizingMode::Fixed,
                padding: Padding::new(10.0, 0.0, 10.0, 0.0),
                item_spacing: 8.0,
            }),
        )
        .unwrap();
        let group = doc
            .insert(
                &root,
                Node::new("1:3", "Cluster", NodeType::Group)
                    .with_bounds(Rect::new(20.0, 40.0, 120.0, 60.0)),
            )
            .unwrap();
        doc.insert(
            &group,
            Node::new("1:4", "A", NodeType::Rectangle)
                .with_positioning(LayoutPositioning::Absolute),
        )
        .unwrap();
        doc.insert(
            &group,
            Node::new("1:5", "B", NodeType::Rectangle)
                .with_constraints(Constraints::new(ConstraintType::Scale, ConstraintType::Min)),
        )
        .unwrap();
        doc.set_selection(vec![root.clone()]).unwrap();
        (doc, root)
    }

    fn audit(doc: &Document, options: &AuditOptions, id: &NodeId) -> Vec<LayoutFinding> {
        LayoutAudit::new(doc, options).traverse(id)
    }

    #[test]
    fn test_clone_and_fix_is_idempotent() {
        let (mut doc, root) = screen();
        let options = AuditOptions::new(RuleSet::Full);
        let settings = FixSettings::default();
        let findings = audit(&doc, &options, &root);
        assert!(!findings.is_empty());

        let report = Fixer::new(&options, &settings).clone_and_fix(&mut doc, &findings);
        assert!(report.failures.is_empty());
        assert_eq!(report.cloned_ids.len(), 1);
        assert_eq!(report.fixed_count, 8);

        let clone = &report.cloned_ids[0];
        assert!(audit(&doc, &options, clone).is_empty());
    }

    #[test]
    fn test_clone_placement() {
        let (mut doc, root) = screen();
        let options = AuditOptions::default();
        let settings = FixSettings::default();
        let findings = audit(&doc, &options, &root);
        let report = Fixer::new(&options, &settings).clone_and_fix(&mut doc, &findings);

        let clone = doc.get(&report.cloned_ids[0]).unwrap();
        assert_eq!(clone.name, "Screen (Auto Layout)");
        assert_eq!(clone.bounds.x, 400.0);
        assert_eq!(clone.bounds.y, 0.0);
        assert_eq!(doc.parent_of(&clone.id), Some(doc.page_id()));
        assert_eq!(doc.children_of(doc.page_id()).last(), Some(&clone.id));
        // selection stays on the original
        assert_eq!(doc.selection(), &[root][..]);
    }

    #[test]
    fn test_originals_untouched() {
        let (mut doc, root) = screen();
        let before: Vec<Node> = doc
            .descendants(&root)
            .iter()
            .map(|id| doc.get(id).unwrap().clone())
            .collect();

        let options = AuditOptions::default();
        let settings = FixSettings::default();
        let findings = audit(&doc, &options, &root);
        Fixer::new(&options, &settings).clone_and_fix(&mut doc, &findings);

        for node in &before {
            assert_eq!(doc.get(&node.id), Some(node));
        }
    }

    #[test]
    fn test_nested_findings_clone_once() {
        let (mut doc, root) = screen();
        let options = AuditOptions::default();
        let settings = FixSettings::default();
        let findings = audit(&doc, &options, &root);
        assert!(findings.iter().any(|f| f.id.as_str() == "1:2"));

        let collapsed = collapse_to_topmost(
            &doc,
            &findings.iter().map(|f| f.id.clone()).collect::<Vec<_>>(),
        );
        assert_eq!(collapsed, vec![root.clone()]);

        let page_children = doc.children_of(doc.page_id()).len();
        let report = Fixer::new(&options, &settings).clone_and_fix(&mut doc, &findings);
        assert_eq!(report.cloned_ids.len(), 1);
        assert_eq!(doc.children_of(doc.page_id()).len(), page_children + 1);
    }

    #[test]
    fn test_reduced_rules_skip_style_fixes() {
        let (doc, root) = screen();
        let options = AuditOptions::new(RuleSet::Reduced);
        let settings = FixSettings::default();
        let plan = Fixer::new(&options, &settings).plan(&doc, &root);
        let kinds: Vec<IssueKind> = plan.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::NoAutoLayout,
                IssueKind::FixedPrimaryAxis,
                IssueKind::FixedCounterAxis,
                IssueKind::GroupNotFrame,
                IssueKind::AbsolutePosition,
            ]
        );
    }

    #[test]
    fn test_dry_run_leaves_document_alone() {
        let (doc, root) = screen();
        let options = AuditOptions::default();
        let settings = FixSettings::default();
        let findings = audit(&doc, &options, &root);
        let count = doc.node_count();

        let plan = Fixer::new(&options, &settings).dry_run(&doc, &findings);
        assert_eq!(plan.len(), 8);
        assert_eq!(plan.steps[0].node, root);
        assert_eq!(doc.node_count(), count);
        assert!(plan.steps[0].describe().contains("Screen"));
    }

    #[test]
    fn test_failed_node_does_not_abort_batch() {
        let (mut doc, root) = screen();
        let loose = doc.create_frame("Loose", Rect::new(0.0, 0.0, 10.0, 10.0));
        let options = AuditOptions::default();
        let settings = FixSettings::default();
        let mut findings = audit(&doc, &options, &root);
        findings.insert(
            0,
            LayoutFinding::new(loose.clone(), "Loose", NodeType::Frame, Vec::new()),
        );

        let count = doc.node_count();
        let report = Fixer::new(&options, &settings).clone_and_fix(&mut doc, &findings);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].node_id, loose);
        assert_eq!(report.cloned_ids.len(), 1);
        assert!(!report.all_failed());
        // only the successful clone was added
        assert_eq!(doc.node_count(), count + doc.descendants(&report.cloned_ids[0]).len());
    }

    #[test]
    fn test_fix_issue_no_auto_layout() {
        let (mut doc, root) = screen();
        assert!(fix_issue(&mut doc, &root, IssueKind::NoAutoLayout));
        let layout = *doc.get(&root).unwrap().layout().unwrap();
        assert_eq!(layout.layout_mode, LayoutMode::Vertical);
        assert_eq!(layout.primary_axis_sizing_mode, SizingMode::Auto);
        assert_eq!(layout.counter_axis_sizing_mode, SizingMode::Auto);

        let options = AuditOptions::default();
        let finding = LayoutAudit::new(&doc, &options).check_node(doc.get(&root).unwrap());
        assert!(!finding.has(IssueKind::NoAutoLayout));
    }

    #[test]
    fn test_fix_issue_rejects_wrong_shape() {
        let (mut doc, _) = screen();
        assert!(!fix_issue(&mut doc, &NodeId::from("1:4"), IssueKind::NoAutoLayout));
        assert!(!fix_issue(&mut doc, &NodeId::from("1:2"), IssueKind::GroupNotFrame));
        assert!(!fix_issue(&mut doc, &NodeId::from("404:1"), IssueKind::FixedItemSpacing));
    }

    #[test]
    fn test_fix_issue_reports_no_op_as_failure() {
        let (mut doc, root) = screen();
        // Screen has no auto-layout, so its sizing modes are moot
        assert!(!fix_issue(&mut doc, &root, IssueKind::FixedPrimaryAxis));
        // A sits in a group, not an auto-layout container
        assert!(!fix_issue(&mut doc, &NodeId::from("1:4"), IssueKind::AbsolutePosition));
        assert_eq!(
            doc.get(&NodeId::from("1:4")).unwrap().positioning(),
            Some(LayoutPositioning::Absolute)
        );

        assert!(fix_issue(&mut doc, &root, IssueKind::NoAutoLayout));
        assert!(!fix_issue(&mut doc, &root, IssueKind::NoAutoLayout));
    }

    #[test]
    fn test_group_conversion() {
        let (mut doc, root) = screen();
        let group = NodeId::from("1:3");
        assert!(fix_issue(&mut doc, &group, IssueKind::GroupNotFrame));
        assert!(!doc.contains(&group));

        let frame_id = doc.children_of(&root)[1].clone();
        let frame = doc.get(&frame_id).unwrap();
        assert_eq!(frame.node_type, NodeType::Frame);
        assert_eq!(frame.name, "Cluster");
        assert_eq!(frame.bounds, Rect::new(20.0, 40.0, 120.0, 60.0));
        assert_eq!(frame.layout().unwrap().layout_mode, LayoutMode::Vertical);
        assert_eq!(
            doc.children_of(&frame_id),
            &[NodeId::from("1:4"), NodeId::from("1:5")][..]
        );
    }

    #[test]
    fn test_padding_normalized_to_average() {
        let (mut doc, _) = screen();
        let row = NodeId::from("1:2");
        assert!(fix_issue(&mut doc, &row, IssueKind::AsymmetricPadding));
        let padding = doc.get(&row).unwrap().layout().unwrap().padding;
        assert_eq!(padding, Padding::uniform(10.0));
    }

    #[test]
    fn test_absolute_needs_auto_layout_parent() {
        let (mut doc, _) = screen();
        let a = NodeId::from("1:4");
        // parent is still a group: nothing to change
        assert_eq!(
            remediate(&mut doc, &a, IssueKind::AbsolutePosition).unwrap(),
            Remediation::Unchanged
        );

        let frame = convert_group_to_frame(&mut doc, &NodeId::from("1:3")).unwrap();
        assert_eq!(doc.parent_of(&a), Some(&frame));
        assert_eq!(
            remediate(&mut doc, &a, IssueKind::AbsolutePosition).unwrap(),
            Remediation::Applied
        );
        assert_eq!(doc.get(&a).unwrap().positioning(), Some(LayoutPositioning::Auto));
    }
}
