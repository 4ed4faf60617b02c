//! Layout issue type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tessera_core::{Axis, NodeId, Padding, TesseraError};
use tessera_doc::NodeType;

/// Severity level of a layout issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// Tag identifying a kind of layout issue; also names its remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    NoAutoLayout,
    FixedPrimaryAxis,
    FixedCounterAxis,
    FixedItemSpacing,
    AsymmetricPadding,
    ScaleConstraint,
    CenterConstraint,
    AbsolutePosition,
    GroupNotFrame,
}

impl IssueKind {
    pub const ALL: [IssueKind; 9] = [
        IssueKind::NoAutoLayout,
        IssueKind::FixedPrimaryAxis,
        IssueKind::FixedCounterAxis,
        IssueKind::FixedItemSpacing,
        IssueKind::AsymmetricPadding,
        IssueKind::ScaleConstraint,
        IssueKind::CenterConstraint,
        IssueKind::AbsolutePosition,
        IssueKind::GroupNotFrame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::NoAutoLayout => "NO_AUTO_LAYOUT",
            IssueKind::FixedPrimaryAxis => "FIXED_PRIMARY_AXIS",
            IssueKind::FixedCounterAxis => "FIXED_COUNTER_AXIS",
            IssueKind::FixedItemSpacing => "FIXED_ITEM_SPACING",
            IssueKind::AsymmetricPadding => "ASYMMETRIC_PADDING",
            IssueKind::ScaleConstraint => "SCALE_CONSTRAINT",
            IssueKind::CenterConstraint => "CENTER_CONSTRAINT",
            IssueKind::AbsolutePosition => "ABSOLUTE_POSITION",
            IssueKind::GroupNotFrame => "GROUP_NOT_FRAME",
        }
    }

    /// Structural problems that break responsive resizing are warnings;
    /// spacing, padding and constraint choices are informational.
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::NoAutoLayout
            | IssueKind::FixedPrimaryAxis
            | IssueKind::FixedCounterAxis
            | IssueKind::AbsolutePosition
            | IssueKind::GroupNotFrame => Severity::Warning,
            IssueKind::FixedItemSpacing
            | IssueKind::AsymmetricPadding
            | IssueKind::ScaleConstraint
            | IssueKind::CenterConstraint => Severity::Info,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueKind {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TesseraError::UnknownIssueType(s.to_string()))
    }
}

/// What was found, with the values that triggered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueDetail {
    NoAutoLayout,
    FixedPrimaryAxis,
    FixedCounterAxis,
    FixedItemSpacing { value: f64 },
    AsymmetricPadding { padding: Padding },
    ScaleConstraint { axes: Vec<Axis> },
    CenterConstraint { axes: Vec<Axis> },
    AbsolutePosition,
    GroupNotFrame,
}

impl IssueDetail {
    pub fn kind(&self) -> IssueKind {
        match self {
            IssueDetail::NoAutoLayout => IssueKind::NoAutoLayout,
            IssueDetail::FixedPrimaryAxis => IssueKind::FixedPrimaryAxis,
            IssueDetail::FixedCounterAxis => IssueKind::FixedCounterAxis,
            IssueDetail::FixedItemSpacing { .. } => IssueKind::FixedItemSpacing,
            IssueDetail::AsymmetricPadding { .. } => IssueKind::AsymmetricPadding,
            IssueDetail::ScaleConstraint { .. } => IssueKind::ScaleConstraint,
            IssueDetail::CenterConstraint { .. } => IssueKind::CenterConstraint,
            IssueDetail::AbsolutePosition => IssueKind::AbsolutePosition,
            IssueDetail::GroupNotFrame => IssueKind::GroupNotFrame,
        }
    }

    fn describe(&self) -> String {
        match self {
            IssueDetail::NoAutoLayout => "Auto layout is not applied".to_string(),
            IssueDetail::FixedPrimaryAxis => {
                "Primary axis uses fixed sizing instead of hug or fill".to_string()
            }
            IssueDetail::FixedCounterAxis => {
                "Counter axis uses fixed sizing instead of hug or fill".to_string()
            }
            IssueDetail::FixedItemSpacing { value } => {
                format!("Item spacing is fixed at {}px", value)
            }
            IssueDetail::AsymmetricPadding { padding } => format!(
                "Padding is uneven (top {}, right {}, bottom {}, left {})",
                padding.top, padding.right, padding.bottom, padding.left
            ),
            IssueDetail::ScaleConstraint { axes } => {
                format!("Scale constraint on {}", join_axes(axes))
            }
            IssueDetail::CenterConstraint { axes } => {
                format!("Center constraint on {}", join_axes(axes))
            }
            IssueDetail::AbsolutePosition => {
                "Absolutely positioned inside an auto layout parent".to_string()
            }
            IssueDetail::GroupNotFrame => {
                "Group with multiple children should be a frame".to_string()
            }
        }
    }
}

fn join_axes(axes: &[Axis]) -> String {
    axes.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// A single issue on a node, with its human-readable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutIssue {
    #[serde(flatten)]
    pub detail: IssueDetail,
    pub message: String,
}

impl LayoutIssue {
    pub fn new(detail: IssueDetail) -> Self {
        let message = detail.describe();
        Self { detail, message }
    }

    pub fn kind(&self) -> IssueKind {
        self.detail.kind()
    }
}

/// All issues found on one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFinding {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub issues: Vec<LayoutIssue>,
    pub has_issues: bool,
}

impl LayoutFinding {
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        node_type: NodeType,
        issues: Vec<LayoutIssue>,
    ) -> Self {
        let has_issues = !issues.is_empty();
        Self {
            id,
            name: name.into(),
            node_type,
            issues,
            has_issues,
        }
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind() == kind)
    }

    pub fn kinds(&self) -> Vec<IssueKind> {
        self.issues.iter().map(LayoutIssue::kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_kind_parse() {
        assert_eq!(
            "NO_AUTO_LAYOUT".parse::<IssueKind>().unwrap(),
            IssueKind::NoAutoLayout
        );
        assert_eq!(
            "group_not_frame".parse::<IssueKind>().unwrap(),
            IssueKind::GroupNotFrame
        );
        assert!(matches!(
            "NOT_A_RULE".parse::<IssueKind>(),
            Err(TesseraError::UnknownIssueType(_))
        ));
    }

    #[test]
    fn test_issue_wire_shape() {
        let issue = LayoutIssue::new(IssueDetail::FixedItemSpacing { value: 12.0 });
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "FIXED_ITEM_SPACING",
                "value": 12.0,
                "message": "Item spacing is fixed at 12px"
            })
        );

        let unit = serde_json::to_value(LayoutIssue::new(IssueDetail::GroupNotFrame)).unwrap();
        assert_eq!(unit["type"], "GROUP_NOT_FRAME");
    }

    #[test]
    fn test_issue_messages_name_axes() {
        let issue = LayoutIssue::new(IssueDetail::ScaleConstraint {
            axes: vec![Axis::Horizontal, Axis::Vertical],
        });
        assert_eq!(issue.message, "Scale constraint on horizontal and vertical");
        assert_eq!(issue.kind(), IssueKind::ScaleConstraint);
    }

    #[test]
    fn test_finding_has_issues_flag() {
        let empty = LayoutFinding::new("1:1".into(), "Card", NodeType::Frame, Vec::new());
        assert!(!empty.has_issues);

        let flagged = LayoutFinding::new(
            "1:1".into(),
            "Card",
            NodeType::Frame,
            vec![LayoutIssue::new(IssueDetail::NoAutoLayout)],
        );
        assert!(flagged.has_issues);
        assert!(flagged.has(IssueKind::NoAutoLayout));
        let value = serde_json::to_value(&flagged).unwrap();
        assert_eq!(value["hasIssues"], true);
        assert_eq!(value["type"], "FRAME");
    }

    #[test]
    fn test_severity_split() {
        assert_eq!(IssueKind::GroupNotFrame.severity(), Severity::Warning);
        assert_eq!(IssueKind::AsymmetricPadding.severity(), Severity::Info);
    }
}
