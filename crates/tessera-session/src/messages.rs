//! Wire messages exchanged with a front end

use serde::{Deserialize, Serialize};
use tessera_audit::{ColorFinding, IssueKind, LayoutFinding, RuleSet};
use tessera_core::NodeId;

/// Inbound messages (front end → session)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    SearchColorNodes {
        #[serde(default)]
        exclude_hidden: bool,
        #[serde(default)]
        selected_nodes_only: bool,
    },
    #[serde(rename_all = "camelCase")]
    CheckAutoLayout {
        #[serde(default)]
        exclude_hidden: bool,
        /// Overrides the configured rule set for this request
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rule_set: Option<RuleSet>,
    },
    #[serde(rename_all = "camelCase")]
    CloneAndFix {
        #[serde(default)]
        exclude_hidden: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rule_set: Option<RuleSet>,
    },
    /// `issue_type` stays a string so an unknown tag becomes a failed fix
    /// instead of an unreadable message
    #[serde(rename_all = "camelCase")]
    FixIssue { node_id: NodeId, issue_type: String },
    #[serde(rename_all = "camelCase")]
    FocusNode { node_id: NodeId },
    ClosePlugin,
}

/// Outbound messages (session → front end)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Response {
    #[serde(rename_all = "camelCase")]
    ColorNodesResult {
        nodes: Vec<ColorFinding>,
        selected_nodes_only: bool,
    },
    NoSelection {
        message: String,
    },
    AutoLayoutResults {
        results: Vec<LayoutFinding>,
    },
    FixStarted {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    FixCompleted {
        message: String,
        fixed_results: Vec<LayoutFinding>,
        original_results: Vec<LayoutFinding>,
    },
    FixFailed {
        message: String,
    },
    NoIssues {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    IssueFixed {
        node_id: NodeId,
        issue_type: IssueKind,
    },
    #[serde(rename_all = "camelCase")]
    NodeFocused {
        node_id: NodeId,
    },
}

impl Response {
    /// The value of the `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Response::ColorNodesResult { .. } => "color-nodes-result",
            Response::NoSelection { .. } => "no-selection",
            Response::AutoLayoutResults { .. } => "auto-layout-results",
            Response::FixStarted { .. } => "fix-started",
            Response::FixCompleted { .. } => "fix-completed",
            Response::FixFailed { .. } => "fix-failed",
            Response::NoIssues { .. } => "no-issues",
            Response::IssueFixed { .. } => "issue-fixed",
            Response::NodeFocused { .. } => "node-focused",
        }
    }
}
