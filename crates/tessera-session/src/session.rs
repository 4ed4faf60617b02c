//! Request dispatch over an owned document

use crate::messages::{Request, Response};
use tessera_audit::{
    fix_issue, AuditOptions, ColorAudit, Fixer, IssueKind, LayoutAudit, LayoutFinding, LintConfig,
    RuleSet,
};
use tessera_core::{NodeId, Result};
use tessera_doc::Document;
use tracing::{debug, info, warn};

const NO_SELECTION: &str = "No nodes selected. Select one or more nodes first.";
const NO_ISSUES: &str = "No layout issues found in the selection.";

/// One linting session: a document, its lint configuration, and the
/// request loop state
pub struct Session {
    document: Document,
    config: LintConfig,
    closed: bool,
}

impl Session {
    pub fn new(document: Document, config: LintConfig) -> Self {
        Self {
            document,
            config,
            closed: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// True once a close request has been handled
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Parse one JSON request and handle it
    pub fn handle_line(&mut self, line: &str) -> Result<Vec<Response>> {
        let request: Request = serde_json::from_str(line)?;
        Ok(self.handle(request))
    }

    /// Handle a request, returning the responses in emission order
    pub fn handle(&mut self, request: Request) -> Vec<Response> {
        if self.closed {
            debug!(?request, "session closed, ignoring request");
            return Vec::new();
        }

        match request {
            Request::SearchColorNodes {
                exclude_hidden,
                selected_nodes_only,
            } => vec![self.search_colors(exclude_hidden, selected_nodes_only)],
            Request::CheckAutoLayout {
                exclude_hidden,
                rule_set,
            } => vec![self.check_layout(exclude_hidden, rule_set)],
            Request::CloneAndFix {
                exclude_hidden,
                rule_set,
            } => self.clone_and_fix(exclude_hidden, rule_set),
            Request::FixIssue {
                node_id,
                issue_type,
            } => vec![self.fix_issue(node_id, &issue_type)],
            Request::FocusNode { node_id } => self.focus(node_id).into_iter().collect(),
            Request::ClosePlugin => {
                info!("closing session");
                self.closed = true;
                Vec::new()
            }
        }
    }

    /// A request flag can switch hidden-node exclusion on, never off
    fn exclude_hidden(&self, requested: bool) -> bool {
        requested || self.config.lint.exclude_hidden
    }

    fn options(&self, exclude_hidden: bool, rule_set: Option<RuleSet>) -> AuditOptions {
        let mut options = self.config.audit_options();
        options.exclude_hidden |= exclude_hidden;
        if let Some(rule_set) = rule_set {
            options.rule_set = rule_set;
        }
        options
    }

    fn no_selection() -> Response {
        Response::NoSelection {
            message: NO_SELECTION.to_string(),
        }
    }

    fn search_colors(&self, exclude_hidden: bool, selected_nodes_only: bool) -> Response {
        let exclude_hidden = self.exclude_hidden(exclude_hidden);
        info!(exclude_hidden, selected_nodes_only, "searching unbound colors");
        let audit = ColorAudit::new(&self.document, exclude_hidden);

        let nodes = if selected_nodes_only {
            if self.document.selection().is_empty() {
                return Self::no_selection();
            }
            audit.search_selection()
        } else {
            audit.search_page()
        };

        info!(count = nodes.len(), "color search finished");
        Response::ColorNodesResult {
            nodes,
            selected_nodes_only,
        }
    }

    fn check_layout(&self, exclude_hidden: bool, rule_set: Option<RuleSet>) -> Response {
        if self.document.selection().is_empty() {
            return Self::no_selection();
        }

        let options = self.options(exclude_hidden, rule_set);
        info!(
            rule_set = %options.rule_set,
            exclude_hidden = options.exclude_hidden,
            "checking auto layout"
        );
        let results = LayoutAudit::new(&self.document, &options).search_selection();
        info!(count = results.len(), "layout check finished");
        Response::AutoLayoutResults { results }
    }

    fn clone_and_fix(&mut self, exclude_hidden: bool, rule_set: Option<RuleSet>) -> Vec<Response> {
        if self.document.selection().is_empty() {
            return vec![Self::no_selection()];
        }

        let options = self.options(exclude_hidden, rule_set);
        let original_results = LayoutAudit::new(&self.document, &options).search_selection();
        if original_results.is_empty() {
            return vec![Response::NoIssues {
                message: NO_ISSUES.to_string(),
            }];
        }

        let mut responses = vec![Response::FixStarted {
            message: format!(
                "Cloning and fixing {} node(s) with layout issues...",
                original_results.len()
            ),
        }];

        let fixer = Fixer::new(&options, &self.config.fix);
        let report = fixer.clone_and_fix(&mut self.document, &original_results);

        if report.all_failed() {
            let detail = report
                .failures
                .first()
                .map(|f| f.message.clone())
                .unwrap_or_default();
            responses.push(Response::FixFailed {
                message: format!("Failed to fix layout issues: {}", detail),
            });
            return responses;
        }

        let audit = LayoutAudit::new(&self.document, &options);
        let fixed_results: Vec<LayoutFinding> = report
            .cloned_ids
            .iter()
            .flat_map(|id| audit.traverse(id))
            .collect();

        let mut message = format!(
            "Applied {} fix(es) across {} cloned node(s).",
            report.fixed_count,
            report.cloned_ids.len()
        );
        if !report.failures.is_empty() {
            message.push_str(&format!(
                " {} node(s) could not be fixed.",
                report.failures.len()
            ));
        }

        responses.push(Response::FixCompleted {
            message,
            fixed_results,
            original_results,
        });
        responses
    }

    fn fix_issue(&mut self, node_id: NodeId, issue_type: &str) -> Response {
        let kind = match issue_type.parse::<IssueKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "rejected fix request");
                return Response::FixFailed {
                    message: format!("Could not fix {} on node {}.", issue_type, node_id),
                };
            }
        };

        if fix_issue(&mut self.document, &node_id, kind) {
            Response::IssueFixed {
                node_id,
                issue_type: kind,
            }
        } else {
            Response::FixFailed {
                message: format!("Could not fix {} on node {}.", kind, node_id),
            }
        }
    }

    fn focus(&mut self, node_id: NodeId) -> Option<Response> {
        if !self.document.contains(&node_id) {
            debug!(node = %node_id, "focus target no longer exists");
            return None;
        }

        self.document.set_selection(vec![node_id.clone()]).ok()?;
        self.document
            .scroll_and_zoom_into_view(std::slice::from_ref(&node_id));
        Some(Response::NodeFocused { node_id })
    }
}
