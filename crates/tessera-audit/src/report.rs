//! Layout report summary

use crate::types::{IssueKind, LayoutFinding, Severity};
use std::collections::BTreeMap;

/// Aggregated view over a set of layout findings
#[derive(Debug, Default)]
pub struct LayoutReport {
    pub findings: Vec<LayoutFinding>,
}

impl LayoutReport {
    pub fn new(findings: Vec<LayoutFinding>) -> Self {
        Self { findings }
    }

    /// Check if no node has an issue
    pub fn is_clean(&self) -> bool {
        self.findings.iter().all(|f| !f.has_issues)
    }

    /// Total number of issues across all nodes
    pub fn issue_count(&self) -> usize {
        self.findings.iter().map(|f| f.issues.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count_severity(Severity::Info)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .flat_map(|f| &f.issues)
            .filter(|i| i.kind().severity() == severity)
            .count()
    }

    /// Issue count per kind, in declaration order
    pub fn counts_by_kind(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts = BTreeMap::new();
        for issue in self.findings.iter().flat_map(|f| &f.issues) {
            *counts.entry(issue.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let total = self.issue_count();
        if total == 0 {
            return "No layout issues found.".to_string();
        }

        format!(
            "{} issue(s) on {} node(s): {} warning(s), {} info",
            total,
            self.findings.iter().filter(|f| f.has_issues).count(),
            self.warning_count(),
            self.info_count(),
        )
    }
}
