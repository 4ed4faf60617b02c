//! Tessera Audit - design lint rules and auto-fix
//!
//! Two audits run over a [`tessera_doc::Document`]: the color audit reports
//! solid paints that are not bound to a design-system variable, and the
//! layout audit reports responsive-layout problems under a configurable
//! [`RuleSet`]. The fixer repairs layout issues either on clones placed next
//! to the originals or on a single live node.

mod color;
mod config;
mod diff;
mod fixer;
mod layout;
mod report;
mod types;

pub use color::{
    extract_unbound_colors, has_unbound_color, ColorAudit, ColorFinding, ColorValue, PaintSource,
    UnboundColor,
};
pub use config::{
    AuditOptions, FixSettings, LintConfig, LintSettings, RuleSet, DEFAULT_CLONE_GAP,
    DEFAULT_CLONE_SUFFIX, DEFAULT_EXCLUDE_PREFIX,
};
pub use diff::{compute_document_diff, diff_lines, DiffLine};
pub use fixer::{
    collapse_to_topmost, convert_group_to_frame, fix_issue, remediate, AppliedFixes,
    CloneFixReport, FixFailure, FixPlan, Fixer, PendingFix, Remediation,
};
pub use layout::LayoutAudit;
pub use report::LayoutReport;
pub use types::{IssueDetail, IssueKind, LayoutFinding, LayoutIssue, Severity};
