//! Lint configuration: rule-set selection and fix settings

use crate::types::IssueKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tessera_core::{Result, TesseraError};
use tessera_doc::Node;

/// Name prefix the reduced rule set skips by default
pub const DEFAULT_EXCLUDE_PREFIX: &str = "icon_";
/// Horizontal distance between an original and its fixed clone
pub const DEFAULT_CLONE_GAP: f64 = 100.0;
/// Appended to the name of every fixed clone
pub const DEFAULT_CLONE_SUFFIX: &str = " (Auto Layout)";

/// Which layout rules are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// All nine issue kinds
    #[default]
    Full,
    /// Auto-layout, sizing, group and positioning rules only; nodes whose
    /// name starts with an excluded prefix are skipped with their subtree
    Reduced,
}

impl RuleSet {
    pub fn evaluates(&self, kind: IssueKind) -> bool {
        match self {
            RuleSet::Full => true,
            RuleSet::Reduced => matches!(
                kind,
                IssueKind::NoAutoLayout
                    | IssueKind::FixedPrimaryAxis
                    | IssueKind::FixedCounterAxis
                    | IssueKind::GroupNotFrame
                    | IssueKind::AbsolutePosition
            ),
        }
    }

    pub fn kinds(&self) -> Vec<IssueKind> {
        IssueKind::ALL
            .into_iter()
            .filter(|k| self.evaluates(*k))
            .collect()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSet::Full => write!(f, "full"),
            RuleSet::Reduced => write!(f, "reduced"),
        }
    }
}

impl FromStr for RuleSet {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(RuleSet::Full),
            "reduced" => Ok(RuleSet::Reduced),
            _ => Err(TesseraError::UnknownRuleSet(s.to_string())),
        }
    }
}

/// `[lint]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSettings {
    pub rule_set: RuleSet,
    pub exclude_prefixes: Vec<String>,
    pub exclude_hidden: bool,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            rule_set: RuleSet::default(),
            exclude_prefixes: vec![DEFAULT_EXCLUDE_PREFIX.to_string()],
            exclude_hidden: false,
        }
    }
}

/// `[fix]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixSettings {
    pub clone_gap: f64,
    pub clone_suffix: String,
}

impl Default for FixSettings {
    fn default() -> Self {
        Self {
            clone_gap: DEFAULT_CLONE_GAP,
            clone_suffix: DEFAULT_CLONE_SUFFIX.to_string(),
        }
    }
}

/// Contents of a `tessera.toml` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub lint: LintSettings,
    pub fix: FixSettings,
}

impl LintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_string(&content)
    }

    /// Load configuration from a TOML string
    pub fn load_string(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            TesseraError::ConfigLoadError(format!("Failed to parse config TOML: {}", e))
        })
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            rule_set: self.lint.rule_set,
            exclude_hidden: self.lint.exclude_hidden,
            exclude_prefixes: self.lint.exclude_prefixes.clone(),
        }
    }
}

/// Per-request traversal options shared by the layout audit and the fixer
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOptions {
    pub rule_set: RuleSet,
    pub exclude_hidden: bool,
    pub exclude_prefixes: Vec<String>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        LintConfig::default().audit_options()
    }
}

impl AuditOptions {
    pub fn new(rule_set: RuleSet) -> Self {
        Self {
            rule_set,
            ..Default::default()
        }
    }

    pub fn with_exclude_hidden(mut self, exclude_hidden: bool) -> Self {
        self.exclude_hidden = exclude_hidden;
        self
    }

    /// Name-based exclusion; only the reduced rule set applies it
    pub fn is_name_excluded(&self, name: &str) -> bool {
        self.rule_set == RuleSet::Reduced
            && self.exclude_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// Whether the node and its whole subtree are left out of a walk
    pub fn skips(&self, node: &Node) -> bool {
        (self.exclude_hidden && !node.visible) || self.is_name_excluded(&node.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_doc::NodeType;

    #[test]
    fn test_defaults() {
        let config = LintConfig::new();
        assert_eq!(config.lint.rule_set, RuleSet::Full);
        assert_eq!(config.lint.exclude_prefixes, vec!["icon_".to_string()]);
        assert_eq!(config.fix.clone_gap, DEFAULT_CLONE_GAP);
    }

    #[test]
    fn test_load_from_string() {
        let config = LintConfig::load_string(
            r#"
[lint]
rule_set = "reduced"
exclude_prefixes = ["icon_", "ic-"]
exclude_hidden = true

[fix]
clone_gap = 40.0
"#,
        )
        .unwrap();
        assert_eq!(config.lint.rule_set, RuleSet::Reduced);
        assert!(config.lint.exclude_hidden);
        assert_eq!(config.fix.clone_gap, 40.0);
        assert_eq!(config.fix.clone_suffix, DEFAULT_CLONE_SUFFIX);
    }

    #[test]
    fn test_unknown_rule_set_is_config_error() {
        let result = LintConfig::load_string("[lint]\nrule_set = \"strict\"\n");
        assert!(matches!(result, Err(TesseraError::ConfigLoadError(_))));
        assert!(matches!(
            "strict".parse::<RuleSet>(),
            Err(TesseraError::UnknownRuleSet(_))
        ));
    }

    #[test]
    fn test_reduced_rule_kinds() {
        let kinds = RuleSet::Reduced.kinds();
        assert_eq!(kinds.len(), 5);
        assert!(!kinds.contains(&IssueKind::AsymmetricPadding));
        assert_eq!(RuleSet::Full.kinds().len(), 9);
    }

    #[test]
    fn test_prefix_exclusion_only_in_reduced() {
        let icon = Node::new("1:1", "icon_arrow", NodeType::Frame);
        assert!(!AuditOptions::new(RuleSet::Full).skips(&icon));
        assert!(AuditOptions::new(RuleSet::Reduced).skips(&icon));

        let hidden = Node::new("1:2", "Card", NodeType::Frame).hidden();
        assert!(!AuditOptions::new(RuleSet::Full).skips(&hidden));
        assert!(AuditOptions::new(RuleSet::Full)
            .with_exclude_hidden(true)
            .skips(&hidden));
    }
}
