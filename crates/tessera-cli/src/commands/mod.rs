//! CLI command implementations

pub mod colors;
pub mod fix;
pub mod focus;
pub mod layout;
pub mod serve;

use anyhow::{Context, Result};
use tessera_audit::{LintConfig, RuleSet};
use tessera_doc::{load_document, Document};
use tessera_session::Response;

/// Load `tessera.toml` (or defaults if absent), applying a `--rules` override
pub fn load_config(path: &str, rules: Option<&str>) -> Result<LintConfig> {
    let mut config = LintConfig::load_or_default(path)
        .with_context(|| format!("failed to load config {}", path))?;
    if let Some(rules) = rules {
        config.lint.rule_set = rules.parse::<RuleSet>()?;
    }
    Ok(config)
}

pub fn open_document(path: &str) -> Result<Document> {
    load_document(path).with_context(|| format!("failed to load document {}", path))
}

/// Print a response exactly as the session would send it
pub fn print_response_json(response: &Response) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
