//! Clone-and-fix and targeted fix commands

use super::{load_config, open_document};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tessera_audit::{compute_document_diff, Fixer, LayoutAudit};
use tessera_core::NodeId;
use tessera_doc::{save_document, save_document_string, DocumentFormat};
use tessera_session::{Request, Response, Session};

pub struct FixArgs {
    pub document: String,
    pub config: String,
    pub exclude_hidden: bool,
    pub rules: Option<String>,
    pub dry_run: bool,
    pub output_diff: bool,
}

pub fn run(args: FixArgs) -> Result<()> {
    let config = load_config(&args.config, args.rules.as_deref())?;
    let format = DocumentFormat::from_path(Path::new(&args.document))?;
    let mut doc = open_document(&args.document)?;

    if doc.selection().is_empty() {
        println!("No nodes selected. Select one or more nodes first.");
        return Ok(());
    }

    let mut options = config.audit_options();
    options.exclude_hidden |= args.exclude_hidden;
    let findings = LayoutAudit::new(&doc, &options).search_selection();
    if findings.is_empty() {
        println!("No layout issues found in the selection.");
        return Ok(());
    }

    let fixer = Fixer::new(&options, &config.fix);

    if args.dry_run {
        let plan = fixer.dry_run(&doc, &findings);
        println!("Dry run results ({} fix(es)):", plan.len());
        for step in &plan.steps {
            println!("  [{}] {}", step.kind, step.describe());
        }
        return Ok(());
    }

    // Save before state for diff
    let before = if args.output_diff {
        Some(save_document_string(&doc, format)?)
    } else {
        None
    };

    let report = fixer.clone_and_fix(&mut doc, &findings);

    println!(
        "Fix results: {} fix(es) across {} clone(s)",
        report.fixed_count,
        report.cloned_ids.len()
    );
    for id in &report.cloned_ids {
        if let Some(clone) = doc.get(id) {
            println!("  + {} ({})", clone.name, clone.id);
        }
    }
    for failure in &report.failures {
        println!("  ! {}: {}", failure.node_id, failure.message);
    }

    if report.all_failed() {
        bail!("no node could be fixed");
    }

    save_document(&args.document, &doc)
        .with_context(|| format!("failed to save {}", args.document))?;
    println!("\nDocument saved to {}", args.document);

    if let Some(before) = before {
        let after = save_document_string(&doc, format)?;
        println!("\nDiff:");
        print!("{}", compute_document_diff(&before, &after));
    }

    Ok(())
}

pub struct FixIssueArgs {
    pub document: String,
    pub config: String,
    pub node_id: String,
    pub issue_type: String,
}

pub fn run_issue(args: FixIssueArgs) -> Result<()> {
    let config = load_config(&args.config, None)?;
    let doc = open_document(&args.document)?;
    let mut session = Session::new(doc, config);

    let responses = session.handle(Request::FixIssue {
        node_id: NodeId::from(args.node_id.as_str()),
        issue_type: args.issue_type,
    });

    match responses.first() {
        Some(Response::IssueFixed {
            node_id,
            issue_type,
        }) => {
            println!("Fixed {} on {}", issue_type, node_id);
        }
        Some(Response::FixFailed { message }) => bail!("{}", message),
        _ => bail!("unexpected response to fix request"),
    }

    save_document(&args.document, session.document())
        .with_context(|| format!("failed to save {}", args.document))?;
    println!("Document saved to {}", args.document);
    Ok(())
}
