//! Layout check command

use super::{load_config, open_document, print_response_json};
use anyhow::Result;
use tessera_audit::{LayoutFinding, LayoutReport, Severity};
use tessera_session::{Request, Response, Session};

pub struct LayoutArgs {
    pub document: String,
    pub config: String,
    pub exclude_hidden: bool,
    pub rules: Option<String>,
    pub format: String,
}

pub fn run(args: LayoutArgs) -> Result<()> {
    let config = load_config(&args.config, args.rules.as_deref())?;
    let rule_set = config.lint.rule_set;
    let doc = open_document(&args.document)?;
    let mut session = Session::new(doc, config);

    let responses = session.handle(Request::CheckAutoLayout {
        exclude_hidden: args.exclude_hidden,
        rule_set: Some(rule_set),
    });

    let mut has_warnings = false;
    for response in responses {
        if args.format == "json" {
            print_response_json(&response)?;
        }
        match response {
            Response::AutoLayoutResults { results } => {
                let report = LayoutReport::new(results);
                has_warnings = report.warning_count() > 0;
                if args.format != "json" {
                    print_report_text(&report);
                }
            }
            Response::NoSelection { message } if args.format != "json" => println!("{}", message),
            _ => {}
        }
    }

    if has_warnings {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report_text(report: &LayoutReport) {
    if report.is_clean() {
        println!("No layout issues found.");
        return;
    }

    println!("{}", report.summary());
    println!();

    for finding in &report.findings {
        print_finding(finding);
    }
}

fn print_finding(finding: &LayoutFinding) {
    println!("  {} ({}, {})", finding.name, finding.id, finding.node_type);
    for issue in &finding.issues {
        let severity_str = match issue.kind().severity() {
            Severity::Warning => "WARN ",
            Severity::Info => "INFO ",
        };
        println!("    [{}] {}: {}", severity_str, issue.kind(), issue.message);
    }
}
