//! Unbound color search command

use super::{load_config, open_document, print_response_json};
use anyhow::Result;
use tessera_audit::{ColorFinding, PaintSource};
use tessera_core::Rgb;
use tessera_session::{Request, Response, Session};

pub struct ColorsArgs {
    pub document: String,
    pub config: String,
    pub exclude_hidden: bool,
    pub selected_only: bool,
    pub format: String,
}

pub fn run(args: ColorsArgs) -> Result<()> {
    let config = load_config(&args.config, None)?;
    let doc = open_document(&args.document)?;
    let mut session = Session::new(doc, config);

    let responses = session.handle(Request::SearchColorNodes {
        exclude_hidden: args.exclude_hidden,
        selected_nodes_only: args.selected_only,
    });

    for response in &responses {
        if args.format == "json" {
            print_response_json(response)?;
            continue;
        }
        match response {
            Response::ColorNodesResult { nodes, .. } => print_findings_text(nodes),
            Response::NoSelection { message } => println!("{}", message),
            _ => {}
        }
    }

    Ok(())
}

fn print_findings_text(nodes: &[ColorFinding]) {
    if nodes.is_empty() {
        println!("All solid colors are bound to variables.");
        return;
    }

    println!("{} node(s) with unbound colors:", nodes.len());
    println!();

    for node in nodes {
        let hidden = if node.visible { "" } else { " [hidden]" };
        println!("  {} ({}, {}){}", node.name, node.id, node.node_type, hidden);
        for entry in &node.colors {
            let source = match entry.source {
                PaintSource::Fill => "fill",
                PaintSource::Stroke => "stroke",
            };
            let hex = Rgb::new(entry.color.r, entry.color.g, entry.color.b).to_hex();
            println!(
                "    {:<6} [{}] {}  {:.0}%",
                source,
                entry.index,
                hex,
                entry.color.opacity * 100.0
            );
        }
    }
}
