//! Focus command: select a node and bring it into view

use super::{load_config, open_document};
use anyhow::{bail, Context, Result};
use tessera_core::NodeId;
use tessera_doc::save_document;
use tessera_session::{Request, Response, Session};

pub fn run(document: &str, config: &str, node_id: &str) -> Result<()> {
    let config = load_config(config, None)?;
    let doc = open_document(document)?;
    let mut session = Session::new(doc, config);

    let responses = session.handle(Request::FocusNode {
        node_id: NodeId::from(node_id),
    });

    let Some(Response::NodeFocused { node_id }) = responses.into_iter().next() else {
        bail!("node {} not found", node_id);
    };

    let viewport = session.document().viewport();
    println!(
        "Focused {} (center {:.1}, {:.1}; zoom {:.2})",
        node_id, viewport.center.0, viewport.center.1, viewport.zoom
    );

    save_document(document, session.document())
        .with_context(|| format!("failed to save {}", document))?;
    Ok(())
}
