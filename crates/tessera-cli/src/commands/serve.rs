//! JSON-lines session over stdin/stdout

use super::{load_config, open_document};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tessera_doc::save_document;
use tessera_session::Session;
use tracing::{info, warn};

pub fn run(document: &str, config: &str, save: bool) -> Result<()> {
    let config = load_config(config, None)?;
    let doc = open_document(document)?;
    info!(document, nodes = doc.node_count(), "session started");

    let mut session = Session::new(doc, config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let responses = match session.handle_line(&line) {
            Ok(responses) => responses,
            Err(e) => {
                warn!(error = %e, "skipping malformed request");
                continue;
            }
        };

        for response in &responses {
            writeln!(stdout, "{}", serde_json::to_string(response)?)?;
        }
        stdout.flush()?;

        if session.is_closed() {
            break;
        }
    }

    info!("session ended");

    if save {
        save_document(document, session.document())
            .with_context(|| format!("failed to save {}", document))?;
        info!(document, "document saved");
    }

    Ok(())
}
