//! Document saving to JSON or TOML files

use crate::document::Document;
use crate::format::{DocumentFile, DocumentFormat, DocumentMetadata, NodeDef};
use crate::node::Node;
use std::fs;
use std::path::Path;
use tessera_core::Result;

/// Save a document, picking the format from the file extension
pub fn save_document<P: AsRef<Path>>(path: P, doc: &Document) -> Result<()> {
    let format = DocumentFormat::from_path(path.as_ref())?;
    let content = save_document_string(doc, format)?;
    fs::write(path, content)?;
    Ok(())
}

/// Serialize a document to a string
pub fn save_document_string(doc: &Document, format: DocumentFormat) -> Result<String> {
    let file = document_to_file(doc);
    let content = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(&file)?,
        DocumentFormat::Toml => toml::to_string_pretty(&file)?,
    };
    Ok(content)
}

/// Convert the page tree of a document to its file representation.
///
/// Detached nodes (created but never attached) are not part of the page
/// and are not written.
pub fn document_to_file(doc: &Document) -> DocumentFile {
    DocumentFile {
        document: DocumentMetadata {
            name: doc.name().to_string(),
            version: "1.0".to_string(),
        },
        selection: doc.selection().to_vec(),
        page: node_to_def(doc, doc.page()),
    }
}

fn node_to_def(doc: &Document, node: &Node) -> NodeDef {
    let mut def = NodeDef::from_node(node);
    def.children = doc
        .children_of(&node.id)
        .iter()
        .filter_map(|child| doc.get(child))
        .map(|child| node_to_def(doc, child))
        .collect();
    def
}
