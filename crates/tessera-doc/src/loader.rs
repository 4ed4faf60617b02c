//! Document loading from JSON or TOML files

use crate::document::Document;
use crate::format::{DocumentFile, DocumentFormat, NodeDef};
use std::fs;
use std::path::Path;
use tessera_core::{NodeId, Result};

/// Load a document file, picking the format from its extension
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let format = DocumentFormat::from_path(path.as_ref())?;
    let content = fs::read_to_string(path)?;
    load_document_str(&content, format)
}

/// Load a document from a string in the given format
pub fn load_document_str(content: &str, format: DocumentFormat) -> Result<Document> {
    let file: DocumentFile = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
    };
    document_from_file(&file)
}

/// Build a document store from a parsed file
pub fn document_from_file(file: &DocumentFile) -> Result<Document> {
    let mut doc = Document::with_page(file.document.name.clone(), file.page.to_node()?)?;
    let page_id = doc.page_id().clone();

    for child in &file.page.children {
        insert_tree(&mut doc, &page_id, child)?;
    }

    doc.set_selection(file.selection.clone())?;
    Ok(doc)
}

fn insert_tree(doc: &mut Document, parent: &NodeId, def: &NodeDef) -> Result<()> {
    let id = doc.insert(parent, def.to_node()?)?;
    for child in &def.children {
        insert_tree(doc, &id, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::TesseraError;

    const SAMPLE_TOML: &str = r#"
selection = ["1:1"]

[document]
name = "Checkout"

[page]
id = "0:1"
name = "Page 1"
type = "PAGE"

[[page.children]]
id = "1:1"
name = "Cart"
type = "FRAME"
width = 320
height = 480
layoutMode = "NONE"

[[page.children.children]]
id = "1:2"
name = "Total"
type = "TEXT"

[[page.children.children.fills]]
type = "SOLID"
color = { r = 0.1, g = 0.1, b = 0.1 }
"#;

    #[test]
    fn test_load_toml_document() {
        let doc = load_document_str(SAMPLE_TOML, DocumentFormat::Toml).unwrap();
        assert_eq!(doc.name(), "Checkout");
        assert_eq!(doc.selection(), &[NodeId::from("1:1")][..]);

        let cart = NodeId::from("1:1");
        assert_eq!(doc.children_of(&cart), &[NodeId::from("1:2")][..]);
        let total = doc.get(&NodeId::from("1:2")).unwrap();
        assert_eq!(total.paints().unwrap().fills.len(), 1);
        assert_eq!(doc.get(&cart).unwrap().bounds.width, 320.0);
    }

    #[test]
    fn test_load_json_document() {
        let json = r#"{
            "document": { "name": "Empty" },
            "page": { "id": "0:1", "name": "Page 1", "type": "PAGE" }
        }"#;
        let doc = load_document_str(json, DocumentFormat::Json).unwrap();
        assert_eq!(doc.node_count(), 1);
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn test_unknown_selection_fails() {
        let json = r#"{
            "document": { "name": "Broken" },
            "selection": ["7:7"],
            "page": { "id": "0:1", "name": "Page 1", "type": "PAGE" }
        }"#;
        assert!(matches!(
            load_document_str(json, DocumentFormat::Json),
            Err(TesseraError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_root_must_be_page() {
        let json = r#"{
            "document": { "name": "Broken" },
            "page": { "id": "0:1", "name": "Frame", "type": "FRAME" }
        }"#;
        assert!(matches!(
            load_document_str(json, DocumentFormat::Json),
            Err(TesseraError::InvalidStructure(_))
        ));
    }
}
