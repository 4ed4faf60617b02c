//! Tessera Doc - design document model and storage
//!
//! Nodes carry capability data (paints, children, auto-layout, constraints,
//! positioning) according to their type. The [`Document`] store owns them,
//! indexes them by id and exposes the read and mutation operations the
//! audits and fixes need. Documents round-trip through JSON or TOML files.

mod document;
mod format;
mod loader;
mod node;
mod saver;

pub use document::{Document, Viewport};
pub use format::{DocumentFile, DocumentFormat, DocumentMetadata, NodeDef};
pub use loader::{document_from_file, load_document, load_document_str};
pub use node::{
    Capabilities, LayoutProps, Node, NodeType, Paint, PaintKind, Paints, VariableAlias,
};
pub use saver::{document_to_file, save_document, save_document_string};
