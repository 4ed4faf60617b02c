//! Tessera Core - Foundational types for the Tessera design linter
//!
//! This crate provides the core types that all other Tessera crates depend on:
//! - `NodeId` - Stable node identifiers and fresh-id allocation
//! - `Rgb`, `Rect`, `Padding` - Color and geometry types
//! - Layout enums shared by the document model and the audits
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{Result, TesseraError};
pub use id::{IdAllocator, NodeId};
pub use types::{
    Axis, ConstraintType, Constraints, LayoutMode, LayoutPositioning, Padding, Rect, Rgb,
    SizingMode,
};
