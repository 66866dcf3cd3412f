//! High-level interface for tangle runs.

mod context;
mod document;

pub use context::Context;
pub use document::{declared_targets, scan_documents, scan_path, tangle_targets};
