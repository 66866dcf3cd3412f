//! Readers for markdown documents.

mod fence;
mod header;
mod scanner;

pub use fence::{parse_fence_open, Fence, FenceKind, FenceOpening};
pub use header::{parse_header, FenceHeader, FenceTarget};
pub use scanner::{scan_document, ScanSummary};
