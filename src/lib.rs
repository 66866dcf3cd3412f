//! lmt - Literate Markdown Tangle
//!
//! Extracts fenced code blocks from markdown documents and assembles them into
//! source files. Blocks are either named macros (```` ```go "name" ````) or
//! target files (```` ```go path/to/file.go ````). Target files are expanded
//! by replacing `<<<name>>>` references with the named blocks, recursively,
//! and line directives are inserted so compilers report positions in the
//! original documents.
//!
//! A run goes through four stages:
//!
//! - **Header parsing** ([`readers::parse_header`]): classifies fence lines
//! - **Scanning** ([`readers::scan_document`]): fills a [`BlockRegistry`]
//! - **Expansion** ([`model::expand`]): resolves macro references
//! - **Finalizing** ([`model::finalize`]): produces output text with directives
//!
//! # Example
//!
//! ```no_run
//! use lmt::interface::Context;
//! use lmt::commands::{tangle, TangleOptions};
//!
//! let mut ctx = Context::from_current_dir().unwrap();
//! let report = tangle(&mut ctx, TangleOptions::default()).unwrap();
//! assert!(report.is_success());
//! ```

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use commands::{TangleOptions, TangleReport};
pub use config::Config;
pub use diagnostics::{Diagnostic, Severity};
pub use errors::{LmtError, Result};
pub use interface::Context;
pub use model::{BlockName, BlockRegistry, CodeBlock, CodeLine};
pub use text_location::TextLocation;
