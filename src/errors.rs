//! Error types for lmt.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::BlockName;

/// Main error type for lmt operations.
#[derive(Error, Debug)]
pub enum LmtError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("error reading {document}: {source}")]
    DocumentRead {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expansion re-entered a block that was already being expanded.
///
/// Holds the expansion path, outermost first, ending with the repeated name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cyclic macro reference: {}", format_cycle(.0))]
pub struct CyclicReference(pub Vec<BlockName>);

fn format_cycle(path: &[BlockName]) -> String {
    path.iter()
        .map(BlockName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for lmt operations.
pub type Result<T> = std::result::Result<T, LmtError>;
