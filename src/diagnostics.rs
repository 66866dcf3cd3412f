//! Structured diagnostics reported while tangling.
//!
//! None of these conditions stop a run. The library collects them and the
//! command layer decides how to render them.

use std::fmt;
use std::path::PathBuf;

use crate::model::BlockName;
use crate::text_location::TextLocation;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable condition encountered during scanning, expansion or output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A macro reference names a block that no scanned document defines.
    UndefinedReference {
        name: BlockName,
        location: TextLocation,
    },

    /// Expanding a target file re-entered a block already being expanded.
    CyclicReference {
        target: PathBuf,
        cycle: Vec<BlockName>,
    },

    /// A fence was still open when the document ended; its content was dropped.
    UnterminatedFence { location: TextLocation },

    /// A document could not be opened or read.
    DocumentAccess { document: String, message: String },

    /// A target file could not be written.
    OutputWrite { path: PathBuf, message: String },

    /// A document contains bytes that are not UTF-8; they were replaced with U+FFFD.
    /// Only the first offending line of a document is reported.
    InvalidEncoding { location: TextLocation },

    /// A document glob pattern matched no files.
    UnmatchedPattern { pattern: String },

    /// A target path would resolve outside the configured output directory.
    TargetOutsideOutputDir { target: PathBuf },
}

impl Diagnostic {
    /// Returns the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UndefinedReference { .. }
            | Diagnostic::UnterminatedFence { .. }
            | Diagnostic::InvalidEncoding { .. }
            | Diagnostic::UnmatchedPattern { .. } => Severity::Warning,
            Diagnostic::CyclicReference { .. }
            | Diagnostic::DocumentAccess { .. }
            | Diagnostic::OutputWrite { .. }
            | Diagnostic::TargetOutsideOutputDir { .. } => Severity::Error,
        }
    }

    /// Emits this diagnostic through `tracing` at the matching level.
    pub fn emit(&self) {
        match self.severity() {
            Severity::Warning => tracing::warn!("{}", self),
            Severity::Error => tracing::error!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UndefinedReference { name, location } => write!(
                f,
                "{}: block named {} referenced but not defined",
                location, name
            ),
            Diagnostic::CyclicReference { target, cycle } => {
                let path: Vec<&str> = cycle.iter().map(BlockName::as_str).collect();
                write!(
                    f,
                    "{}: cyclic macro reference {}",
                    target.display(),
                    path.join(" -> ")
                )
            }
            Diagnostic::UnterminatedFence { location } => {
                write!(f, "{}: code fence is never closed", location)
            }
            Diagnostic::DocumentAccess { document, message } => {
                write!(f, "{}: {}", document, message)
            }
            Diagnostic::OutputWrite { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
            Diagnostic::InvalidEncoding { location } => {
                write!(f, "{}: invalid UTF-8 replaced with U+FFFD", location)
            }
            Diagnostic::UnmatchedPattern { pattern } => {
                write!(f, "{}: pattern matched no documents", pattern)
            }
            Diagnostic::TargetOutsideOutputDir { target } => write!(
                f,
                "{}: target escapes the output directory, not written",
                target.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let undefined = Diagnostic::UndefinedReference {
            name: BlockName::new("missing"),
            location: TextLocation::new("a.md", 3),
        };
        assert_eq!(undefined.severity(), Severity::Warning);

        let access = Diagnostic::DocumentAccess {
            document: "gone.md".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(access.severity(), Severity::Error);

        let escaped = Diagnostic::TargetOutsideOutputDir {
            target: PathBuf::from("../up.go"),
        };
        assert_eq!(escaped.severity(), Severity::Error);
        assert_eq!(
            escaped.to_string(),
            "../up.go: target escapes the output directory, not written"
        );
    }

    #[test]
    fn test_display_names_the_block() {
        let diag = Diagnostic::UndefinedReference {
            name: BlockName::new("missing"),
            location: TextLocation::new("a.md", 3),
        };
        assert_eq!(
            diag.to_string(),
            "a.md:3: block named missing referenced but not defined"
        );
    }

    #[test]
    fn test_input_warnings() {
        let encoding = Diagnostic::InvalidEncoding {
            location: TextLocation::new("notes.md", 7),
        };
        assert_eq!(encoding.severity(), Severity::Warning);
        assert_eq!(
            encoding.to_string(),
            "notes.md:7: invalid UTF-8 replaced with U+FFFD"
        );

        let unmatched = Diagnostic::UnmatchedPattern {
            pattern: "docs/*.md".to_string(),
        };
        assert_eq!(unmatched.severity(), Severity::Warning);
        assert_eq!(unmatched.to_string(), "docs/*.md: pattern matched no documents");
    }

    #[test]
    fn test_display_cycle() {
        let diag = Diagnostic::CyclicReference {
            target: PathBuf::from("main.go"),
            cycle: vec![BlockName::new("a"), BlockName::new("a")],
        };
        assert_eq!(diag.to_string(), "main.go: cyclic macro reference a -> a");
    }
}
