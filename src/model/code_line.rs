//! A single provenance-tagged line of code.

use std::sync::Arc;

use crate::text_location::TextLocation;

/// One physical line taken from a fenced block.
///
/// `text` keeps its line terminator so that finalized output reproduces the
/// source byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// Raw text, including the trailing `\n` or `\r\n`.
    pub text: String,
    /// Where the line was read from.
    pub location: TextLocation,
    /// Language tag of the fence the line belongs to (may be empty).
    pub language: Arc<str>,
}

impl CodeLine {
    /// Creates a new CodeLine.
    pub fn new(text: impl Into<String>, location: TextLocation, language: Arc<str>) -> Self {
        Self {
            text: text.into(),
            location,
            language,
        }
    }

    /// Returns true if the line is nothing but a line terminator.
    pub fn is_newline(&self) -> bool {
        self.text == "\n" || self.text == "\r\n"
    }

    /// Returns a copy of this line with `prefix` prepended to its text.
    ///
    /// Pure newline lines are returned unchanged so expansion never adds
    /// trailing whitespace.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        if prefix.is_empty() || self.is_newline() {
            return self.clone();
        }
        Self {
            text: format!("{}{}", prefix, self.text),
            location: self.location.clone(),
            language: Arc::clone(&self.language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> CodeLine {
        CodeLine::new(text, TextLocation::new("doc.md", 1), Arc::from("go"))
    }

    #[test]
    fn test_is_newline() {
        assert!(line("\n").is_newline());
        assert!(line("\r\n").is_newline());
        assert!(!line("  \n").is_newline());
        assert!(!line("x\n").is_newline());
    }

    #[test]
    fn test_with_prefix() {
        assert_eq!(line("x := 1\n").with_prefix("\t").text, "\tx := 1\n");
        assert_eq!(line("\n").with_prefix("\t").text, "\n");
    }
}
