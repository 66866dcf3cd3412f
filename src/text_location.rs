//! Source provenance for tangled lines.

use std::fmt;
use std::sync::Arc;

/// Position of a line within a source document.
///
/// The document identifier is shared between every line of a document, so
/// cloning a location never copies the identifier itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document identifier as it was given to the scanner.
    pub document: Arc<str>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(document: impl Into<Arc<str>>, line: usize) -> Self {
        Self {
            document: document.into(),
            line,
        }
    }

    /// Returns true if `next` directly follows this location in the same document.
    pub fn is_followed_by(&self, next: &TextLocation) -> bool {
        self.line + 1 == next.line && self.document == next.document
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let loc = TextLocation::new("test.md", 10);
        assert_eq!(format!("{}", loc), "test.md:10");
    }

    #[test]
    fn test_is_followed_by() {
        let loc = TextLocation::new("a.md", 4);
        assert!(loc.is_followed_by(&TextLocation::new("a.md", 5)));
        assert!(!loc.is_followed_by(&TextLocation::new("a.md", 6)));
        assert!(!loc.is_followed_by(&TextLocation::new("b.md", 5)));
        assert!(!loc.is_followed_by(&TextLocation::new("a.md", 4)));
    }
}
