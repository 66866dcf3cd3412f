//! Names of macro blocks.

use std::fmt;

/// A block name identifies a named macro block.
///
/// Names come from the quoted part of a fence header and may contain any
/// characters, including spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockName(String);

impl BlockName {
    /// Creates a new BlockName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BlockName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BlockName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for BlockName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for BlockName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
