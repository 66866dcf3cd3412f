//! Code block representation.

use std::ops::Index;

use super::code_line::CodeLine;

/// An ordered sequence of lines.
///
/// A block carries no name; whether it is a macro or a target file is decided
/// by the registry key it is stored under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<CodeLine>,
}

impl CodeBlock {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line.
    pub fn push(&mut self, line: CodeLine) {
        self.lines.push(line);
    }

    /// Appends every line of `other`, consuming it.
    pub fn append(&mut self, other: CodeBlock) {
        self.lines.extend(other.lines);
    }

    /// Returns an iterator over the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, CodeLine> {
        self.lines.iter()
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the raw text of every line concatenated, without directives.
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl FromIterator<CodeLine> for CodeBlock {
    fn from_iter<I: IntoIterator<Item = CodeLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl Extend<CodeLine> for CodeBlock {
    fn extend<I: IntoIterator<Item = CodeLine>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl Index<usize> for CodeBlock {
    type Output = CodeLine;

    fn index(&self, index: usize) -> &CodeLine {
        &self.lines[index]
    }
}

impl<'a> IntoIterator for &'a CodeBlock {
    type Item = &'a CodeLine;
    type IntoIter = std::slice::Iter<'a, CodeLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
