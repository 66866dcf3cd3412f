//! Macro reference markers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reference pattern for whole-line macro references.
///
/// Both `<<<name>>>` and the comment-friendly `//<name>>>` are accepted. The
/// leading whitespace is captured so it can be carried into the expansion.
pub static REF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?:<<<|//<)(?P<refname>.+)>>>\s*$").unwrap()
});

/// A macro reference found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Whitespace before the reference marker.
    pub indent: &'a str,
    /// The referenced block name.
    pub name: &'a str,
}

/// Parses a line as a macro reference.
pub fn parse_reference(line: &str) -> Option<Reference<'_>> {
    let caps = REF_PATTERN.captures(line)?;
    Some(Reference {
        indent: caps.name("indent").map_or("", |m| m.as_str()),
        name: caps.name("refname").map_or("", |m| m.as_str()),
    })
}
