//! Code fence delimiters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for matching code fence openings.
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<indent>\s*)(?P<fence>`{3,}|~{3,})").unwrap());

/// The character family a fence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceKind {
    Backtick,
    Tilde,
}

impl FenceKind {
    /// Returns the marker character.
    pub fn marker(self) -> char {
        match self {
            FenceKind::Backtick => '`',
            FenceKind::Tilde => '~',
        }
    }

    fn from_marker(c: char) -> Option<Self> {
        match c {
            '`' => Some(FenceKind::Backtick),
            '~' => Some(FenceKind::Tilde),
            _ => None,
        }
    }
}

/// Describes an opening fence: which character it uses and how long its run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fence {
    pub kind: FenceKind,
    pub len: usize,
}

impl Fence {
    /// Creates a new fence descriptor.
    pub fn new(kind: FenceKind, len: usize) -> Self {
        Self { kind, len }
    }

    /// Returns true if `line` closes a block opened with this fence.
    ///
    /// The trimmed line must consist only of this fence's marker, repeated at
    /// least as many times as in the opening run.
    pub fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let marker = self.kind.marker();
        !trimmed.is_empty()
            && trimmed.chars().all(|c| c == marker)
            && trimmed.chars().count() >= self.len
    }
}

/// A line that opens a fenced region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpening<'a> {
    /// Whitespace in front of the fence run.
    pub indent: &'a str,
    /// The fence run itself.
    pub fence: Fence,
}

/// Checks whether `line` opens a fenced region.
pub fn parse_fence_open(line: &str) -> Option<FenceOpening<'_>> {
    let caps = FENCE_OPEN.captures(line)?;
    let run = caps.name("fence")?.as_str();
    let kind = FenceKind::from_marker(run.chars().next()?)?;
    Some(FenceOpening {
        indent: caps.name("indent").map_or("", |m| m.as_str()),
        fence: Fence::new(kind, run.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_open() {
        let opening = parse_fence_open("```go main.go\n").unwrap();
        assert_eq!(opening.indent, "");
        assert_eq!(opening.fence, Fence::new(FenceKind::Backtick, 3));
    }

    #[test]
    fn test_indented_tilde_open() {
        let opening = parse_fence_open("    ~~~~~\n").unwrap();
        assert_eq!(opening.indent, "    ");
        assert_eq!(opening.fence, Fence::new(FenceKind::Tilde, 5));
    }

    #[test]
    fn test_not_a_fence() {
        assert!(parse_fence_open("``not enough\n").is_none());
        assert!(parse_fence_open("text ```\n").is_none());
        assert!(parse_fence_open("~~\n").is_none());
    }

    #[test]
    fn test_close_same_length() {
        let fence = Fence::new(FenceKind::Backtick, 3);
        assert!(fence.closes("```\n"));
        assert!(fence.closes("```"));
        assert!(fence.closes("  ```  \r\n"));
    }

    #[test]
    fn test_close_requires_length() {
        let fence = Fence::new(FenceKind::Backtick, 4);
        assert!(!fence.closes("```\n"));
        assert!(fence.closes("````\n"));
        assert!(fence.closes("``````\n"));
    }

    #[test]
    fn test_close_requires_same_family() {
        let fence = Fence::new(FenceKind::Tilde, 3);
        assert!(!fence.closes("```\n"));
        assert!(fence.closes("~~~\n"));
    }

    #[test]
    fn test_close_rejects_info_string() {
        let fence = Fence::new(FenceKind::Backtick, 3);
        assert!(!fence.closes("```go\n"));
        assert!(!fence.closes("\n"));
    }
}
