//! Fence header classification.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{BlockName, WriteMode};

use super::fence::{parse_fence_open, Fence};

/// Header of a named macro block: optional language, quoted name, optional `+=`.
static NAMED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:`{3,}|~{3,})\s?(?P<lang>[\w+]*)\s*"(?P<name>.+)"\s*(?P<append>\+=)?$"#)
        .unwrap()
});

/// Header of a target file block: language, bare path, optional `+=`.
static FILE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:`{3,}|~{3,})\s?(?P<lang>[\w+]+)\s+(?P<path>[\w./-]+)\s*(?P<append>\+=)?$")
        .unwrap()
});

/// What a fenced block contributes to when it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceTarget {
    /// A named macro block.
    Block(BlockName),
    /// (Part of) an output file.
    File(PathBuf),
    /// Neither; the block is scanned and discarded.
    Unrecognized,
}

/// The parsed opening line of a fenced block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceHeader {
    /// Fence descriptor used to find the matching close.
    pub fence: Fence,
    /// Declared language tag, empty if absent.
    pub language: String,
    /// Registry target.
    pub target: FenceTarget,
    /// True when the header ends in `+=`.
    pub append: bool,
}

impl FenceHeader {
    /// Returns how the block combines with an existing registry entry.
    pub fn write_mode(&self) -> WriteMode {
        if self.append {
            WriteMode::Append
        } else {
            WriteMode::Replace
        }
    }
}

/// Classifies a fence-opening line.
///
/// Returns `None` if the line does not open a fence at all. A fence whose
/// header matches neither the named-block nor the file pattern still opens,
/// with an [`FenceTarget::Unrecognized`] target.
pub fn parse_header(line: &str) -> Option<FenceHeader> {
    let trimmed = line.trim();
    let fence = parse_fence_open(trimmed)?.fence;

    if let Some(caps) = NAMED_BLOCK.captures(trimmed) {
        return Some(FenceHeader {
            fence,
            language: caps["lang"].to_string(),
            target: FenceTarget::Block(BlockName::new(&caps["name"])),
            append: caps.name("append").is_some(),
        });
    }

    if let Some(caps) = FILE_BLOCK.captures(trimmed) {
        return Some(FenceHeader {
            fence,
            language: caps["lang"].to_string(),
            target: FenceTarget::File(PathBuf::from(&caps["path"])),
            append: caps.name("append").is_some(),
        });
    }

    Some(FenceHeader {
        fence,
        language: String::new(),
        target: FenceTarget::Unrecognized,
        append: false,
    })
}
