//! Registries of named macro blocks and target files.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::block_name::BlockName;
use super::code_block::CodeBlock;

/// How a committed block combines with an existing entry under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Last write wins.
    #[default]
    Replace,
    /// Concatenate after the existing lines.
    Append,
}

/// The two block registries populated by scanning.
///
/// - `blocks`: macro name -> block, resolved by the expander
/// - `files`: output path -> block, one output file per entry
///
/// Both keep insertion order so output and diagnostics are deterministic.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    blocks: IndexMap<BlockName, CodeBlock>,
    files: IndexMap<PathBuf, CodeBlock>,
}

impl BlockRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a macro block. Empty names are ignored.
    pub fn commit_block(&mut self, name: BlockName, block: CodeBlock, mode: WriteMode) {
        if name.is_empty() {
            return;
        }
        commit(&mut self.blocks, name, block, mode);
    }

    /// Stores a target file block. Empty paths are ignored.
    pub fn commit_file(&mut self, path: PathBuf, block: CodeBlock, mode: WriteMode) {
        if path.as_os_str().is_empty() {
            return;
        }
        commit(&mut self.files, path, block, mode);
    }

    /// Gets a macro block by name.
    pub fn block(&self, name: &str) -> Option<&CodeBlock> {
        self.blocks.get(name)
    }

    /// Gets a target file block by path.
    pub fn file(&self, path: &Path) -> Option<&CodeBlock> {
        self.files.get(path)
    }

    /// Checks if a macro name is defined.
    pub fn contains_block(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Returns all target files with their blocks in insertion order.
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &CodeBlock)> {
        self.files.iter()
    }

    /// Returns all target file paths in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys()
    }

    /// Returns the number of macro blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the number of target files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns true if neither registry has entries.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.files.is_empty()
    }
}

fn commit<K: std::hash::Hash + Eq>(
    map: &mut IndexMap<K, CodeBlock>,
    key: K,
    block: CodeBlock,
    mode: WriteMode,
) {
    match mode {
        WriteMode::Append => map.entry(key).or_default().append(block),
        WriteMode::Replace => {
            map.insert(key, block);
        }
    }
}
