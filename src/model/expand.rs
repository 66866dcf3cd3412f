//! Macro expansion of code blocks.

use std::collections::HashSet;

use crate::config::parse_reference;
use crate::diagnostics::Diagnostic;
use crate::errors::CyclicReference;

use super::block_name::BlockName;
use super::code_block::CodeBlock;
use super::registry::BlockRegistry;

/// Cycle detector for preventing infinite recursion during expansion.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    /// Names currently being expanded, outermost first.
    stack: Vec<BlockName>,
    /// Set for O(1) membership checks.
    seen: HashSet<BlockName>,
}

impl CycleDetector {
    /// Creates a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a block, checking for cycles.
    ///
    /// Returns an error carrying the offending path if the block is already
    /// being expanded.
    pub fn enter(&mut self, name: &BlockName) -> Result<(), CyclicReference> {
        if self.seen.contains(name) {
            let mut cycle = self.stack.clone();
            cycle.push(name.clone());
            return Err(CyclicReference(cycle));
        }
        self.seen.insert(name.clone());
        self.stack.push(name.clone());
        Ok(())
    }

    /// Exits the innermost block.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
        }
    }

    /// Returns the current depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Expands every macro reference in `block`, recursively.
///
/// The result contains no reference to a defined block. References to
/// undefined blocks are kept verbatim and reported through `diagnostics`.
pub fn expand(
    registry: &BlockRegistry,
    block: &CodeBlock,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<CodeBlock, CyclicReference> {
    let mut detector = CycleDetector::new();
    let mut output = CodeBlock::new();
    expand_into(registry, block, "", &mut detector, diagnostics, &mut output)?;
    Ok(output)
}

/// Expands `block` with `prefix` prepended to every non-blank line, appending
/// the result to `output`.
pub fn expand_into(
    registry: &BlockRegistry,
    block: &CodeBlock,
    prefix: &str,
    detector: &mut CycleDetector,
    diagnostics: &mut Vec<Diagnostic>,
    output: &mut CodeBlock,
) -> Result<(), CyclicReference> {
    for line in block {
        let Some(reference) = parse_reference(&line.text) else {
            output.push(line.with_prefix(prefix));
            continue;
        };

        let Some(referenced) = registry.block(reference.name) else {
            diagnostics.push(Diagnostic::UndefinedReference {
                name: BlockName::new(reference.name),
                location: line.location.clone(),
            });
            output.push(line.clone());
            continue;
        };

        let name = BlockName::new(reference.name);
        detector.enter(&name)?;
        tracing::trace!("Expanding {} at depth {}", name, detector.depth());

        let combined_prefix = format!("{}{}", prefix, reference.indent);
        expand_into(
            registry,
            referenced,
            &combined_prefix,
            detector,
            diagnostics,
            output,
        )?;

        detector.exit();
    }

    Ok(())
}
