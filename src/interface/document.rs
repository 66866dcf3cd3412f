//! Document orchestration: scanning documents and tangling their targets.

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostic;
use crate::errors::{CyclicReference, LmtError, Result};
use crate::io::Transaction;
use crate::model::{expand, finalize};
use crate::readers::{scan_document, ScanSummary};

use super::context::Context;

/// Scans one document into the context's registry.
pub fn scan_path(ctx: &mut Context, path: &Path) -> Result<ScanSummary> {
    let document = path.to_string_lossy();
    let reader = ctx
        .file_cache
        .open(path)
        .map_err(|source| LmtError::DocumentRead {
            document: document.to_string(),
            source,
        })?;
    scan_document(
        reader,
        &document,
        &mut ctx.registry,
        &mut ctx.diagnostics,
        &ctx.config,
    )
}

/// Scans documents in order, all into the same registry.
///
/// A document that cannot be opened or read is reported as a diagnostic and
/// the remaining documents are still scanned. Blocks committed before a read
/// failure stay registered.
pub fn scan_documents<P: AsRef<Path>>(ctx: &mut Context, paths: &[P]) -> usize {
    let mut scanned = 0;
    for path in paths {
        let path = path.as_ref();
        match scan_path(ctx, path) {
            Ok(_) => scanned += 1,
            Err(e) => {
                let message = match e {
                    LmtError::DocumentRead { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                ctx.diagnostics.push(Diagnostic::DocumentAccess {
                    document: path.display().to_string(),
                    message,
                });
            }
        }
    }
    tracing::debug!(
        "Scanned {} of {} documents: {} blocks, {} target files",
        scanned,
        paths.len(),
        ctx.registry.block_count(),
        ctx.registry.file_count()
    );
    scanned
}

/// Expands and finalizes every registered target file.
///
/// Returns a transaction with one write per target, in the order the targets
/// were first defined. A target whose expansion runs into a cycle, or that
/// would land outside the configured output directory, is reported and left
/// out; the others are unaffected.
pub fn tangle_targets(ctx: &mut Context) -> Transaction {
    let mut transaction = Transaction::new();
    let mut diagnostics = Vec::new();

    for (target, block) in ctx.registry.files() {
        let Some(path) = ctx.output_path(target) else {
            diagnostics.push(Diagnostic::TargetOutsideOutputDir {
                target: target.clone(),
            });
            continue;
        };
        match expand(&ctx.registry, block, &mut diagnostics) {
            Ok(expanded) => {
                let content = finalize(&expanded, &ctx.config);
                transaction.write(path, content);
            }
            Err(CyclicReference(cycle)) => {
                diagnostics.push(Diagnostic::CyclicReference {
                    target: target.clone(),
                    cycle,
                });
            }
        }
    }

    ctx.diagnostics.extend(diagnostics);
    transaction
}

/// Returns the target paths (as declared) that `tangle_targets` will consider.
pub fn declared_targets(ctx: &Context) -> Vec<PathBuf> {
    ctx.registry.targets().cloned().collect()
}
