//! Tangle command implementation.

use crate::diagnostics::{Diagnostic, Severity};
use crate::errors::Result;
use crate::interface::{scan_documents, tangle_targets, Context};
use crate::io::WriteReport;

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Dry run - show what would be done without doing it.
    pub dry_run: bool,
    /// Suppress normal output.
    pub quiet: bool,
    /// Documents or glob patterns to scan, in order (empty means the
    /// configured source patterns).
    pub files: Vec<String>,
}

/// Outcome of a tangle run.
#[derive(Debug, Default)]
pub struct TangleReport {
    /// Documents scanned successfully.
    pub documents: usize,
    /// Target files that expanded cleanly.
    pub targets: usize,
    /// Every diagnostic raised during the run, in order.
    pub diagnostics: Vec<Diagnostic>,
    /// Write results; `None` for a dry run.
    pub writes: Option<WriteReport>,
}

impl TangleReport {
    /// Number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }

    /// Number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// Whether the run counts as successful for the exit status.
    ///
    /// Diagnostics alone never fail a run; only a run where writes were
    /// attempted and none succeeded does.
    pub fn is_success(&self) -> bool {
        self.writes.as_ref().map_or(true, WriteReport::is_success)
    }
}

/// Executes the tangle command.
pub fn tangle(ctx: &mut Context, options: TangleOptions) -> Result<TangleReport> {
    tracing::info!("Tangling documents...");

    let documents = if options.files.is_empty() {
        ctx.source_files()?
    } else {
        ctx.expand_patterns(&options.files)?
    };
    if documents.is_empty() {
        tracing::info!("No documents found.");
    }

    let scanned = scan_documents(ctx, &documents);
    let transaction = tangle_targets(ctx);

    let mut report = TangleReport {
        documents: scanned,
        targets: transaction.len(),
        ..TangleReport::default()
    };

    if transaction.is_empty() {
        if !options.quiet {
            println!("No files to tangle.");
        }
    } else if options.dry_run {
        if !options.quiet {
            println!("Would perform {} actions:", transaction.len());
            for desc in transaction.describe() {
                println!("  {}", desc);
            }
        }
    } else {
        let writes = transaction.execute();
        if !options.quiet {
            println!(
                "Tangled {} files ({} unchanged).",
                writes.written.len(),
                writes.unchanged.len()
            );
        }
        ctx.diagnostics.extend(writes.failed.iter().cloned());
        report.writes = Some(writes);
    }

    report.diagnostics = ctx.take_diagnostics();
    for diagnostic in &report.diagnostics {
        diagnostic.emit();
    }

    Ok(report)
}
