//! Single-pass scanner that collects fenced blocks from a document.

use std::borrow::Cow;
use std::io::BufRead;
use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::errors::{LmtError, Result};
use crate::model::{BlockRegistry, CodeBlock, CodeLine};
use crate::text_location::TextLocation;

use super::header::{parse_header, FenceHeader, FenceTarget};

/// Counts gathered while scanning one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of lines read.
    pub lines: usize,
    /// Named macro blocks committed.
    pub blocks: usize,
    /// Target file blocks committed.
    pub files: usize,
}

/// A fenced region that has been opened but not yet closed.
#[derive(Debug)]
struct OpenBlock {
    header: FenceHeader,
    /// Leading whitespace of the opening fence, stripped from every body line.
    prefix: String,
    /// Line number of the opening fence.
    opened_at: usize,
    language: Arc<str>,
    lines: CodeBlock,
}

#[derive(Debug)]
enum ScanState {
    Outside,
    InBlock(OpenBlock),
}

/// Scans a document and commits its fenced blocks into `registry`.
///
/// Blocks are committed as soon as their closing fence is seen, so if reading
/// fails part way through, everything committed before the failure stays in
/// the registry. A fence left open at the end of the document is discarded.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD and the first such
/// line is reported; the document is still scanned to the end.
pub fn scan_document<R: BufRead>(
    mut reader: R,
    document: &str,
    registry: &mut BlockRegistry,
    diagnostics: &mut Vec<Diagnostic>,
    config: &Config,
) -> Result<ScanSummary> {
    let document: Arc<str> = Arc::from(document);
    let mut summary = ScanSummary::default();
    let mut state = ScanState::Outside;
    let mut raw = Vec::new();
    let mut encoding_reported = false;

    loop {
        raw.clear();
        let read = reader
            .read_until(b'\n', &mut raw)
            .map_err(|source| LmtError::DocumentRead {
                document: document.to_string(),
                source,
            })?;
        if read == 0 {
            break;
        }
        summary.lines += 1;
        let number = summary.lines;

        let line = String::from_utf8_lossy(&raw);
        if matches!(line, Cow::Owned(_)) && !encoding_reported {
            encoding_reported = true;
            diagnostics.push(Diagnostic::InvalidEncoding {
                location: TextLocation::new(Arc::clone(&document), number),
            });
        }

        state = match state {
            ScanState::Outside => match parse_header(&line) {
                Some(header) => {
                    let prefix = leading_whitespace(&line).to_string();
                    let language = Arc::from(header.language.as_str());
                    ScanState::InBlock(OpenBlock {
                        header,
                        prefix,
                        opened_at: number,
                        language,
                        lines: CodeBlock::new(),
                    })
                }
                None => ScanState::Outside,
            },
            ScanState::InBlock(mut open) => {
                let text = line.strip_prefix(open.prefix.as_str()).unwrap_or(&line);
                if open.header.fence.closes(text) {
                    commit(open, registry, &mut summary);
                    ScanState::Outside
                } else {
                    open.lines.push(CodeLine::new(
                        text,
                        TextLocation::new(Arc::clone(&document), number),
                        Arc::clone(&open.language),
                    ));
                    ScanState::InBlock(open)
                }
            }
        };
    }

    if let ScanState::InBlock(open) = state {
        tracing::debug!(
            "Dropping unterminated fence opened at {}:{}",
            document,
            open.opened_at
        );
        if config.warn_unterminated {
            diagnostics.push(Diagnostic::UnterminatedFence {
                location: TextLocation::new(document.clone(), open.opened_at),
            });
        }
    }

    tracing::debug!(
        "Scanned {}: {} lines, {} blocks, {} file blocks",
        document,
        summary.lines,
        summary.blocks,
        summary.files
    );
    Ok(summary)
}

fn commit(open: OpenBlock, registry: &mut BlockRegistry, summary: &mut ScanSummary) {
    let mode = open.header.write_mode();
    match open.header.target {
        FenceTarget::File(path) => {
            summary.files += 1;
            registry.commit_file(path, open.lines, mode);
        }
        FenceTarget::Block(name) => {
            summary.blocks += 1;
            registry.commit_block(name, open.lines, mode);
        }
        FenceTarget::Unrecognized => {}
    }
}

fn leading_whitespace(line: &str) -> &str {
    let body = line.trim_start();
    &line[..line.len() - body.len()]
}
