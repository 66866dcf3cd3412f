//! Shared test utilities.

use std::sync::Arc;

use crate::model::{CodeBlock, CodeLine};
use crate::text_location::TextLocation;

/// Creates a block of consecutive lines starting at `first_line` of `document`.
pub fn make_lines(document: &str, first_line: usize, language: &str, texts: &[&str]) -> CodeBlock {
    let document: Arc<str> = Arc::from(document);
    let language: Arc<str> = Arc::from(language);
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            CodeLine::new(
                *text,
                TextLocation::new(Arc::clone(&document), first_line + i),
                Arc::clone(&language),
            )
        })
        .collect()
}
