//! Linearizes an expanded block into output text.

use crate::config::Config;
use crate::text_location::TextLocation;

use super::code_block::CodeBlock;

/// Converts an expanded block into the final file contents.
///
/// Before the first line, and before any line that does not directly follow
/// its predecessor in the same document, the directive chosen for the line's
/// language is inserted so that compilers report positions in the original
/// document.
pub fn finalize(block: &CodeBlock, config: &Config) -> String {
    let mut output = String::with_capacity(block.iter().map(|l| l.text.len()).sum());
    let mut previous: Option<&TextLocation> = None;

    for line in block {
        let continuous = previous.is_some_and(|prev| prev.is_followed_by(&line.location));
        if !continuous {
            let directive = config.directive_for(&line.language);
            if let Some(text) = directive.format(line.location.line, &line.location.document) {
                output.push_str(&text);
            }
        }
        output.push_str(&line.text);
        previous = Some(&line.location);
    }

    output
}
