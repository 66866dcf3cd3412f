//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::language::{Language, LineDirective};

static NO_DIRECTIVE: LineDirective = LineDirective::None;

/// Main configuration structure for lmt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for markdown documents, used when no files are given.
    #[serde(default = "default_source_patterns")]
    pub source_patterns: Vec<String>,

    /// Directory that target file paths are resolved against.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Whether to emit line directives at all.
    #[serde(default = "default_true")]
    pub line_directives: bool,

    /// Directive used for languages without an entry in the language table.
    #[serde(default)]
    pub default_directive: LineDirective,

    /// Report fences that are still open at the end of a document.
    #[serde(default = "default_true")]
    pub warn_unterminated: bool,

    /// Language configurations (checked before the built-ins).
    #[serde(default)]
    pub languages: Vec<Language>,
}

fn default_source_patterns() -> Vec<String> {
    vec!["*.md".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_patterns: default_source_patterns(),
            output_dir: None,
            line_directives: true,
            default_directive: LineDirective::default(),
            warn_unterminated: true,
            languages: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a language by fence tag, checking custom languages first.
    pub fn find_language(&self, tag: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|l| l.matches(tag))
            .or_else(|| super::templates::find_language(tag))
    }

    /// Returns the directive strategy for a fence language tag.
    pub fn directive_for(&self, tag: &str) -> &LineDirective {
        if !self.line_directives {
            return &NO_DIRECTIVE;
        }
        self.find_language(tag)
            .map(|l| &l.directive)
            .unwrap_or(&self.default_directive)
    }

    /// Returns the output directory, if configured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}
