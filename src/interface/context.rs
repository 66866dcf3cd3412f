//! Execution context for a tangle run.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::errors::Result;
use crate::io::{FileCache, RealFileCache};
use crate::model::BlockRegistry;

/// Everything a single run reads from and accumulates into.
///
/// Contexts are independent of each other, so tests can build as many as they
/// like.
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Blocks and target files collected from scanned documents.
    pub registry: BlockRegistry,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
    /// File access for reading documents.
    pub file_cache: Arc<dyn FileCache>,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        let file_cache = Arc::new(RealFileCache::new(base_dir.clone()));
        Self {
            config,
            registry: BlockRegistry::new(),
            diagnostics: Vec::new(),
            file_cache,
            base_dir,
        }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context for the current directory, reading any config file found.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Replaces the file access layer.
    #[must_use]
    pub fn with_file_cache(mut self, file_cache: Arc<dyn FileCache>) -> Self {
        self.file_cache = file_cache;
        self
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Returns where a target file is written.
    ///
    /// With an output directory configured, targets must stay inside it:
    /// absolute paths and paths that climb out through `..` give `None`.
    /// Without one, targets resolve against the base directory as declared.
    pub fn output_path(&self, target: &Path) -> Option<PathBuf> {
        match self.config.output_dir() {
            Some(dir) if stays_inside(target) => Some(self.resolve_path(dir).join(target)),
            Some(_) => None,
            None => Some(self.resolve_path(target)),
        }
    }

    /// Returns source documents matching the configured patterns.
    ///
    /// Each pattern's matches are sorted; patterns are taken in order and
    /// duplicates keep their first position.
    pub fn source_files(&mut self) -> Result<Vec<PathBuf>> {
        let patterns = self.config.source_patterns.clone();
        self.expand_patterns(&patterns)
    }

    /// Expands document arguments in order.
    ///
    /// An argument naming an existing file is taken literally, even if it
    /// contains glob characters. Other arguments with glob characters are
    /// expanded against the file cache, and a pattern that matches nothing is
    /// reported. Remaining plain paths are kept as given, so a missing
    /// document is reported when it is scanned.
    pub fn expand_patterns<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let literal = PathBuf::from(pattern);
            let matches = if !is_glob(pattern) || self.file_cache.exists(&literal) {
                vec![literal]
            } else {
                glob::Pattern::new(pattern)?;
                let found = self.file_cache.glob(pattern)?;
                if found.is_empty() {
                    self.diagnostics.push(Diagnostic::UnmatchedPattern {
                        pattern: pattern.to_string(),
                    });
                }
                found
            };
            for path in matches {
                if !files.contains(&path) {
                    files.push(path);
                }
            }
        }
        Ok(files)
    }

    /// Removes and returns the collected diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// True if a relative path never climbs above its starting directory.
fn stays_inside(path: &Path) -> bool {
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::VirtualFS;
    use tempfile::tempdir;

    #[test]
    fn test_context_new() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        assert_eq!(ctx.base_dir, dir.path());
        assert!(ctx.registry.is_empty());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let resolved = ctx.resolve_path(Path::new("src/main.go"));
        assert_eq!(resolved, dir.path().join("src/main.go"));

        let resolved = ctx.resolve_path(Path::new("/absolute/path"));
        assert_eq!(resolved, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_output_path_uses_output_dir() {
        let dir = tempdir().unwrap();
        let config = Config {
            output_dir: Some(PathBuf::from("build")),
            ..Config::default()
        };
        let ctx = Context::new(config, dir.path().to_path_buf());

        assert_eq!(
            ctx.output_path(Path::new("cmd/main.go")),
            Some(dir.path().join("build/cmd/main.go"))
        );
        assert_eq!(
            ctx.output_path(Path::new("cmd/../main.go")),
            Some(dir.path().join("build/cmd/../main.go"))
        );
        assert_eq!(ctx.output_path(Path::new("../escape.go")), None);
        assert_eq!(ctx.output_path(Path::new("a/../../escape.go")), None);
        assert_eq!(ctx.output_path(Path::new("/etc/escape.go")), None);
    }

    #[test]
    fn test_output_path_without_output_dir() {
        let ctx = Context::default_for_dir(PathBuf::from("/project"));
        assert_eq!(
            ctx.output_path(Path::new("../shared/x.go")),
            Some(PathBuf::from("/project/../shared/x.go"))
        );
    }

    #[test]
    fn test_source_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("test.md"), "# Test").unwrap();
        std::fs::write(dir.path().join("other.txt"), "text").unwrap();

        let mut ctx = Context::default_for_dir(dir.path().to_path_buf());
        let files = ctx.source_files().unwrap();

        assert_eq!(files, vec![PathBuf::from("test.md")]);
    }

    #[test]
    fn test_expand_patterns_keeps_order() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("b.md", "");
        vfs.add_file("a.md", "");
        vfs.add_file("intro.md", "");

        let mut ctx = Context::default_for_dir(PathBuf::from("/project"))
            .with_file_cache(Arc::new(vfs));
        let files = ctx
            .expand_patterns(&["intro.md", "*.md", "missing.md"])
            .unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("intro.md"),
                PathBuf::from("a.md"),
                PathBuf::from("b.md"),
                PathBuf::from("missing.md"),
            ]
        );
    }

    #[test]
    fn test_existing_file_with_glob_characters_is_literal() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("notes[1].md", "");
        vfs.add_file("notes1.md", "");

        let mut ctx = Context::default_for_dir(PathBuf::from("/project"))
            .with_file_cache(Arc::new(vfs));
        let files = ctx.expand_patterns(&["notes[1].md"]).unwrap();

        assert_eq!(files, vec![PathBuf::from("notes[1].md")]);
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_unmatched_glob_is_reported() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("intro.md", "");

        let mut ctx = Context::default_for_dir(PathBuf::from("/project"))
            .with_file_cache(Arc::new(vfs));
        let files = ctx.expand_patterns(&["docs/*.md", "intro.md"]).unwrap();

        assert_eq!(files, vec![PathBuf::from("intro.md")]);
        assert_eq!(
            ctx.diagnostics,
            vec![Diagnostic::UnmatchedPattern {
                pattern: "docs/*.md".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let mut ctx = Context::default_for_dir(PathBuf::from("/project"))
            .with_file_cache(Arc::new(VirtualFS::new()));
        assert!(ctx.expand_patterns(&["[*.md"]).is_err());
    }
}
