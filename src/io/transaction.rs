//! Queued output writes, executed with per-file isolation.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::diagnostics::Diagnostic;
use crate::errors::{LmtError, Result};

/// What executing an action did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New content was written.
    Written,
    /// The target already held this exact content and was left alone.
    Unchanged,
}

/// An action that can be executed as part of a transaction.
pub trait Action: std::fmt::Debug + Send + Sync {
    /// Returns the target file path.
    fn target(&self) -> &Path;

    /// Executes the action.
    fn execute(&self) -> Result<WriteOutcome>;

    /// Returns a description of this action.
    fn describe(&self) -> String;

    /// Returns the proposed new content, if any.
    fn proposed_content(&self) -> Option<&str> {
        None
    }
}

/// Replace a file's content, creating it and its parent directories if needed.
#[derive(Debug)]
pub struct WriteAction {
    /// Target file path.
    pub path: PathBuf,
    /// Content to write.
    pub content: String,
}

impl WriteAction {
    /// Creates a new Write action.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    fn is_current(&self) -> bool {
        fs::read(&self.path).is_ok_and(|existing| existing == self.content.as_bytes())
    }
}

impl Action for WriteAction {
    fn target(&self) -> &Path {
        &self.path
    }

    fn execute(&self) -> Result<WriteOutcome> {
        if self.is_current() {
            tracing::debug!("{} is up to date", self.path.display());
            return Ok(WriteOutcome::Unchanged);
        }

        let wrap = |source| LmtError::OutputWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
        atomic_write(&self.path, &self.content).map_err(wrap)?;
        Ok(WriteOutcome::Written)
    }

    fn describe(&self) -> String {
        format!("write {}", self.path.display())
    }

    fn proposed_content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

/// Result of executing a transaction.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Files that received new content.
    pub written: Vec<PathBuf>,
    /// Files whose content was already current.
    pub unchanged: Vec<PathBuf>,
    /// One diagnostic per action that failed.
    pub failed: Vec<Diagnostic>,
}

impl WriteReport {
    /// Number of actions that were attempted.
    pub fn attempted(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.failed.len()
    }

    /// Number of actions that left their target with the intended content.
    pub fn succeeded(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }

    /// False only if writes were attempted and every one of them failed.
    pub fn is_success(&self) -> bool {
        self.attempted() == 0 || self.succeeded() > 0
    }
}

/// A collection of actions executed one by one.
///
/// A failing action is recorded in the report and does not prevent the
/// remaining actions from running.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<Box<dyn Action>>,
}

impl Transaction {
    /// Creates a new empty transaction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Adds an action to the transaction.
    pub fn add(&mut self, action: impl Action + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Adds a write action.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.add(WriteAction::new(path, content));
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if there are no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns descriptions of all actions.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.describe()).collect()
    }

    /// Returns the target paths in execution order.
    pub fn targets(&self) -> Vec<&Path> {
        self.actions.iter().map(|a| a.target()).collect()
    }

    /// Returns the content queued for `path`, if any.
    pub fn proposed_content(&self, path: &Path) -> Option<&str> {
        self.actions
            .iter()
            .find(|a| a.target() == path)
            .and_then(|a| a.proposed_content())
    }

    /// Executes all actions.
    pub fn execute(&self) -> WriteReport {
        let mut report = WriteReport::default();

        for action in &self.actions {
            let target = action.target().to_path_buf();
            match action.execute() {
                Ok(WriteOutcome::Written) => {
                    tracing::debug!("Wrote {}", target.display());
                    report.written.push(target);
                }
                Ok(WriteOutcome::Unchanged) => report.unchanged.push(target),
                Err(e) => {
                    let message = match e {
                        LmtError::OutputWrite { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    report.failed.push(Diagnostic::OutputWrite {
                        path: target,
                        message,
                    });
                }
            }
        }

        report
    }
}

/// Counter for unique temp file names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes content to a file atomically using a temp file.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(".lmt-tmp-{}-{}", std::process::id(), counter));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}
