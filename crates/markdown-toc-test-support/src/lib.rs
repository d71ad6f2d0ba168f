//! Shared test harness utilities for markdown-toc crates.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use markdown_toc_core::{MarkdownAccess, Reporter, Severity};

/// Join fixture lines with `\n`, without a trailing terminator after the
/// last entry.
pub fn to_markdown(lines: &[&str]) -> String {
    lines.join("\n")
}

/// In-memory documents keyed by path. Records every write.
#[derive(Debug, Default)]
pub struct MemoryMarkdown {
    files: RefCell<HashMap<PathBuf, String>>,
    writes: Cell<usize>,
}

impl MemoryMarkdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let markdown = Self::new();
        markdown.insert(path, contents);
        markdown
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files
            .borrow_mut()
            .insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl MarkdownAccess for MemoryMarkdown {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such document: {}", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.insert(path, contents);
        Ok(())
    }
}

/// Collects reported messages instead of printing them.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<(Severity, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.borrow().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(recorded, _)| *recorded == severity)
            .count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.messages
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}
