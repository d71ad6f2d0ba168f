use std::path::Path;

use log::debug;

use crate::diff::build_unified_diff;
use crate::error::{TocError, TocResult};
use crate::headings::{extract_headings, MaxDepth};
use crate::markdown::MarkdownAccess;
use crate::placeholder::insert_or_update;
use crate::render::render;
use crate::report::{Reporter, Severity};
use crate::validate::validate_document;

/// Entry point tying the TOC pipeline to document access and reporting.
#[derive(Debug)]
pub struct Toc<M, R> {
    markdown: M,
    reporter: R,
    max_depth: MaxDepth,
}

impl<M: MarkdownAccess, R: Reporter> Toc<M, R> {
    pub fn new(markdown: M, reporter: R) -> Self {
        Self {
            markdown,
            reporter,
            max_depth: MaxDepth::default(),
        }
    }

    pub fn set_max_depth(&mut self, max_depth: MaxDepth) {
        self.max_depth = max_depth;
    }

    pub fn max_depth(&self) -> MaxDepth {
        self.max_depth
    }

    /// Render the TOC for `contents` without touching any file.
    pub fn compute_toc(&self, contents: &str) -> String {
        render(&extract_headings(contents, self.max_depth))
    }

    /// Render the TOC for the document at `path`.
    pub fn dry_run(&self, path: &Path) -> TocResult<String> {
        let contents = self.read(path)?;
        Ok(self.compute_toc(&contents))
    }

    /// Insert or refresh the TOC of the document at `path`.
    pub fn apply_toc(&self, path: &Path) -> TocResult<()> {
        let contents = self.read(path)?;
        let updated = insert_or_update(&contents, self.max_depth)?;
        debug!("writing toc to {}", path.display());
        self.markdown
            .write(path, &updated)
            .map_err(|err| TocError::io(path, err))
    }

    /// Unified diff of what [`Toc::apply_toc`] would write; `None` when the
    /// TOC is already current.
    pub fn preview(&self, path: &Path) -> TocResult<Option<String>> {
        let contents = self.read(path)?;
        let updated = insert_or_update(&contents, self.max_depth)?;
        Ok(build_unified_diff(
            &contents,
            &updated,
            &path.to_string_lossy(),
        ))
    }

    /// Check the existing TOC of `path`; failures are explained through the
    /// reporter.
    pub fn validate(&self, path: &Path) -> TocResult<bool> {
        let contents = self.read(path)?;
        let outcome = validate_document(&contents, self.max_depth);
        debug!("validation of {}: {outcome:?}", path.display());

        match outcome.describe() {
            Some(report) => {
                self.reporter
                    .report(Severity::Error, &format!("{}: {report}", path.display()));
                Ok(false)
            }
            None => Ok(true),
        }
    }

    pub fn markdown(&self) -> &M {
        &self.markdown
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    fn read(&self, path: &Path) -> TocResult<String> {
        debug!("reading {}", path.display());
        self.markdown
            .read(path)
            .map_err(|err| TocError::io(path, err))
    }
}
