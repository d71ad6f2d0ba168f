use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Message shown whenever a TOC cannot be placed in a document.
pub const PLACEHOLDER_HELP: &str = "Could not find placeholder\n\
<!-- toc -->\n\
<!-- tocstop -->\n\
A toc update or insertion was not possible. Please make sure the placeholders are set.";

/// Which placement rule rejected the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderProblem {
    /// Start and stop marker share a single line.
    SingleLine,
    /// A start marker is never followed by a stop marker.
    MissingStop,
    /// A stop marker appears without a preceding start marker.
    MissingStart,
    /// A second start marker appears before the stop marker.
    RepeatedStart,
    /// No markers and no `##` heading to insert in front of.
    NoAnchorHeading,
}

impl fmt::Display for PlaceholderProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaceholderProblem::SingleLine => "start and stop markers share one line",
            PlaceholderProblem::MissingStop => "start marker without stop marker",
            PlaceholderProblem::MissingStart => "stop marker without start marker",
            PlaceholderProblem::RepeatedStart => "start marker repeated before stop marker",
            PlaceholderProblem::NoAnchorHeading => {
                "no markers and no level-2 heading to insert before"
            }
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", PLACEHOLDER_HELP)]
pub struct PlaceholderError {
    pub problem: PlaceholderProblem,
}

impl PlaceholderError {
    pub fn new(problem: PlaceholderProblem) -> Self {
        Self { problem }
    }
}

#[derive(Debug, Error)]
pub enum TocError {
    #[error(transparent)]
    Placeholder(#[from] PlaceholderError),

    #[error("i/o error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl TocError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type TocResult<T> = Result<T, TocError>;
