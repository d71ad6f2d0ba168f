//! Locating and rewriting the `<!-- toc -->` / `<!-- tocstop -->` region.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use crate::error::{PlaceholderError, PlaceholderProblem};
use crate::fences::fenced_lines;
use crate::headings::{extract_headings, parse_heading_line, MaxDepth};
use crate::lines::LineEnding;
use crate::render::render;

pub const TOC_START: &str = "<!-- toc -->";
pub const TOC_STOP: &str = "<!-- tocstop -->";

static START_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<!--\s*toc\s*-->$").expect("valid start marker regex"));
static STOP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<!--\s*tocstop\s*-->$").expect("valid stop marker regex")
});
static LEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<!--\s*toc(?:stop)?\s*-->").expect("valid marker prefix regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    Stop,
    /// A line that opens with a marker but is not a marker on its own,
    /// e.g. `<!-- toc --><!-- tocstop -->`.
    Inline,
}

/// Line indices (0-based) of a matched start/stop marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocBlock {
    pub start_line: usize,
    pub end_line: usize,
}

impl TocBlock {
    /// The lines strictly between the two markers.
    pub fn inner<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> &'a [S] {
        &lines[self.start_line + 1..self.end_line]
    }
}

/// Where a freshly rendered TOC goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Replace an existing marker pair and its contents.
    Update(TocBlock),
    /// No markers yet: insert a new block in front of this line.
    Insert { before_line: usize },
}

fn classify(line: &str) -> Option<Marker> {
    let trimmed = line.trim();
    if START_MARKER.is_match(trimmed) {
        Some(Marker::Start)
    } else if STOP_MARKER.is_match(trimmed) {
        Some(Marker::Stop)
    } else if LEADING_MARKER.is_match(trimmed) {
        Some(Marker::Inline)
    } else {
        None
    }
}

/// Decide where the TOC belongs in `\n`-split `lines`.
///
/// Markers inside fenced code blocks are ignored. The first marker must be a
/// start marker immediately paired with a stop marker; a document without any
/// marker gets a new block before its first `##` heading.
pub fn locate<S: AsRef<str>>(lines: &[S]) -> Result<Placement, PlaceholderError> {
    let fenced = fenced_lines(lines);
    let mut markers = lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| !fenced[*idx])
        .filter_map(|(idx, line)| classify(line.as_ref()).map(|marker| (idx, marker)));

    let first = markers.next();
    let second = markers.next();
    trace!("first markers: {first:?}, {second:?}");

    let problem = match (first, second) {
        (Some((start_line, Marker::Start)), Some((end_line, Marker::Stop))) => {
            return Ok(Placement::Update(TocBlock {
                start_line,
                end_line,
            }));
        }
        (None, _) => {
            return lines
                .iter()
                .enumerate()
                .filter(|(idx, _)| !fenced[*idx])
                .find(|(_, line)| matches!(parse_heading_line(line.as_ref()), Some((2, _))))
                .map(|(before_line, _)| Placement::Insert { before_line })
                .ok_or_else(|| PlaceholderError::new(PlaceholderProblem::NoAnchorHeading));
        }
        (Some((_, Marker::Inline)), _) | (Some((_, Marker::Start)), Some((_, Marker::Inline))) => {
            PlaceholderProblem::SingleLine
        }
        (Some((_, Marker::Start)), Some((_, Marker::Start))) => PlaceholderProblem::RepeatedStart,
        (Some((_, Marker::Start)), None) => PlaceholderProblem::MissingStop,
        (Some((_, Marker::Stop)), _) => PlaceholderProblem::MissingStart,
    };

    debug!("cannot place toc: {problem}");
    Err(PlaceholderError::new(problem))
}

/// The complete marker block for a rendered TOC, `\n`-terminated.
pub fn render_block(toc: &str) -> String {
    let mut block = String::with_capacity(toc.len() + TOC_START.len() + TOC_STOP.len() + 4);
    block.push_str(TOC_START);
    block.push_str("\n\n");
    if !toc.is_empty() {
        block.push_str(toc);
        block.push('\n');
    }
    block.push_str(TOC_STOP);
    block.push('\n');
    block
}

/// Insert or refresh the TOC of `contents`, keeping its line endings.
pub fn insert_or_update(contents: &str, max_depth: MaxDepth) -> Result<String, PlaceholderError> {
    let ending = LineEnding::detect(contents);
    let normalized = ending.normalize(contents);
    let lines: Vec<&str> = normalized.split('\n').collect();

    let placement = locate(&lines)?;
    let block = render_block(&render(&extract_headings(&normalized, max_depth)));

    let (head, tail, separator) = match placement {
        Placement::Update(existing) => (existing.start_line, existing.end_line + 1, ""),
        Placement::Insert { before_line } => (before_line, before_line, "\n"),
    };
    debug!("writing toc block over lines {head}..{tail}");

    let mut output = String::with_capacity(normalized.len() + block.len() + 1);
    for line in &lines[..head] {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&block);
    output.push_str(separator);
    output.push_str(&lines[tail..].join("\n"));

    Ok(ending.restore(output))
}
