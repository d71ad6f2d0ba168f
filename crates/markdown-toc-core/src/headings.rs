//! Heading extraction for TOC generation.
//!
//! Only ATX headings with two to six `#` marks take part: the single-`#`
//! document title never appears in the table of contents, and `##` becomes
//! level 1. Headings inside fenced code blocks are ignored.

use std::collections::HashMap;

use log::{debug, trace};

use crate::fences::fenced_lines;

const MIN_MARKS: usize = 2;
const MAX_MARKS: usize = 6;
const MAX_SCANNED_MARKS: usize = 7;

/// A heading eligible for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Depth below the document title: `##` is 1, `###` is 2, ...
    pub level: usize,
    /// Trimmed heading text, inline markup preserved.
    pub caption: String,
    /// Number of earlier headings with the same caption, ignoring case.
    pub counter: usize,
}

/// Deepest heading mark count that is still listed.
///
/// Values from 2 to 7 restrict the listed marks to `##` up to that many
/// `#`; anything else leaves the natural `##`..`######` range in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDepth(u8);

impl MaxDepth {
    pub const DEFAULT: MaxDepth = MaxDepth(6);

    pub const fn new(depth: u8) -> Self {
        MaxDepth(depth)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether a heading with `marks` leading `#` characters is listed.
    pub fn allows(self, marks: usize) -> bool {
        if !(MIN_MARKS..=MAX_MARKS).contains(&marks) {
            return false;
        }
        match self.0 {
            depth @ 2..=7 => marks <= usize::from(depth),
            _ => true,
        }
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        MaxDepth::DEFAULT
    }
}

impl From<u8> for MaxDepth {
    fn from(depth: u8) -> Self {
        MaxDepth(depth)
    }
}

/// Assigns duplicate counters to captions in document order.
#[derive(Debug, Default)]
pub(crate) struct CaptionCounter {
    seen: HashMap<String, usize>,
}

impl CaptionCounter {
    /// Returns how often `caption` was seen before, then records it.
    pub(crate) fn next(&mut self, caption: &str) -> usize {
        let slot = self.seen.entry(caption.to_lowercase()).or_insert(0);
        let counter = *slot;
        *slot += 1;
        counter
    }
}

/// Remove fenced code blocks and trim every remaining line.
pub fn strip_code_blocks(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let fenced = fenced_lines(&lines);

    lines
        .iter()
        .zip(fenced)
        .filter(|(_, in_block)| !in_block)
        .map(|(line, _)| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract TOC headings from raw markdown.
pub fn extract_headings(content: &str, max_depth: MaxDepth) -> Vec<Heading> {
    let cleaned = strip_code_blocks(content);
    let mut counters = CaptionCounter::default();
    let mut headings = Vec::new();

    for line in cleaned.lines() {
        let Some((marks, caption)) = parse_heading_line(line) else {
            continue;
        };

        if !max_depth.allows(marks) {
            trace!("skipping heading '{caption}' with {marks} marks");
            continue;
        }

        headings.push(Heading {
            level: marks - 1,
            caption: caption.to_string(),
            counter: counters.next(caption),
        });
    }

    debug!(
        "extracted {} heading(s) with max depth {}",
        headings.len(),
        max_depth.get()
    );
    headings
}

/// Split a heading line into its mark count and trimmed caption.
///
/// Accepts two to seven `#` marks followed by whitespace and non-empty text.
/// Depth filtering is left to the caller.
pub(crate) fn parse_heading_line(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_start();
    let marks = line.chars().take_while(|ch| *ch == '#').count();
    if !(MIN_MARKS..=MAX_SCANNED_MARKS).contains(&marks) {
        return None;
    }

    let rest = &line[marks..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let caption = rest.trim();
    if caption.is_empty() {
        return None;
    }

    Some((marks, caption))
}
