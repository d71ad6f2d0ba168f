//! Structural validation of an existing table of contents.
//!
//! Every entry between the markers is parsed back into caption, level and
//! link, checked on its own (link and indentation), and then matched against
//! the headings the document actually has.

use std::collections::HashMap;
use std::fmt::Write as _;

use log::debug;

use crate::anchors::create_link;
use crate::error::PlaceholderProblem;
use crate::headings::{extract_headings, CaptionCounter, Heading, MaxDepth};
use crate::lines::LineEnding;
use crate::placeholder::{locate, Placement};
use crate::render::INDENT;

/// One parsed TOC entry and the result of checking it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingValidation {
    /// `indent / 2 + 1`; a fractional value means the indentation is off.
    pub level: f64,
    /// Number of leading whitespace characters.
    pub indent: usize,
    pub caption: String,
    pub counter: usize,
    /// Link target including parentheses, when the entry has one.
    pub link: Option<String>,
    pub valid_link: bool,
    pub valid_level: bool,
    /// Set by the cross-check against live headings.
    pub valid_caption: Option<bool>,
}

impl HeadingValidation {
    pub fn is_valid(&self) -> bool {
        self.valid_link && self.valid_level && self.valid_caption == Some(true)
    }

    fn matches(&self, heading: &Heading) -> bool {
        heading.level as f64 == self.level
            && heading.caption == self.caption
            && heading.counter == self.counter
    }
}

/// Cross-check of a parsed TOC against the document headings.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub existing_headings_validation: Vec<HeadingValidation>,
    /// Captions of headings that have no entry in the TOC.
    pub missing_heading_toc: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        !self.existing_headings_validation.is_empty()
            && self
                .existing_headings_validation
                .iter()
                .all(HeadingValidation::is_valid)
            && self.missing_heading_toc.is_empty()
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// No TOC markers at all.
    Missing,
    /// Markers exist but cannot be paired.
    Malformed(PlaceholderProblem),
    /// Marker pair without any entry between.
    Empty,
    Checked(Validation),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        match self {
            ValidationOutcome::Checked(validation) => validation.is_valid(),
            _ => false,
        }
    }

    /// Human-readable explanation of a failed validation; `None` when valid.
    pub fn describe(&self) -> Option<String> {
        match self {
            ValidationOutcome::Missing => Some(
                "no table of contents found: add the <!-- toc --> and <!-- tocstop --> placeholders or run `insert`"
                    .to_string(),
            ),
            ValidationOutcome::Malformed(problem) => Some(format!(
                "table of contents placeholders are malformed: {problem}"
            )),
            ValidationOutcome::Empty => Some("table of contents is empty".to_string()),
            ValidationOutcome::Checked(validation) if validation.is_valid() => None,
            ValidationOutcome::Checked(validation) => Some(describe_validation(validation)),
        }
    }
}

fn describe_validation(validation: &Validation) -> String {
    let mut report = String::from("table of contents is outdated:");

    for entry in &validation.existing_headings_validation {
        match &entry.link {
            None => {
                let _ = write!(report, "\n  missing link for entry '{}'", entry.caption);
            }
            Some(link) if !entry.valid_link => {
                let _ = write!(
                    report,
                    "\n  invalid link {link} for entry '{}', expected {}",
                    entry.caption,
                    create_link(&entry.caption, Some(entry.counter))
                );
            }
            Some(_) => {}
        }
        if !entry.valid_level {
            let _ = write!(
                report,
                "\n  invalid indentation of {} for entry '{}'",
                entry.indent, entry.caption
            );
        }
        if entry.valid_level && entry.valid_caption == Some(false) {
            let _ = write!(
                report,
                "\n  entry '{}' at level {} does not match any heading",
                entry.caption, entry.level
            );
        }
    }

    for caption in &validation.missing_heading_toc {
        let _ = write!(report, "\n  missing entry for heading '{caption}'");
    }

    report
}

/// Parse the lines between the markers into unchecked-against-headings
/// entries. Blank lines are skipped.
pub fn parse_toc<S: AsRef<str>>(lines: &[S]) -> Vec<HeadingValidation> {
    let mut counters = CaptionCounter::default();

    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (indent, tabbed, rest) = split_indent(line);
            let (caption, link) = split_entry(rest);
            let counter = counters.next(&caption);
            let unit = INDENT.len();
            let valid_link = link.as_deref() == Some(create_link(&caption, Some(counter)).as_str());

            HeadingValidation {
                level: indent as f64 / unit as f64 + 1.0,
                indent,
                valid_level: !tabbed && indent % unit == 0,
                caption,
                counter,
                link,
                valid_link,
                valid_caption: None,
            }
        })
        .collect()
}

/// Leading whitespace width, whether it contains a tab, and the rest of
/// the line. Entries are indented with spaces only.
fn split_indent(line: &str) -> (usize, bool, &str) {
    let rest = line.trim_start_matches([' ', '\t']);
    let leading = &line[..line.len() - rest.len()];
    (leading.len(), leading.contains('\t'), rest)
}

/// Split `- [caption](link)` into caption and link. Lines without a bullet
/// keep their whole text as caption and have no link.
fn split_entry(rest: &str) -> (String, Option<String>) {
    let rest = rest.trim_end();
    let body = match rest.strip_prefix(['-', '*', '+']) {
        Some(after) if after.starts_with(char::is_whitespace) => after.trim_start(),
        _ => return (rest.to_string(), None),
    };

    let Some(inner) = body.strip_prefix('[') else {
        return (body.to_string(), None);
    };

    if inner.ends_with(')') {
        if let Some(split) = inner.rfind("](") {
            return (
                inner[..split].to_string(),
                Some(inner[split + 1..].to_string()),
            );
        }
    }

    let caption = inner.strip_suffix(']').unwrap_or(inner);
    (caption.to_string(), None)
}

/// Mark each entry against the live headings and list uncovered headings.
pub fn cross_check(mut entries: Vec<HeadingValidation>, headings: &[Heading]) -> Validation {
    for entry in &mut entries {
        entry.valid_caption = Some(headings.iter().any(|heading| entry.matches(heading)));
    }

    let mut listed: HashMap<&str, usize> = HashMap::new();
    for entry in &entries {
        *listed.entry(entry.caption.as_str()).or_default() += 1;
    }

    let mut missing = Vec::new();
    for heading in headings {
        match listed.get_mut(heading.caption.as_str()) {
            Some(remaining) if *remaining > 0 => *remaining -= 1,
            _ => missing.push(heading.caption.clone()),
        }
    }

    Validation {
        existing_headings_validation: entries,
        missing_heading_toc: missing,
    }
}

/// Validate the TOC of `contents` against its headings.
pub fn validate_document(contents: &str, max_depth: MaxDepth) -> ValidationOutcome {
    let normalized = LineEnding::detect(contents).normalize(contents);
    let lines: Vec<&str> = normalized.split('\n').collect();

    let block = match locate(&lines) {
        Ok(Placement::Update(block)) => block,
        Ok(Placement::Insert { .. }) => return ValidationOutcome::Missing,
        Err(err) if err.problem == PlaceholderProblem::NoAnchorHeading => {
            return ValidationOutcome::Missing
        }
        Err(err) => return ValidationOutcome::Malformed(err.problem),
    };

    let entries = parse_toc(block.inner(&lines));
    if entries.is_empty() {
        return ValidationOutcome::Empty;
    }

    let headings = extract_headings(&normalized, max_depth);
    let validation = cross_check(entries, &headings);
    debug!(
        "validated {} toc entries against {} heading(s), {} missing",
        validation.existing_headings_validation.len(),
        headings.len(),
        validation.missing_heading_toc.len()
    );
    ValidationOutcome::Checked(validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_entries() {
        assert_eq!(
            split_entry("- [Heading 1](#heading-1)"),
            ("Heading 1".to_string(), Some("(#heading-1)".to_string()))
        );
        assert_eq!(
            split_entry("* [Call foo() now](#call-foo-now)  "),
            ("Call foo() now".to_string(), Some("(#call-foo-now)".to_string()))
        );
        assert_eq!(
            split_entry("- [`check [PATHS]`](#check-paths)"),
            ("`check [PATHS]`".to_string(), Some("(#check-paths)".to_string()))
        );
        assert_eq!(
            split_entry("- [Sub-Sub-Heading 1]"),
            ("Sub-Sub-Heading 1".to_string(), None)
        );
        assert_eq!(split_entry("plain text"), ("plain text".to_string(), None));
    }

    #[test]
    fn measures_indentation() {
        assert_eq!(split_indent("    - x"), (4, false, "- x"));
        assert_eq!(split_indent("\t- x"), (1, true, "- x"));
        assert_eq!(split_indent(" \t - x"), (3, true, "- x"));
        assert_eq!(split_indent("- x"), (0, false, "- x"));
    }

    #[test]
    fn tab_indentation_is_invalid() {
        let entries = parse_toc(&["- [A](#a)", "\t\t- [B](#b)"]);
        assert!(entries[0].valid_level);
        assert!(!entries[1].valid_level);
        assert!(!entries[1].is_valid());
    }

    #[test]
    fn keeps_fractional_levels() {
        let entries = parse_toc(&["- [A](#a)", "   - [B](#b)", "    - [C](#c)"]);
        let levels: Vec<f64> = entries.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1.0, 2.5, 3.0]);
        assert!(entries[0].valid_level);
        assert!(!entries[1].valid_level);
        assert!(entries[2].valid_level);
    }

    #[test]
    fn derives_counters_for_links() {
        let entries = parse_toc(&[
            "- [Heading](#heading)",
            "",
            "- [heading](#heading-1)",
            "- [Heading](#heading-1)",
        ]);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].valid_link);
        assert!(entries[1].valid_link);
        assert_eq!(entries[2].counter, 2);
        assert!(!entries[2].valid_link);
    }

    #[test]
    fn missing_headings_respect_multiplicity() {
        let headings = extract_headings("## Heading\n## Heading\n## Heading\n", MaxDepth::default());
        let entries = parse_toc(&["- [Heading](#heading)", "- [Heading](#heading-1)"]);
        let validation = cross_check(entries, &headings);
        assert_eq!(validation.missing_heading_toc, vec!["Heading".to_string()]);
        assert!(!validation.is_valid());
    }

    #[test]
    fn describes_each_problem() {
        let headings = extract_headings("## A\n### B\n## C\n", MaxDepth::default());
        let entries = parse_toc(&["- [A](#wrong)", "   - [B](#b)", "- [Gone](#gone)"]);
        let outcome = ValidationOutcome::Checked(cross_check(entries, &headings));
        let report = outcome.describe().expect("invalid toc has a report");

        assert!(report.starts_with("table of contents is outdated:"));
        assert!(report.contains("invalid link (#wrong) for entry 'A', expected (#a)"));
        assert!(report.contains("invalid indentation of 3 for entry 'B'"));
        assert!(report.contains("entry 'Gone' at level 1 does not match any heading"));
        assert!(report.contains("missing entry for heading 'C'"));
    }
}
