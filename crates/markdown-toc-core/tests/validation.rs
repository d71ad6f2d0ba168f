use std::path::Path;

use markdown_toc_core::{validate_document, MaxDepth, Severity, Toc, ValidationOutcome};
use markdown_toc_test_support::{to_markdown, MemoryMarkdown, RecordingReporter};
use pretty_assertions::assert_eq;

const DOC: &str = "test.md";

/// Validate `lines` through the facade, returning the verdict and the
/// recorded reports.
fn check(lines: &[&str]) -> (bool, Vec<(Severity, String)>) {
    let toc = Toc::new(
        MemoryMarkdown::with_file(DOC, to_markdown(lines)),
        RecordingReporter::new(),
    );
    let valid = toc.validate(Path::new(DOC)).expect("document is readable");
    (valid, toc.reporter().messages())
}

fn assert_single_error(messages: &[(Severity, String)], needle: &str) {
    assert_eq!(messages.len(), 1, "messages: {messages:?}");
    let (severity, message) = &messages[0];
    assert_eq!(*severity, Severity::Error);
    assert!(
        message.contains(needle),
        "expected {needle:?} in report:\n{message}"
    );
}

#[test]
fn accepts_current_toc() {
    let (valid, messages) = check(&[
        "<!-- toc -->",
        "- [Heading 1](#heading-1)",
        "  - [Sub-Heading 1](#sub-heading-1)",
        "    - [Sub-Sub-Heading 1](#sub-sub-heading-1)",
        "- [Heading 2](#heading-2)",
        "<!-- tocstop -->",
        "## Heading 1",
        "### Sub-Heading 1",
        "#### Sub-Sub-Heading 1",
        "## Heading 2",
    ]);

    assert!(valid);
    assert!(messages.is_empty());
}

#[test]
fn reports_missing_toc() {
    let (valid, messages) = check(&[
        "## Heading 1",
        "### Sub-Heading 1",
        "#### Sub-Sub-Heading 1",
        "## Heading 2",
    ]);

    assert!(!valid);
    assert_single_error(&messages, "test.md: no table of contents found");
}

#[test]
fn reports_missing_entry() {
    let (valid, messages) = check(&[
        "<!-- toc -->",
        "- [Heading 1](#heading-1)",
        "  - [Sub-Heading 1](#sub-heading-1)",
        "    - [Sub-Sub-Heading 1](#sub-sub-heading-1)",
        "<!-- tocstop -->",
        "## Heading 1",
        "### Sub-Heading 1",
        "#### Sub-Sub-Heading 1",
        "## Heading 2",
    ]);

    assert!(!valid);
    assert_single_error(&messages, "missing entry for heading 'Heading 2'");
}

#[test]
fn reports_entry_for_deleted_section() {
    let (valid, messages) = check(&[
        "<!-- toc -->",
        "- [Heading 1](#heading-1)",
        "  - [Sub-Heading 1](#sub-heading-1)",
        "    - [Sub-Sub-Heading 1](#sub-sub-heading-1)",
        "- [Heading 2](#heading-2)",
        "<!-- tocstop -->",
        "## Heading 1",
        "### Sub-Heading 1",
        "#### Sub-Sub-Heading 1",
    ]);

    assert!(!valid);
    assert_single_error(&messages, "entry 'Heading 2' at level 1 does not match any heading");
}

#[test]
fn reports_missing_link() {
    let (valid, messages) = check(&[
        "<!-- toc -->",
        "- [Heading 1](#heading-1)",
        "  - [Sub-Heading 1](#sub-heading-1)",
        "    - [Sub-Sub-Heading 1]",
        "<!-- tocstop -->",
        "## Heading 1",
        "### Sub-Heading 1",
        "#### Sub-Sub-Heading 1",
    ]);

    assert!(!valid);
    assert_single_error(&messages, "missing link for entry 'Sub-Sub-Heading 1'");
}

#[test]
fn reports_wrong_indentation() {
    let (valid, messages) = check(&[
        "<!-- toc -->",
        "- [Heading 1](#heading-1)",
        "  - [Sub-Heading 1](#sub-heading-1)",
        "      - [Sub-Sub-Heading 1](#sub-sub-heading-1)",
        "<!-- tocstop -->",
        "## Heading 1",
        "### Sub-Heading 1",
        "#### Sub-Sub-Heading 1",
    ]);

    assert!(!valid);
    assert_single_error(
        &messages,
        "entry 'Sub-Sub-Heading 1' at level 4 does not match any heading",
    );
}

#[test]
fn reports_empty_and_malformed_blocks() {
    let (valid, messages) = check(&["<!-- toc -->", "", "<!-- tocstop -->", "## A"]);
    assert!(!valid);
    assert_single_error(&messages, "table of contents is empty");

    let (valid, messages) = check(&["<!-- toc --><!-- tocstop -->", "## A"]);
    assert!(!valid);
    assert_single_error(&messages, "start and stop markers share one line");
}

#[test]
fn duplicate_headings_need_one_entry_each() {
    let contents = to_markdown(&[
        "<!-- toc -->",
        "- [Heading](#heading)",
        "- [Heading](#heading-1)",
        "<!-- tocstop -->",
        "## Heading",
        "## Heading",
        "## Heading",
    ]);

    let ValidationOutcome::Checked(validation) = validate_document(&contents, MaxDepth::default())
    else {
        panic!("expected a parsed toc");
    };

    assert!(validation
        .existing_headings_validation
        .iter()
        .all(|entry| entry.is_valid()));
    assert_eq!(validation.missing_heading_toc, vec!["Heading".to_string()]);
    assert!(!validation.is_valid());
}

#[test]
fn counters_follow_case_insensitive_captions() {
    let contents = to_markdown(&[
        "<!-- toc -->",
        "- [Setup](#setup)",
        "  - [setup](#setup-1)",
        "<!-- tocstop -->",
        "## Setup",
        "### setup",
    ]);

    let outcome = validate_document(&contents, MaxDepth::default());
    assert!(outcome.is_valid(), "{outcome:?}");
}

#[test]
fn respects_max_depth_when_checking() {
    let contents = to_markdown(&[
        "<!-- toc -->",
        "- [One](#one)",
        "<!-- tocstop -->",
        "## One",
        "### Two",
    ]);

    assert!(!validate_document(&contents, MaxDepth::default()).is_valid());
    assert!(validate_document(&contents, MaxDepth::new(2)).is_valid());
}
