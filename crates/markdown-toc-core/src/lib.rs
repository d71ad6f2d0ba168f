//! Table-of-contents generation for markdown documents.
//!
//! Headings are extracted from the document (fenced code blocks excluded),
//! rendered as a nested bullet list with GitHub-style anchors, and written
//! between the `<!-- toc -->` / `<!-- tocstop -->` placeholders. The same
//! pipeline validates a TOC that is already present.

pub mod anchors;
pub mod diff;
pub mod error;
mod fences;
pub mod headings;
pub mod lines;
pub mod markdown;
pub mod placeholder;
pub mod render;
pub mod report;
pub mod toc;
pub mod validate;

pub use anchors::{create_link, slugify};
pub use error::{PlaceholderError, PlaceholderProblem, TocError, TocResult};
pub use headings::{extract_headings, strip_code_blocks, Heading, MaxDepth};
pub use lines::LineEnding;
pub use markdown::{FsMarkdown, MarkdownAccess};
pub use placeholder::{insert_or_update, TOC_START, TOC_STOP};
pub use render::render;
pub use report::{Reporter, Severity};
pub use toc::Toc;
pub use validate::{validate_document, HeadingValidation, Validation, ValidationOutcome};
