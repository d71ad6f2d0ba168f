use crate::anchors::create_link;
use crate::headings::Heading;

/// Indentation added per nesting level.
pub const INDENT: &str = "  ";

/// Render headings as a nested bullet list, one `\n`-terminated line each.
pub fn render(headings: &[Heading]) -> String {
    let mut output = String::new();
    for heading in headings {
        output.push_str(&INDENT.repeat(heading.level.saturating_sub(1)));
        output.push_str("- [");
        output.push_str(&heading.caption);
        output.push(']');
        output.push_str(&create_link(&heading.caption, Some(heading.counter)));
        output.push('\n');
    }
    output
}
