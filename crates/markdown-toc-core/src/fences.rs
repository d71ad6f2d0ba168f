//! Fenced code block detection shared by heading extraction and marker lookup.

const FENCE: &str = "```";

/// Mark every line that belongs to a closed fenced code block, fence lines
/// included.
///
/// A block opens on a line whose first non-blank characters are three
/// backticks plus an optional info string without backticks, and closes on the next line made of
/// three backticks alone. An opening fence that is never closed marks nothing.
pub(crate) fn fenced_lines<S: AsRef<str>>(lines: &[S]) -> Vec<bool> {
    let mut fenced = vec![false; lines.len()];
    let mut idx = 0usize;

    while idx < lines.len() {
        if !opens_fence(lines[idx].as_ref()) {
            idx += 1;
            continue;
        }

        let closing = lines[idx + 1..]
            .iter()
            .position(|line| closes_fence(line.as_ref()));

        match closing {
            Some(offset) => {
                let end = idx + 1 + offset;
                fenced[idx..=end].fill(true);
                idx = end + 1;
            }
            // Nothing after this point can close a fence either.
            None => break,
        }
    }

    fenced
}

fn opens_fence(line: &str) -> bool {
    match line.trim_start().strip_prefix(FENCE) {
        Some(info) => !info.contains('`'),
        None => false,
    }
}

fn closes_fence(line: &str) -> bool {
    line.trim() == FENCE
}
