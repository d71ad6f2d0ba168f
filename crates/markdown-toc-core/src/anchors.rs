/// Convert a heading caption into a GitHub-style anchor slug.
///
/// The caption is lowercased, every run of whitespace and underscores becomes
/// a single `-`, and anything outside `[a-z0-9-]` is dropped. Existing hyphens
/// are kept as they are.
pub fn slugify(caption: &str) -> String {
    let mut slug = String::with_capacity(caption.len());
    let mut in_gap = false;

    for ch in caption.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '_' {
            if !in_gap {
                slug.push('-');
                in_gap = true;
            }
            continue;
        }

        in_gap = false;
        if ch.is_ascii_alphanumeric() || ch == '-' {
            slug.push(ch);
        }
    }

    slug
}

/// Build the `(#anchor)` link target for a caption, suffixed with the
/// duplicate counter when it is non-zero.
pub fn create_link(caption: &str, counter: Option<usize>) -> String {
    match counter {
        Some(counter) if counter > 0 => format!("(#{}-{counter})", slugify(caption)),
        _ => format!("(#{})", slugify(caption)),
    }
}
