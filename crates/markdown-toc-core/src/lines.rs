use std::borrow::Cow;

/// Line-ending convention of a document.
///
/// Documents are processed with `\n` only and converted back on output, so a
/// file keeps the convention it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` if `\r\n` occurs anywhere in `contents`, otherwise `Lf`.
    pub fn detect(contents: &str) -> Self {
        if contents.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Rewrite `contents` to use `\n` line endings.
    pub fn normalize(self, contents: &str) -> Cow<'_, str> {
        match self {
            LineEnding::Lf => Cow::Borrowed(contents),
            LineEnding::CrLf => Cow::Owned(contents.replace("\r\n", "\n")),
        }
    }

    /// Expand `\n`-only text back into this convention.
    pub fn restore(self, normalized: String) -> String {
        match self {
            LineEnding::Lf => normalized,
            LineEnding::CrLf => normalized.replace('\n', "\r\n"),
        }
    }
}
