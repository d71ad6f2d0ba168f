//! User-facing progress and failure messages.
//!
//! Library code never prints directly; it hands messages to a [`Reporter`]
//! so the binary can colour them and tests can record them.

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Command output such as a rendered toc or diff, printed verbatim.
    Plain,
    Info,
    Success,
    Warning,
    Error,
}

pub trait Reporter {
    fn report(&self, severity: Severity, message: &str);
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn report(&self, severity: Severity, message: &str) {
        (**self).report(severity, message);
    }
}
