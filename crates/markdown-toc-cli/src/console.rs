use colored::Colorize;
use markdown_toc_core::{Reporter, Severity};

/// Prints status lines to the terminal, coloured by severity.
///
/// Errors and warnings go to stderr, everything else to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Enable or disable ANSI colours for the whole process. Without an
    /// explicit call `colored` follows `NO_COLOR` and terminal detection.
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Plain => println!("{message}"),
            Severity::Info => println!("{}", message.blue()),
            Severity::Success => println!("{}", message.green()),
            Severity::Warning => eprintln!("{}", message.yellow()),
            Severity::Error => eprintln!("{}", message.red()),
        }
    }
}
