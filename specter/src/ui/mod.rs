// specter/src/ui/mod.rs
//! Terminal output helpers: colored status messages and the replacement
//! summary. Everything here writes to stderr; stdout carries the payload.

pub mod summary;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Prints an informational message to stderr, colored when attached to a
/// terminal.
pub fn info_msg(msg: impl AsRef<str>) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", msg.as_ref().green());
    } else {
        eprintln!("{}", msg.as_ref());
    }
}

/// Prints a warning message to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", msg.as_ref().yellow());
    } else {
        eprintln!("{}", msg.as_ref());
    }
}

/// Prints an error message to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", msg.as_ref().red());
    } else {
        eprintln!("{}", msg.as_ref());
    }
}
