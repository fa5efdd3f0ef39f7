//! Terminal output formatting utilities.

use colored::Colorize;

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print an info message to stderr.
pub fn info(msg: &str) {
    eprintln!("{} {}", "→".blue(), msg);
}

/// Print machine-readable output for piping (records go here).
pub fn essential(msg: &str) {
    println!("{msg}");
}
