//! Transient user notices.
//!
//! The terminal equivalent of the web client's toast popups: one colored
//! line on stderr, never fatal.

use colored::Colorize;

/// Report a failure.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Report a success.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message.green());
}

/// Neutral status information.
pub fn info(message: &str) {
    eprintln!("{} {}", "·".dimmed(), message.dimmed());
}
