//! Colored output helpers for the CLI.
//!
//! Honors NO_COLOR and FORCE_COLOR; the colored crate already disables
//! styling when output is piped.

use colored::{ColoredString, Colorize};

/// Initialize color support based on environment.
/// Call once at startup.
pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

// === Error Output ===

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

// === Status Output ===

pub fn status_pass() -> ColoredString {
    "✓".green()
}

pub fn banner_ok(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} OK", phase).green().bold(),
        "===".dimmed()
    )
}

pub fn banner_fail(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} FAILED", phase).red().bold(),
        "===".dimmed()
    )
}
