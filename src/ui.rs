//! Terminal output helpers

#![allow(dead_code)]

use colored::Colorize;

/// Which side of a change a highlighted fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// The old-side value being removed or replaced.
    Removed,
    /// The new-side value being added.
    Added,
}

/// Color-code a fragment of a change line.
///
/// `colored` handles the plain-text fallback when the output is not a
/// terminal or coloring is disabled.
pub fn highlight(variant: Highlight, text: &str) -> String {
    match variant {
        Highlight::Removed => text.red().to_string(),
        Highlight::Added => text.green().to_string(),
    }
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_plain_when_color_disabled() {
        colored::control::set_override(false);
        assert_eq!(highlight(Highlight::Removed, "old"), "old");
        assert_eq!(highlight(Highlight::Added, "new"), "new");
    }
}
