//! Terminal output helpers.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning message.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a suppressed action in dry-run mode.
pub fn display_dry_run(message: &str) {
    println!("{} {}", style("[dry-run]").cyan(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_helpers() {
        // Visual verification tests - output goes to stdout/stderr
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_warning("test warning");
        display_dry_run("test dry-run");
    }
}
