//! Pure formatting functions for UI output.
//!
//! Everything the operator reads goes through here. Errors and warnings go to
//! stderr so they survive when stdout is piped.

use console::style;

use crate::warning::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("❌ ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Show the version transition a release will make.
pub fn display_version_change(current_tag: &str, next_tag: &str) {
    println!("\n{}", style("Version:").bold());
    println!("  From: {}", style(current_tag).red());
    println!("  To:   {}", style(next_tag).green());
}

/// Usage text printed when no command is given.
pub fn usage_text() -> String {
    [
        "Usage: gorr release <patch|minor|major|local> [args...]",
        "       gorr unrelease",
        "       gorr <goreleaser-command> [args...]",
        "  📤 Officially release on remote repository: gorr release patch",
        "  🧪 Create locally: gorr release patch --snapshot",
    ]
    .join("\n")
}

pub fn display_usage() {
    eprintln!("{}", usage_text());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_mode() {
        let usage = usage_text();
        assert!(usage.contains("release <patch|minor|major|local>"));
        assert!(usage.contains("unrelease"));
        assert!(usage.contains("--snapshot"));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_warning(&ReleaseWarning::UnsafeRollback);
        display_version_change("v1.2.3", "v1.2.4");
    }
}
