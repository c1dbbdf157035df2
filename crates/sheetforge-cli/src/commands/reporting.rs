//! Human-readable printing shared by commands.

use colored::Colorize;
use sheetforge_spec::ValidationResult;

/// Prints validation errors and warnings, one per line.
pub(super) fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" ({})", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code,
            path.dimmed(),
            error.message
        );
    }
    for warning in &result.warnings {
        let path = warning
            .path
            .as_ref()
            .map(|p| format!(" ({})", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            path.dimmed(),
            warning.message
        );
    }
}
