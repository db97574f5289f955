// ============================================================================
// fluxbitc-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Section headers, key/value status lines and outcome messages for the CLI.
// Regular output is routed through the `log` facade at info level so that
// it shares a single writer with the rest of the logging. Failure messages
// go straight to stderr.
//
// KEY COMPONENTS:
// - print_section / print_status / print_processing: informational output
// - print_success: completion banner
// - print_failure / print_fatal: stderr output for failed runs
//
// Colors are disabled when NO_COLOR is set.

use console::style;
use log::info;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use unicode_width::UnicodeWidthStr;

/// Width that status labels are padded to.
const LABEL_WIDTH: usize = 15;

/// Indentation for key/value status lines.
const STATUS_INDENT: &str = "  ";

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Colors on stderr only make sense on an interactive terminal.
fn should_color_stderr() -> bool {
    should_use_color() && std::io::stderr().is_terminal()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Formats a status line with the label padded to a fixed display width.
#[must_use]
pub fn format_status(label: &str, value: &str) -> String {
    let padding = LABEL_WIDTH.saturating_sub(label.width()).max(1);
    format!("{STATUS_INDENT}{label}:{} {value}", " ".repeat(padding))
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    if should_use_color() && highlight {
        info!("{}", format_status(label, &value.bold().to_string()));
    } else {
        info!("{}", format_status(label, value));
    }
}

/// Print a processing step
pub fn print_processing(message: &str) {
    info!("");
    if should_use_color() {
        info!("» {}", style(message).bold());
    } else {
        info!("» {message}");
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    info!("");
    if should_use_color() {
        info!("✓ {}", message.green());
    } else {
        info!("✓ {message}");
    }
}

/// Print a failed-run message to stderr
pub fn print_failure(message: &str) {
    if should_color_stderr() {
        eprintln!("✗ {}", message.red().bold());
    } else {
        eprintln!("✗ {message}");
    }
}

/// Print a fatal error to stderr
pub fn print_fatal(message: &str) {
    if should_color_stderr() {
        eprintln!("{} {message}", "ERROR:".red().bold());
    } else {
        eprintln!("ERROR: {message}");
    }
}
