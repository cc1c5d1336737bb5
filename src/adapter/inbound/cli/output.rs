//! Astral-style CLI output formatting.
//!
//! Colored symbols for people, one JSON object per line for scripts
//! (`--json`), and nothing but errors in quiet mode.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("header", json!({ "app": "learnhub", "version": version }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("{} {}", "learnhub".bold(), version.dimmed());
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();
    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {:<16} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Warnings are shown even in quiet mode.
pub fn warning(message: &str) {
    if read_config().json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({ "type": "error", "payload": { "message": message } })
        );
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

pub fn section(title: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!();
    println!("{}", title.bold());
}

pub fn note(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a braille spinner. Hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    let style = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("spinner_success", json!({ "message": message }));
        pb.finish_and_clear();
        return;
    }
    if config.quiet {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {}", "✓".green(), message));
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    if read_config().json {
        emit_json_line("spinner_fail", json!({ "message": message }));
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {}", "×".red(), message));
}

/// Emit a JSON value directly.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}
