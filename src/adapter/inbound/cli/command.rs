//! Command-line interface definitions.
//!
//! Defines the CLI structure for the learnhub server using `clap`: serving
//! the API, managing the database and inspecting configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Learning-management backend: courses, enrollments and an AI tutor
#[derive(Parser, Debug)]
#[command(name = "learnhub")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the learnhub CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply migrations and serve the HTTP API
    Serve(ServeArgs),

    /// Apply pending database migrations
    Migrate(ConfigPathArg),

    /// Load demo users, courses and pathways (safe to repeat)
    Seed(ConfigPathArg),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `learnhub config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument for commands that read a configuration file.
#[derive(Parser, Debug, Default)]
pub struct ConfigPathArg {
    /// Path to the configuration file [default: config.toml if present].
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Listen address, overriding `[server]` (e.g. 0.0.0.0:8080).
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the template.
    #[arg(default_value = "config.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(short, long)]
    pub force: bool,
}
