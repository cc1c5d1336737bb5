//! CLI module graph.

pub mod command;
pub mod config;
pub mod database;
pub mod output;
pub mod run;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Load the config named on the command line.
///
/// Without `--config`, `config.toml` is used if present and built-in
/// defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if default.exists() {
                Config::load(default)
            } else {
                let _ = dotenvy::dotenv();
                debug!("No config.toml found, using defaults");
                Ok(Config::default())
            }
        }
    }
}
