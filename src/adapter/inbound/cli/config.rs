//! Handler for the `config` command group.

use std::fs;

use crate::adapter::inbound::cli::command::{ConfigInitArgs, ConfigPathArg};
use crate::adapter::inbound::cli::{load_config, output, DEFAULT_CONFIG};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::llm::LlmProvider;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(args: &ConfigInitArgs) -> Result<()> {
    let path = &args.path;
    if path.exists() && !args.force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Optionally set OPENAI_API_KEY or ANTHROPIC_API_KEY");
    output::note(&format!("3. Run: learnhub serve -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(args: &ConfigPathArg) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&config)?);
        return Ok(());
    }

    output::section("Server");
    output::field("Bind", config.server.bind_addr());
    output::field(
        "CORS origins",
        if config.server.cors_origins.is_empty() {
            "*".to_string()
        } else {
            config.server.cors_origins.join(", ")
        },
    );

    output::section("Database");
    output::field("Path", &config.database.path);
    output::field("Pool size", config.database.pool_size);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", format!("{:?}", config.logging.format).to_lowercase());

    output::section("Auth");
    output::field("Session TTL", format!("{}h", config.auth.session_ttl_hours));
    output::field("Reset TTL", format!("{}m", config.auth.reset_ttl_minutes));
    output::field("Min password", config.auth.min_password_length);

    output::section("Tutor");
    output::field("History window", config.tutor.history_window);
    output::field("Max question", config.tutor.max_question_length);
    if config.llm.enabled {
        let (model, temperature, max_tokens) = config.llm.active();
        output::field("Provider", config.llm.provider);
        output::field("Model", model);
        output::field("Temperature", temperature);
        output::field("Max tokens", max_tokens);
        if !api_key_present(config.llm.provider) {
            output::warning("API key not set; answers will use templates");
        }
    } else {
        output::field("Provider", "templates only");
    }
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(args: &ConfigPathArg) -> Result<()> {
    load_config(args.config.as_deref())?;
    let shown = args
        .config
        .as_ref()
        .map_or_else(|| DEFAULT_CONFIG.to_string(), |p| p.display().to_string());
    output::success(&format!("{shown} is valid"));
    Ok(())
}

fn api_key_present(provider: LlmProvider) -> bool {
    let var = match provider {
        LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        LlmProvider::OpenAi => "OPENAI_API_KEY",
    };
    std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
}
