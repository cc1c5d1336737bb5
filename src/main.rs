use clap::Parser;

use learnhub::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use learnhub::adapter::inbound::cli::output::{self, OutputConfig};
use learnhub::adapter::inbound::cli::{config, database, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = dispatch(cli.command).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => run::execute(&args).await?,
        Commands::Migrate(args) => database::execute_migrate(&args)?,
        Commands::Seed(args) => database::execute_seed(&args).await?,
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args)?,
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args)?,
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args)?,
    }
    Ok(())
}
