//! litcal-mcp entry point.

use std::process::ExitCode;

use clap::Parser;

use litcal_cli::cli::{Cli, Command, ConfigAction};
use litcal_cli::commands;
use litcal_cli::config::AppConfig;
use litcal_cli::error::CliResult;
use litcal_core::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    cli.apply_to(&mut config);

    init_tracing(config.tracing_config(cli.debug)?)?;

    match cli.command {
        None | Some(Command::Serve) => commands::serve::run(&config).await,
        Some(Command::Tools) => commands::tools::list(),
        Some(Command::Call { ref tool, ref args }) => {
            commands::call::run(&config, tool, args).await
        }
        Some(Command::Config { ref action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
