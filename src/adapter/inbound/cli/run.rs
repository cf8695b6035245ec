//! Command dispatch.

use std::io::IsTerminal;

use super::command::{Cli, ColorChoice, Commands, ConfigCommand};
use super::output::{self, OutputConfig};
use super::{assets, config, score};
use crate::application::scoring::engine::ScoringEngine;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::scoring::build_engine;

/// Apply global flags, then run the selected command.
///
/// # Errors
///
/// Returns configuration errors, provider construction errors and unknown
/// asset ids. Degraded scores are not errors.
pub async fn execute(cli: &Cli) -> Result<()> {
    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    output::configure(OutputConfig::new(cli.json, cli.quiet, color));

    match &cli.command {
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
        Commands::Score(args) => {
            let engine = load_engine(cli)?;
            score::execute(&engine, args).await
        }
        Commands::Assets => {
            let engine = load_engine(cli)?;
            assets::execute(&engine)
        }
    }
}

fn load_engine(cli: &Cli) -> Result<ScoringEngine> {
    let config = Config::load(&cli.config)?;
    config.init_logging();
    build_engine(&config)
}
