//! Command-line interface definitions.
//!
//! Defines the CLI structure for the trustgrade application using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::infrastructure::config::settings::DEFAULT_CONFIG_PATH;

/// Composite trust scoring for tokenized and wrapped assets
#[derive(Parser, Debug)]
#[command(name = "trustgrade")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

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

/// Top-level subcommands for the trustgrade CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one or more registered assets
    Score(ScoreArgs),

    /// List registered assets
    Assets,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `trustgrade score`.
#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// Asset ids to score
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub asset_ids: Vec<String>,

    /// Score every registered asset
    #[arg(long)]
    pub all: bool,
}

/// Subcommands for `trustgrade config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file for correctness.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_with_defaults() {
        let cli = Cli::try_parse_from(["trustgrade", "score", "tbtc-mint"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("trustgrade.toml"));
        assert!(!cli.json);
        assert!(matches!(cli.color, ColorChoice::Auto));
        match cli.command {
            Commands::Score(args) => {
                assert_eq!(args.asset_ids, vec!["tbtc-mint"]);
                assert!(!args.all);
            }
            other => panic!("Expected Score command, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "trustgrade",
            "score",
            "a",
            "b",
            "--json",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Commands::Score(ref args) if args.asset_ids.len() == 2));
    }

    #[test]
    fn score_requires_an_asset_or_all() {
        assert!(Cli::try_parse_from(["trustgrade", "score"]).is_err());
        let cli = Cli::try_parse_from(["trustgrade", "score", "--all"]).unwrap();
        assert!(matches!(cli.command, Commands::Score(ref args) if args.all));
    }

    #[test]
    fn score_all_conflicts_with_ids() {
        assert!(Cli::try_parse_from(["trustgrade", "score", "x", "--all"]).is_err());
    }

    #[test]
    fn parses_config_validate() {
        let cli = Cli::try_parse_from(["trustgrade", "-q", "config", "validate"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommand::Validate)
        ));
    }

    #[test]
    fn parses_color_never() {
        let cli = Cli::try_parse_from(["trustgrade", "--color", "never", "assets"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(cli.command, Commands::Assets));
    }
}
