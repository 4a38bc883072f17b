//! Slugt CLI - a command-line tool for working with slug patterns.
//!
//! This is the main entry point for the slugt CLI application. It uses
//! clap for argument parsing and dispatches to the command handlers for
//! validating patterns, inspecting partial parses and computing editor
//! suggestions.

mod commands;
mod config;
mod error;
mod provider;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_check, run_inspect, run_suggest, CheckArgs, InspectArgs, SuggestArgs};
use config::Config;
use error::{Result, SlugtError};

/// Slugt - a CLI tool for slug patterns.
///
/// Slugt validates slug generation patterns, shows where a partial
/// pattern stops parsing and previews the completions an editor would
/// offer.
#[derive(Parser, Debug)]
#[command(name = "slugt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for slug patterns", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "SLUGT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SLUGT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "SLUGT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the slugt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a pattern with the full parser
    Check(CheckCommand),

    /// Show the partial-parse context of a pattern prefix
    Inspect(InspectCommand),

    /// Preview editor completions for a pattern and cursor
    Suggest(SuggestCommand),
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Pattern to validate
    pattern: String,

    /// Print the parsed structure as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the inspect subcommand.
#[derive(Parser, Debug)]
struct InspectCommand {
    /// Pattern prefix to inspect
    pattern: String,

    /// Print the context descriptor as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the suggest subcommand.
#[derive(Parser, Debug)]
struct SuggestCommand {
    /// Pattern being edited
    pattern: String,

    /// Cursor offset (defaults to the end of the pattern)
    #[arg(short = 'C', long)]
    cursor: Option<usize>,

    /// Dictionary metadata file (JSON)
    #[arg(short, long)]
    dictionaries: Option<PathBuf>,

    /// Print suggestions as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Initializes logging, loads configuration and dispatches the command.
fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;
    execute_command(cli.command, &config)
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    let layer = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| SlugtError::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Check(args) => run_check(CheckArgs {
            pattern: args.pattern,
            json: args.json || config.json,
        }),
        Commands::Inspect(args) => run_inspect(InspectArgs {
            pattern: args.pattern,
            json: args.json || config.json,
        }),
        Commands::Suggest(args) => run_suggest(
            SuggestArgs {
                pattern: args.pattern,
                cursor: args.cursor,
                dictionaries: args.dictionaries,
                json: args.json || config.json,
            },
            config,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["slugt", "check", "{noun}"]);
        match cli.command {
            Commands::Check(args) => assert_eq!(args.pattern, "{noun}"),
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_check_json() {
        let cli = Cli::parse_from(["slugt", "check", "--json", "{noun}"]);
        match cli.command {
            Commands::Check(args) => assert!(args.json),
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::parse_from(["slugt", "inspect", "{noun:"]);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_suggest_with_cursor() {
        let cli = Cli::parse_from(["slugt", "suggest", "{a", "--cursor", "2"]);
        match cli.command {
            Commands::Suggest(args) => {
                assert_eq!(args.pattern, "{a");
                assert_eq!(args.cursor, Some(2));
            }
            other => panic!("expected suggest command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_suggest_with_dictionaries() {
        let cli = Cli::parse_from(["slugt", "suggest", "{a", "-d", "/tmp/dict.json"]);
        match cli.command {
            Commands::Suggest(args) => {
                assert_eq!(args.dictionaries, Some(PathBuf::from("/tmp/dict.json")));
            }
            other => panic!("expected suggest command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["slugt", "--verbose", "check", "{noun}"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from(["slugt", "--config", "/tmp/slugt.toml", "check", "{noun}"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/slugt.toml")));
    }
}
