use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;
use fxconv::{AppCommand, RunOptions};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Base URL of the conversion API
    #[arg(long, global = true, env = "FXCONV_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported currencies
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source currency code
        #[arg(short, long)]
        from: Option<String>,
        /// Target currency code
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Display recent conversions
    History {
        /// Show the history kept by the server
        #[arg(long, conflicts_with = "clear")]
        remote: bool,
        /// Remove all locally stored conversions
        #[arg(long)]
        clear: bool,
    },
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Currencies => AppCommand::Currencies,
            Commands::Convert { amount, from, to } => AppCommand::Convert { amount, from, to },
            Commands::History { remote, clear } => AppCommand::History { remote, clear },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = RunOptions {
        config_path: cli.config_path.as_deref(),
        base_url: cli.base_url.as_deref(),
    };
    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amount_reaches_the_form() {
        let cli = Cli::try_parse_from(["fxconv", "convert", "-5", "--from", "USD"]).unwrap();
        match cli.command {
            Some(Commands::Convert { amount, from, to }) => {
                assert_eq!(amount, -5.0);
                assert_eq!(from.as_deref(), Some("USD"));
                assert!(to.is_none());
            }
            _ => panic!("Expected the convert command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
