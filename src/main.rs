use anyhow::Result;
use clap::{Parser, Subcommand};
use fxpair::core::log::init_logging;
use fxpair::core::{Amount, CurrencyCode};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_amount(text: &str) -> Result<Amount, String> {
    let value: f64 = text
        .replace(',', "")
        .parse()
        .map_err(|e| format!("invalid amount '{text}': {e}"))?;
    Amount::new(value).map_err(|e| e.to_string())
}

impl From<Commands> for fxpair::AppCommand {
    fn from(cmd: Commands) -> fxpair::AppCommand {
        match cmd {
            Commands::Session => fxpair::AppCommand::Session,
            Commands::Convert { amount, from, to } => {
                fxpair::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates { base } => fxpair::AppCommand::Rates { base },
            Commands::Currencies => fxpair::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Start an interactive two-way conversion session (default)
    Session,
    /// Convert a single amount
    Convert {
        /// Amount to convert
        #[arg(value_parser = parse_amount)]
        amount: Amount,
        /// Source currency code
        from: CurrencyCode,
        /// Target currency code
        to: CurrencyCode,
    },
    /// Show the supported currencies' rates for a base currency
    Rates {
        /// Base currency code
        #[arg(default_value = "USD")]
        base: CurrencyCode,
    },
    /// List supported currencies
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxpair::cli::setup::setup(),
        Some(cmd) => fxpair::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => fxpair::run_command(fxpair::AppCommand::Session, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
