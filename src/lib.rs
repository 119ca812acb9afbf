pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::session::SyncController;
use crate::core::{Amount, CurrencyCode};
use crate::providers::{CachingRateProvider, OpenErApiProvider};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Rate source used by the binary: the HTTP provider behind the TTL cache.
pub type RateSource = CachingRateProvider<OpenErApiProvider>;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Session,
    Convert {
        amount: Amount,
        from: CurrencyCode,
        to: CurrencyCode,
    },
    Rates {
        base: CurrencyCode,
    },
    Currencies,
}

pub fn build_rate_source(config: &AppConfig) -> Result<RateSource> {
    let provider =
        OpenErApiProvider::with_timeout(&config.provider.base_url, config.provider.timeout())
            .context("Failed to build HTTP client")?;
    Ok(CachingRateProvider::new(provider, config.cache_ttl()))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxpair starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Session => {
            let controller = SyncController::new(build_rate_source(&config)?);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            cli::session::run_session(
                &controller,
                config.defaults.initial_state(),
                stdin,
                &mut stdout,
            )
            .await?;
        }
        AppCommand::Convert { amount, from, to } => {
            let controller = SyncController::new(build_rate_source(&config)?);
            let output = cli::convert::convert_and_display(&controller, amount, from, to).await?;
            println!("{output}");
        }
        AppCommand::Rates { base } => {
            let source = build_rate_source(&config)?;
            let output = cli::rates::display_rates(&source, base).await?;
            println!("{output}");
        }
        AppCommand::Currencies => {
            println!("{}", cli::rates::display_currencies());
        }
    }
    Ok(())
}
