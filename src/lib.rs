pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::client::ConversionClient;
use crate::core::config::AppConfig;
use crate::core::history::ConversionHistoryStore;
use crate::providers::HttpConversionApi;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

/// Commands that need a configured client.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Currencies,
    Convert {
        amount: f64,
        from: Option<String>,
        to: Option<String>,
    },
    History {
        remote: bool,
        clear: bool,
    },
}

/// Overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'a> {
    pub config_path: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

pub async fn run_command(command: AppCommand, options: RunOptions<'_>) -> Result<()> {
    info!("fxconv starting...");

    let mut config = match options.config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(base_url) = options.base_url {
        config.api.base_url = base_url.to_string();
    }
    debug!("Loaded config: {config:#?}");

    let api = HttpConversionApi::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let history = ConversionHistoryStore::new(store::open_storage(&config)?);
    let client = ConversionClient::new(Box::new(api), history);

    let result = match command {
        AppCommand::Currencies => cli::currencies::run(&client).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&client, &config, from.as_deref(), to.as_deref(), amount).await
        }
        AppCommand::History { remote, clear } => cli::history::run(&client, remote, clear).await,
    };

    if let Err(e) = &result {
        eprintln!(
            "{}",
            cli::ui::style_text(&format!("Error: {e}"), cli::ui::StyleType::Error)
        );
    }
    result
}
