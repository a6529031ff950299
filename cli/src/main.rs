//! BUX wallet: terminal client for a BUX wallet backend.

mod app;
mod command;

use std::path::PathBuf;
use std::time::Duration;

use bux_api::HttpBackend;
use bux_wallet_core::load_config;
use clap::Parser;

use crate::app::App;

#[derive(Parser)]
#[command(name = "bux-wallet", about = "BUX wallet terminal client")]
struct Cli {
    /// Directory holding `config.default.json` and the optional
    /// `env-config.json` override.
    #[arg(long, default_value = ".", env = "BUX_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Backend base URL. Overrides `apiUrl` from the config files.
    #[arg(long, env = "BUX_API_URL")]
    api_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "warn", env = "BUX_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bux_utils::init_tracing(&cli.log_level);

    let mut config = load_config(&cli.config_dir)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    tracing::info!(api_url = %config.api_url, "starting wallet session");

    let backend = HttpBackend::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    App::new(backend, config.transaction_page_size).run().await
}
