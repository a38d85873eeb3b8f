use std::path::PathBuf;

use clap::Parser;

use storefront_relay::config::{self, validation::validate_config, RelayConfig};
use storefront_relay::lifecycle::startup;
use storefront_relay::observability::logging;

#[derive(Parser)]
#[command(name = "storefront-relay")]
#[command(about = "Relays storefront API routes to the commerce backend named by ISC_API_URL", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    logging::init(&config.observability);
    tracing::info!("storefront-relay v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
