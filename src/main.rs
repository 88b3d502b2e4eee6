//! Product service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request         ┌──────────────────────────────────────────┐
//!     ───────────────────────┼─▶ http::server ──▶ products::handlers    │
//!                            │   (request id,        │                  │
//!                            │    trace, timeout)    ▼                  │
//!                            │                products::repository      │
//!                            │                       │                  │
//!     Client Response        │                       ▼                  │
//!     ◀──────────────────────┼── http::response ◀── store::client ◀────┼──── Hosted store
//!                            └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use product_service::config::load_config;
use product_service::lifecycle::{startup, Shutdown};
use product_service::observability::logging;

#[derive(Parser)]
#[command(name = "product-service")]
#[command(about = "CRUD HTTP service for products backed by a hosted table store", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment file loaded before configuration.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Before logging so RUST_LOG and LOG_LEVEL may come from the file
    let env_loaded = dotenvy::from_path(&cli.env_file);

    let config = load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("product-service v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = env_loaded {
        tracing::warn!(path = %cli.env_file.display(), error = %e, "Environment file not loaded");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_url = %config.store.url,
        table = %config.store.table,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
