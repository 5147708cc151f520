//! TCP server for the limit-order agent.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use limit_server::config::Config;
use limit_server::server;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "limit-server")]
#[clap(about = "Limit-order agent driven by price ticks over TCP")]
struct Cli {
    /// TOML config file, overlaid on environment settings
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[clap(short, long)]
    bind: Option<String>,

    /// TCP port
    #[clap(short, long)]
    port: Option<u16>,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::from_env()?;
    if let Some(path) = &cli.config {
        config = config.merge_file(path)?;
    }
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!(
        addr = %config.socket_addr_string(),
        max_clients = config.max_clients,
        max_order_qty = config.max_order_qty,
        halted = ?config.halted_products,
        "starting limit-server"
    );

    server::run(config).await
}
