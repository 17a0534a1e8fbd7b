//! # ShopClaw — E-commerce Support & Sales Chatbot Backend
//!
//! Stores store knowledge (products, FAQs, policies, custom notes) in a single
//! JSON document and answers chat queries by keyword matching — no external AI.
//!
//! Usage:
//!   shopclaw                      # Start gateway (default port 12000)
//!   shopclaw --port 8080          # Custom port
//!   shopclaw --data-dir ./data    # Custom knowledge directory

use anyhow::Result;
use clap::Parser;
use shopclaw_core::config::ShopClawConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shopclaw",
    version,
    about = "🛒 ShopClaw — E-commerce Support & Sales Chatbot Backend"
)]
struct Cli {
    /// Gateway host
    #[arg(long)]
    host: Option<String>,

    /// Gateway port
    #[arg(short, long)]
    port: Option<u16>,

    /// Data directory holding the knowledge document
    #[arg(long)]
    data_dir: Option<String>,

    /// Config file path (default: ~/.shopclaw/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "shopclaw=debug,tower_http=debug"
    } else {
        "shopclaw=info,shopclaw_gateway=info,shopclaw_knowledge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    // Load config, then apply CLI overrides
    let mut config = match &cli.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path).to_string();
            ShopClawConfig::load_from(std::path::Path::new(&expanded))?
        }
        None => ShopClawConfig::load()?,
    };
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    tracing::info!("🛒 ShopClaw v{} starting", env!("CARGO_PKG_VERSION"));

    shopclaw_gateway::start(&config).await
}
