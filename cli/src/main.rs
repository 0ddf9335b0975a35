//! Lumos gateway CLI server
//!
//! ```sh
//! # Run with default config (~/.config/lumos-gateway/config.toml)
//! lumos-gateway
//!
//! # Custom config path
//! lumos-gateway --config /etc/lumos-gateway/config.toml
//!
//! # Override port and backend
//! lumos-gateway --port 8088 --backend-url http://search:8080
//!
//! # Validate config without starting
//! lumos-gateway --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use lumos_gateway::config::AppConfig;
use lumos_gateway::server::{init_tracing, ServerHandle, ServerOptions};

/// Lumos gateway: HTTP front door for the search backend.
#[derive(Parser, Debug)]
#[command(
    name = "lumos-gateway",
    version,
    about = "HTTP gateway between the Lumos search UI and the search backend",
    long_about = "Lumos gateway: proxies search and suggestion requests to the backend, \
                  builds result cards and pagination, and keeps per-client search sessions.\n\n\
                  Default config: ~/.config/lumos-gateway/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "LUMOS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the search backend base URL.
    #[arg(long)]
    backend_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Do not install the Prometheus recorder.
    #[arg(long)]
    no_metrics: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(lumos_gateway::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(url) = cli.backend_url {
        info!("CLI override: backend_url = {}", url);
        config.backend.base_url = url;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Listen      : {}", config.server.address());
        println!("   Backend     : {}", config.backend.base_url);
        println!("   Page size   : {}", config.backend.results_per_page);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        install_metrics: !cli.no_metrics,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
