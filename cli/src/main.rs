//! Hotel back office - CLI server
//!
//! ```sh
//! # Run with default config (~/.config/hotel-backoffice/config.toml)
//! hotel-backoffice
//!
//! # Custom config path
//! hotel-backoffice --config /etc/hotel-backoffice/config.toml
//!
//! # Validate config without starting
//! hotel-backoffice --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hotel_backoffice::config::AppConfig;
use hotel_backoffice::server::{init_tracing, ServerHandle, ServerOptions};

/// Hotel back office - reservation REST API server.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-backoffice",
    version,
    about = "Room reservation back office",
    long_about = "REST API server for room availability, bookings and confirmations.\n\n\
                  Default config: ~/.config/hotel-backoffice/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HOTEL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(hotel_backoffice::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) if cli.check => {
            error!("Invalid configuration {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Booking     : rollback_partial_failures={}, serialize_room_bookings={}",
            config.booking.rollback_partial_failures, config.booking.serialize_room_bookings
        );
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
