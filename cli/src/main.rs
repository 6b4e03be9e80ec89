//! Dining service CLI server
//!
//! ```sh
//! # Default config (~/.config/dining-service/config.toml)
//! dining-service
//!
//! # Custom config path and port
//! dining-service --config /etc/dining-service/config.toml --port 9000
//!
//! # Validate config without starting
//! dining-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use dining::config::AppConfig;
use dining::server::{init_tracing, ServerHandle, ServerOptions};

/// Restaurant directory & reservation service.
#[derive(Parser, Debug)]
#[command(
    name = "dining-service",
    version,
    about = "Restaurant directory with reviews, favorites and member-only reservations",
    long_about = "HTTP API for searching restaurants, posting reviews, keeping favorites \
                  and making reservations as a paid member.\n\n\
                  Default config: ~/.config/dining-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DINING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default staff account.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(dining::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if cli.check {
        let billing = if config.stripe_config().is_configured() {
            "configured"
        } else {
            "not configured"
        };
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Listen      : {}", config.listen_address());
        println!("   Public URL  : {}", config.server.public_url);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Billing     : {}", billing);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_staff: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
