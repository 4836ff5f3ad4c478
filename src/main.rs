//! RegDesk Server: regulatory document and register management.
//!
//! Loads configuration, initialises logging and hands over to the API crate.

use tracing_subscriber::{EnvFilter, fmt};

use regdesk_core::config::AppConfig;
use regdesk_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = regdesk_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `REGDESK_ENV` overlay and `REGDESK__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("REGDESK_ENV").unwrap_or_else(|_| "development".to_string());
    let dir = std::env::var("REGDESK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
