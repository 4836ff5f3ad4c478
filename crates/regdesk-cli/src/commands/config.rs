//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use regdesk_core::config::AppConfig;
use regdesk_core::error::AppError;
use regdesk_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration with secrets masked
    Show,
    /// Print a short summary of the effective settings
    Summary,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(&redacted(config), format);
        }
        ConfigCommand::Summary => {
            output::print_success("Configuration loaded");
            output::print_kv("Server", &config.server.bind_address());
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv(
                "Storage",
                &format!("{} ({})", config.storage.provider, config.storage.bucket),
            );
            output::print_kv("Logging", &config.logging.level);
            output::print_kv("API base URL", &config.client.base_url);
            if config.database.url.trim().is_empty() {
                output::print_warning("database.url is not set");
            }
        }
    }

    Ok(())
}

/// Copy of the configuration safe to print.
fn redacted(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    config.database.url = mask_password(&config.database.url);
    if !config.storage.s3.secret_key.is_empty() {
        config.storage.s3.secret_key = "****".to_string();
    }
    config
}
