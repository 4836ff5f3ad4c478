//! CLI command definitions and dispatch.

pub mod audit;
pub mod config;
pub mod job;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use regdesk_core::config::AppConfig;
use regdesk_core::error::AppError;
use regdesk_database::DatabasePool;

use crate::output::OutputFormat;

/// RegDesk: regulatory document and register management
#[derive(Debug, Parser)]
#[command(name = "regdesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load
    #[arg(short, long, env = "REGDESK_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the RegDesk server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Audit log
    Audit(audit::AuditArgs),
    /// AI jobs
    Job(job::JobArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::Audit(args) => audit::execute(args, &config, self.format).await,
            Commands::Job(args) => job::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config_dir, &self.env)
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_job_watch() {
        let cli = Cli::try_parse_from([
            "regdesk",
            "--format",
            "json",
            "job",
            "watch",
            "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f",
            "--timeout",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Job(_)));
    }
}
