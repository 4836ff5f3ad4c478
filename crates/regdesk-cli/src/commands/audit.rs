//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use regdesk_client::RegDeskClient;
use regdesk_core::config::AppConfig;
use regdesk_core::error::AppError;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_database::AuditLogStore;
use regdesk_database::repositories::AuditLogRepository;
use regdesk_entity::AuditLogEntry;

use crate::output::{self, OutputFormat};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Search the audit log, newest first
    Search {
        /// Filter by entity type (e.g. document_version)
        #[arg(short = 't', long)]
        entity_type: Option<String>,
        /// Filter by entity ID
        #[arg(short = 'i', long)]
        entity_id: Option<Uuid>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
        /// Entries per page
        #[arg(short, long, default_value = "50")]
        limit: u64,
        /// Query the running server instead of the database
        #[arg(long)]
        remote: bool,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// Time
    time: String,
    /// Actor
    actor: String,
    /// Action
    action: String,
    /// Entity type
    entity_type: String,
    /// Entity ID
    entity: String,
    /// Details
    details: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(e: &AuditLogEntry) -> Self {
        Self {
            time: e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            actor: e.actor.clone(),
            action: e.action.clone(),
            entity_type: e.entity_type.clone(),
            entity: output::short_id(&e.entity_id),
            details: e.details.clone(),
        }
    }
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AuditCommand::Search {
            entity_type,
            entity_id,
            page,
            limit,
            remote,
        } => {
            let response: PageResponse<AuditLogEntry> = if *remote {
                RegDeskClient::new(&config.client)?
                    .audit_logs(entity_type.as_deref(), *entity_id, *page, *limit)
                    .await?
            } else {
                let db = super::create_db_pool(config).await?;
                let repo = AuditLogRepository::new(db.pool().clone());
                let page = PageRequest::new(*page, *limit);
                let result = repo
                    .search(entity_type.as_deref(), *entity_id, &page)
                    .await;
                db.close().await;
                result?
            };

            match format {
                OutputFormat::Json => output::print_item(&response, format),
                OutputFormat::Table => {
                    let rows: Vec<AuditRow> = response.items.iter().map(AuditRow::from).collect();
                    output::print_list(&rows, format);
                    println!(
                        "Page {} of {} ({} entries)",
                        response.page, response.total_pages, response.total_items
                    );
                }
            }
        }
    }

    Ok(())
}
