//! AI job CLI commands, executed against the running server.

use std::time::Duration;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use regdesk_client::{JobPoller, RegDeskClient};
use regdesk_core::config::AppConfig;
use regdesk_core::error::AppError;
use regdesk_entity::{AiJob, AiJobStatus};

use crate::output::{self, OutputFormat};

/// Arguments for job commands
#[derive(Debug, Args)]
pub struct JobArgs {
    /// Job subcommand
    #[command(subcommand)]
    pub command: JobCommand,
}

/// Job subcommands
#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Show one job
    Show {
        /// Job ID
        id: Uuid,
    },
    /// List the jobs of an entity
    List {
        /// Entity ID
        entity_id: Uuid,
    },
    /// Enqueue a job
    Enqueue {
        /// Job type (e.g. gap_analysis)
        job_type: String,
        /// Entity the job works on
        entity_id: Uuid,
    },
    /// Request cancellation of a job
    Cancel {
        /// Job ID
        id: Uuid,
    },
    /// Poll a job until it completes, fails or is cancelled
    Watch {
        /// Job ID
        id: Uuid,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Job display row
#[derive(Debug, Serialize, Tabled)]
struct JobRow {
    /// Job ID
    id: String,
    /// Type
    job_type: String,
    /// Status
    status: String,
    /// Progress
    progress: String,
    /// Updated
    updated: String,
}

impl From<&AiJob> for JobRow {
    fn from(job: &AiJob) -> Self {
        Self {
            id: job.id.to_string(),
            job_type: job.job_type.clone(),
            status: job.status.to_string(),
            progress: job.progress_message.clone().unwrap_or_default(),
            updated: job.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute job commands
pub async fn execute(
    args: &JobArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = RegDeskClient::new(&config.client)?;

    match &args.command {
        JobCommand::Show { id } => {
            let job = client.ai_job(*id).await?;
            output::print_item(&job, format);
        }
        JobCommand::List { entity_id } => {
            let jobs = client.ai_jobs(*entity_id).await?;
            let rows: Vec<JobRow> = jobs.iter().map(JobRow::from).collect();
            output::print_list(&rows, format);
        }
        JobCommand::Enqueue {
            job_type,
            entity_id,
        } => {
            let job = client.enqueue_job(job_type, *entity_id).await?;
            output::print_success(&format!("Enqueued job {}", job.id));
        }
        JobCommand::Cancel { id } => {
            let job = client.cancel_job(*id).await?;
            output::print_success(&format!("Job {} is now {}", job.id, job.status));
        }
        JobCommand::Watch { id, timeout } => {
            let mut poller = JobPoller::from_config(&config.client);
            if let Some(secs) = timeout {
                poller = poller.with_timeout(Duration::from_secs(*secs));
            }

            let job = poller
                .watch(&client, *id, |job| {
                    if format == OutputFormat::Table {
                        println!("{}", progress_line(job));
                    }
                })
                .await?;

            output::print_item(&job, format);
            if job.status == AiJobStatus::Failed {
                return Err(AppError::external_service(format!(
                    "AI job {} failed: {}",
                    job.id,
                    job.error_message.as_deref().unwrap_or("no error message")
                )));
            }
        }
    }

    Ok(())
}

fn progress_line(job: &AiJob) -> String {
    match &job.progress_message {
        Some(msg) => format!("[{}] {}", job.status, msg),
        None => format!("[{}]", job.status),
    }
}
