//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use regdesk_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed");
    Ok(())
}

/// One row of the sqlx migration ledger.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct AppliedMigration {
    /// Migration version (file prefix).
    pub version: i64,
    /// Migration description (file name without prefix).
    pub description: String,
    /// When the migration ran.
    pub installed_on: chrono::DateTime<chrono::Utc>,
    /// Whether it completed.
    pub success: bool,
}

/// List the migrations recorded in `_sqlx_migrations`, oldest first.
pub async fn applied_migrations(pool: &PgPool) -> Result<Vec<AppliedMigration>, AppError> {
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, description, installed_on, success \
         FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to read migration status: {e}"),
            e,
        )
    })
}
