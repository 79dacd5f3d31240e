//! Embedded schema migrations.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure to bring the schema up to date.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to open database {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: diesel::ConnectionError,
    },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn run_blocking(path: &str) -> Result<usize, MigrationError> {
    let mut conn = SqliteConnection::establish(path).map_err(|source| MigrationError::Connect {
        path: path.to_owned(),
        source,
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply pending migrations to the database at `path`, creating the file if
/// needed. Returns how many migrations ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database cannot be opened or a
/// migration fails.
pub async fn run_migrations(path: impl Into<String>) -> Result<usize, MigrationError> {
    let path = path.into();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&path)).await??;
    info!(applied, "database migrations applied");
    Ok(applied)
}
