//! Embedded Diesel migrations applied at start-up.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while connecting to the database or running migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration over a blocking connection.
///
/// Returns the number of migrations that ran. Call this from
/// `spawn_blocking` when inside the async runtime.
pub fn apply_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|error| MigrationError::Connect {
            message: error.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Apply {
            message: error.to_string(),
        })?;
    info!(count = applied.len(), "database migrations applied");
    Ok(applied.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unreachable_databases_are_connect_errors() {
        let result = apply_migrations("postgres://invalid-host.invalid:1/courses");
        assert!(matches!(result, Err(MigrationError::Connect { .. })));
    }
}
