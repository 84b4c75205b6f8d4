//! Database migration operation.

use github_beard::persistence::migrate_database;
use github_beard::telemetry::TracingTelemetrySink;
use github_beard::{BeardConfig, BeardError};

/// Runs database migrations against the configured database.
///
/// # Errors
///
/// Returns [`BeardError::Persistence`] when the database cannot be opened or
/// migrated.
pub fn run(config: &BeardConfig) -> Result<(), BeardError> {
    let schema_version = migrate_database(&config.database_url, &TracingTelemetrySink)?;
    tracing::info!(
        database_url = %config.database_url,
        schema_version = schema_version.as_str(),
        "database migrated"
    );
    Ok(())
}
