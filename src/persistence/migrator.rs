//! Schema setup for the chat database.
//!
//! The only table is `default_repo`. Its migrations are compiled into the
//! binary so `--migrate-db` and `serve` never depend on files next to the
//! executable.

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::PersistenceError;

/// Migrations from `migrations/`, applied in version order.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Version of the newest migration, the one that creates `default_repo`.
pub const CURRENT_SCHEMA_VERSION: &str = "20260301000000";

/// The newest applied migration version of a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Version digits, e.g. `20260301000000`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Brings the database at `database_url` up to [`CURRENT_SCHEMA_VERSION`].
///
/// Already-applied migrations are skipped, so startup can call this on every
/// run. The version reached is reported to `telemetry` once per call.
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for a blank URL,
/// [`PersistenceError::ConnectionFailed`] when `SQLite` cannot open the path,
/// and [`PersistenceError::MigrationFailed`] or a schema-version error when
/// the migrations do not apply cleanly.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<SchemaVersion, PersistenceError> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }

    let mut connection =
        SqliteConnection::establish(url).map_err(|error| PersistenceError::ConnectionFailed {
            message: error.to_string(),
        })?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?;
    tracing::debug!(applied = applied.len(), "pending migrations applied");

    let version = newest_applied_version(&mut connection)?;
    telemetry.record(TelemetryEvent::SchemaVersionRecorded {
        schema_version: version.as_str().to_owned(),
    });

    Ok(version)
}

fn newest_applied_version(
    connection: &mut SqliteConnection,
) -> Result<SchemaVersion, PersistenceError> {
    #[derive(Debug, QueryableByName)]
    struct Applied {
        #[diesel(sql_type = Text)]
        version: String,
    }

    sql_query("SELECT version FROM __diesel_schema_migrations ORDER BY version DESC LIMIT 1;")
        .get_result::<Applied>(connection)
        .optional()
        .map_err(|error| PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        })?
        .map(|applied| SchemaVersion(applied.version))
        .ok_or(PersistenceError::MissingSchemaVersion)
}
