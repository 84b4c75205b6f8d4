//! Per-chat default repository table backed by `SQLite`.
//!
//! Each call opens its own connection and drops it before returning, so a
//! handle never outlives the operation that needed it and interleaved chats
//! never share connection state. Concurrent writers to the same chat resolve
//! as last-writer-wins through `ON CONFLICT DO UPDATE`.

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use crate::chat::ChatId;

use super::PersistenceError;

const DEFAULT_REPO_TABLE: &str = "default_repo";

/// Keyed mapping from chat to its default `owner/name` repository.
#[cfg_attr(test, mockall::automock)]
pub trait DefaultRepoStore: Send + Sync {
    /// Returns the stored repository for the chat, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the table cannot be read.
    fn get(&self, chat_id: ChatId) -> Result<Option<String>, PersistenceError>;

    /// Upserts the chat's repository and reports whether the stored value now
    /// matches `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write or the confirming read
    /// fails.
    fn set(&self, chat_id: ChatId, repo: &str) -> Result<bool, PersistenceError>;
}

/// SQLite-backed [`DefaultRepoStore`].
#[derive(Debug, Clone)]
pub struct SqliteDefaultRepoStore {
    database_url: String,
}

impl SqliteDefaultRepoStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })
    }

    fn read(
        connection: &mut SqliteConnection,
        chat_id: ChatId,
    ) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            repo: String,
        }

        let result: Option<Row> =
            sql_query("SELECT repo FROM default_repo WHERE chat_id = ? LIMIT 1;")
                .bind::<BigInt, _>(chat_id.get())
                .get_result(connection)
                .optional()
                .map_err(|error| Self::map_query_error(connection, &error))?;

        Ok(result.map(|row| row.repo))
    }

    fn table_exists(connection: &mut SqliteConnection) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(DEFAULT_REPO_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

impl DefaultRepoStore for SqliteDefaultRepoStore {
    fn get(&self, chat_id: ChatId) -> Result<Option<String>, PersistenceError> {
        let mut connection = self.establish_connection()?;
        Self::read(&mut connection, chat_id)
    }

    fn set(&self, chat_id: ChatId, repo: &str) -> Result<bool, PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO default_repo (chat_id, repo) VALUES (?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET \
               repo = excluded.repo, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<BigInt, _>(chat_id.get())
        .bind::<Text, _>(repo)
        .execute(&mut connection)
        .map_err(|error| Self::map_write_error(&mut connection, &error))?;

        let stored = Self::read(&mut connection, chat_id)?;
        Ok(stored.as_deref() == Some(repo))
    }
}
