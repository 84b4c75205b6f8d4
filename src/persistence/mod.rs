//! Local persistence and database migrations.
//!
//! The bot keeps one row per chat recording the chat's default repository.
//! The schema is managed with Diesel migrations so the database can be created
//! and upgraded consistently across deployments.

mod default_repo;
mod error;
mod migrator;

pub use default_repo::{DefaultRepoStore, SqliteDefaultRepoStore};
pub use error::PersistenceError;
pub use migrator::{CURRENT_SCHEMA_VERSION, MIGRATIONS, SchemaVersion, migrate_database};

#[cfg(test)]
pub use default_repo::MockDefaultRepoStore;
