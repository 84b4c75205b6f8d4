//! github-beard library crate: GitHub commands for a Telegram bot.
//!
//! The crate is layered leaves-first:
//!
//! - [`github`] wraps Octocrab behind the [`github::GithubGateway`] trait.
//! - [`persistence`] stores each chat's default repository in `SQLite`.
//! - [`chat`] abstracts the chat service and ships a Telegram transport.
//! - [`beard`] holds the command handlers, argument prompting, formatting,
//!   pagination, and the dispatch boundary that reports failures.
//! - [`runtime`] runs one session task per chat over a polled update source.

pub mod beard;
pub mod chat;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod persistence;
pub mod runtime;
pub mod telemetry;

pub use config::BeardConfig;
pub use error::BeardError;
