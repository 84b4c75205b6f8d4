//! The GitHub command set and its dispatch boundary.
//!
//! [`CommandDispatcher`] parses `/command[@bot] args`, runs the matching
//! [`GithubBeard`] handler, and turns any [`CommandError`] into exactly one
//! chat message.

mod args;
mod command;
mod dispatch;
mod error;
pub mod format;
mod handlers;
mod paginator;

pub use args::{ArgumentResolver, CommandRequest};
pub use command::{BeardCommand, CommandLine};
pub use dispatch::{CommandDispatcher, GENERIC_FAILURE_MESSAGE, failure_message};
pub use error::CommandError;
pub use handlers::{BeardSettings, GithubBeard, PLUGIN_DESCRIPTION, help_text};
pub use paginator::{DEFAULT_SESSION_CAPACITY, Paginator};
