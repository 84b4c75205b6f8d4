//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.github-beard.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `GITHUB_BEARD_*`, plus the conventional
//!    `GITHUB_TOKEN` as a fallback for the GitHub token
//! 4. **Command-line arguments** – `--telegram-token`, `--github-token`, ...
//!
//! # Configuration File
//!
//! ```toml
//! telegram_token = "123456:bot-token"
//! github_token = "ghp_example"
//! database_url = "github-beard.sqlite"
//! reply_timeout_seconds = 120
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::BeardError;
use crate::github::{DEFAULT_API_BASE, MAX_RESULTS_PER_CALL};

/// Default Telegram Bot API endpoint.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const DEFAULT_DATABASE_URL: &str = "github-beard.sqlite";
const DEFAULT_REPLY_TIMEOUT_SECONDS: u64 = 300;
const DEFAULT_SEARCH_RESULT_LIMIT: usize = 30;
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_POLL_TIMEOUT_SECONDS: u64 = 30;

/// Bot configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use github_beard::BeardConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = BeardConfig::load().expect("failed to load configuration");
/// let token = config.require_telegram_token().expect("bot token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GITHUB_BEARD",
    discovery(
        dotfile_name = ".github-beard.toml",
        config_file_name = "github-beard.toml",
        app_name = "github-beard"
    )
)]
pub struct BeardConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Optional: without a token the bot talks to GitHub anonymously and
    /// `/currentusersrepos` without a username cannot resolve a user.
    ///
    /// Can be provided via:
    /// - CLI: `--github-token <TOKEN>` or `-g <TOKEN>`
    /// - Environment: `GITHUB_BEARD_GITHUB_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `github_token = "..."`
    #[ortho_config(cli_short = 'g')]
    pub github_token: Option<String>,

    /// GitHub REST API base URL. Point this at `https://host/api/v3` for
    /// GitHub Enterprise.
    #[ortho_config()]
    pub github_api_base: String,

    /// Telegram bot token issued by `@BotFather`.
    ///
    /// Can be provided via:
    /// - CLI: `--telegram-token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `GITHUB_BEARD_TELEGRAM_TOKEN`
    /// - Config file: `telegram_token = "..."`
    #[ortho_config(cli_short = 't')]
    pub telegram_token: Option<String>,

    /// Telegram Bot API base URL.
    #[ortho_config()]
    pub telegram_api_base: String,

    /// Local `SQLite` database path holding per-chat default repositories.
    #[ortho_config()]
    pub database_url: String,

    /// Runs database migrations and exits.
    ///
    /// Note: `ortho_config` does not load boolean values from the environment,
    /// so use `--migrate-db` or `migrate_db = true` in a config file.
    #[ortho_config()]
    pub migrate_db: bool,

    /// How long a command waits for the user's reply to its prompt.
    #[ortho_config()]
    pub reply_timeout_seconds: u64,

    /// Maximum number of repositories shown by `/searchrepos`.
    #[ortho_config()]
    pub search_result_limit: usize,

    /// Items per paginated message.
    #[ortho_config()]
    pub page_size: usize,

    /// Long-poll timeout passed to Telegram `getUpdates`.
    #[ortho_config()]
    pub poll_timeout_seconds: u64,

    /// Emits logs as JSON lines instead of human-readable text.
    #[ortho_config()]
    pub json_logs: bool,
}

impl Default for BeardConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_base: DEFAULT_API_BASE.to_owned(),
            telegram_token: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_owned(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            migrate_db: false,
            reply_timeout_seconds: DEFAULT_REPLY_TIMEOUT_SECONDS,
            search_result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            poll_timeout_seconds: DEFAULT_POLL_TIMEOUT_SECONDS,
            json_logs: false,
        }
    }
}

impl BeardConfig {
    /// Resolves the GitHub token from configuration or the conventional
    /// `GITHUB_TOKEN` environment variable.
    ///
    /// Blank values count as absent.
    #[must_use]
    pub fn resolve_github_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Returns the Telegram bot token or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`BeardError::MissingTelegramToken`] when no non-blank token is
    /// configured.
    pub fn require_telegram_token(&self) -> Result<&str, BeardError> {
        self.telegram_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(BeardError::MissingTelegramToken)
    }

    /// Reply wait as a [`Duration`].
    #[must_use]
    pub const fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_seconds)
    }

    /// Checks numeric settings that must be positive, and the search limit
    /// against what one GitHub search call returns.
    ///
    /// # Errors
    ///
    /// Returns [`BeardError::Configuration`] naming the first zero-valued
    /// setting, or `search_result_limit` when it exceeds
    /// [`MAX_RESULTS_PER_CALL`].
    pub fn validate(&self) -> Result<(), BeardError> {
        let checks = [
            ("page_size", self.page_size == 0),
            ("search_result_limit", self.search_result_limit == 0),
            ("reply_timeout_seconds", self.reply_timeout_seconds == 0),
        ];

        if let Some((field, _)) = checks.iter().find(|(_, is_zero)| *is_zero) {
            return Err(BeardError::Configuration {
                message: format!("{field} must be greater than zero"),
            });
        }

        if self.search_result_limit > MAX_RESULTS_PER_CALL {
            return Err(BeardError::Configuration {
                message: format!(
                    "search_result_limit must be at most {MAX_RESULTS_PER_CALL}, got {}",
                    self.search_result_limit
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
