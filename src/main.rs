//! github-beard entrypoint: a Telegram bot exposing GitHub commands.

use std::io::{self, Write};
use std::process::ExitCode;

use github_beard::{BeardConfig, BeardError};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BeardError> {
    let config = load_config()?;
    config.validate()?;
    github_beard::logging::init_tracing(config.json_logs)?;

    if config.migrate_db {
        return cli::migrations::run(&config);
    }

    cli::serve::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`BeardError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<BeardConfig, BeardError> {
    BeardConfig::load().map_err(|error| BeardError::Configuration {
        message: error.to_string(),
    })
}
