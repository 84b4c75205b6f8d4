//! Bot operation: wire the collaborators and poll until Ctrl-C.

use std::sync::Arc;

use github_beard::beard::{BeardSettings, CommandDispatcher, GithubBeard};
use github_beard::chat::ChatSender;
use github_beard::chat::telegram::TelegramClient;
use github_beard::github::{OctocrabGithubGateway, PersonalAccessToken, parse_api_base};
use github_beard::persistence::{SqliteDefaultRepoStore, migrate_database};
use github_beard::runtime::ChatRuntime;
use github_beard::telemetry::{TelemetrySink, TracingTelemetrySink};
use github_beard::{BeardConfig, BeardError};

/// Migrates the database, connects to GitHub and Telegram, and runs the
/// chat runtime until Ctrl-C.
///
/// # Errors
///
/// Returns [`BeardError`] when a collaborator cannot be built or the
/// database cannot be migrated.
pub async fn run(config: &BeardConfig) -> Result<(), BeardError> {
    let telegram_token = config.require_telegram_token()?;
    let telemetry: Arc<dyn TelemetrySink> = Arc::new(TracingTelemetrySink);

    migrate_database(&config.database_url, telemetry.as_ref())?;
    let store = SqliteDefaultRepoStore::new(config.database_url.clone())?;

    let github_token = config
        .resolve_github_token()
        .map(PersonalAccessToken::new)
        .transpose()?;
    if github_token.is_none() {
        tracing::warn!("no GitHub token configured; using anonymous access");
    }
    let api_base = parse_api_base(&config.github_api_base)?;
    let github = OctocrabGithubGateway::for_token(
        github_token.as_ref(),
        api_base.as_str().trim_end_matches('/'),
    )?;

    let telegram = TelegramClient::new(telegram_token, &config.telegram_api_base)?;
    let chat: Arc<dyn ChatSender> = Arc::new(telegram.clone());

    let settings = BeardSettings {
        search_result_limit: config.search_result_limit,
        page_size: config.page_size,
        reply_timeout: config.reply_timeout(),
    };
    let beard = GithubBeard::new(Arc::new(github), Arc::new(store), Arc::clone(&chat), settings);
    let dispatcher = Arc::new(CommandDispatcher::new(beard, chat, telemetry));

    tracing::info!(
        github_api_base = %api_base,
        database_url = %config.database_url,
        "github-beard is running"
    );
    ChatRuntime::new(telegram.updates(config.poll_timeout_seconds), dispatcher)
        .run_until(shutdown_signal())
        .await;
    tracing::info!("github-beard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
