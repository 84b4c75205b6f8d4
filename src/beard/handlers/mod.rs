//! Command implementations.
//!
//! Each handler resolves its argument, touches the default-repo store when it
//! needs to, calls GitHub, and sends the formatted result. Failures are
//! returned as [`CommandError`] for the dispatcher to report.

use std::sync::Arc;
use std::time::Duration;

use crate::chat::{ChatAction, ChatId, ChatSender, OutgoingMessage};
use crate::github::{GithubGateway, UserSelector};
use crate::persistence::{DefaultRepoStore, PersistenceError};

use super::args::{ArgumentResolver, CommandRequest};
use super::format::{
    MAX_MESSAGE_CHARS, join_lines_within, pull_request_message_informal, repo_link_line,
    repo_message,
};
use super::paginator::Paginator;
use super::{BeardCommand, CommandError};

/// Short description shown at the top of `/help`.
pub const PLUGIN_DESCRIPTION: &str = "Github. In a beard.";

const GET_REPO_PROMPT: &str = "Which repo would you like to get?";
const SET_DEFAULT_REPO_PROMPT: &str = "What would you like the default repo to be?";
const SEARCH_PROMPT: &str = "What would you like to search github for?";

/// Tunables for the command handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeardSettings {
    /// Most repositories shown by `/searchrepos`.
    pub search_result_limit: usize,
    /// Items per paginated message.
    pub page_size: usize,
    /// How long a prompt waits for its reply.
    pub reply_timeout: Duration,
}

impl Default for BeardSettings {
    fn default() -> Self {
        Self {
            search_result_limit: 30,
            page_size: 5,
            reply_timeout: Duration::from_secs(300),
        }
    }
}

/// The GitHub command set.
pub struct GithubBeard {
    github: Arc<dyn GithubGateway>,
    store: Arc<dyn DefaultRepoStore>,
    chat: Arc<dyn ChatSender>,
    resolver: ArgumentResolver,
    paginator: Paginator,
    search_result_limit: usize,
}

impl GithubBeard {
    /// Wires the handlers to their collaborators.
    #[must_use]
    pub fn new(
        github: Arc<dyn GithubGateway>,
        store: Arc<dyn DefaultRepoStore>,
        chat: Arc<dyn ChatSender>,
        settings: BeardSettings,
    ) -> Self {
        Self {
            resolver: ArgumentResolver::new(Arc::clone(&chat), settings.reply_timeout),
            paginator: Paginator::new(Arc::clone(&chat), settings.page_size),
            github,
            store,
            chat,
            search_result_limit: settings.search_result_limit,
        }
    }

    /// Paginator holding this command set's result sessions.
    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Runs `request.command`.
    ///
    /// # Errors
    ///
    /// Propagates the handler's [`CommandError`].
    pub async fn run(&self, request: &mut CommandRequest<'_>) -> Result<(), CommandError> {
        match request.command {
            BeardCommand::CurrentUsersRepos => self.get_current_user_repos(request).await,
            BeardCommand::GetRepo => self.get_repo(request).await,
            BeardCommand::GetPullRequests => self.get_pending_pulls(request).await,
            BeardCommand::GetDefaultRepo => self.get_default_repo(request.chat_id).await,
            BeardCommand::SetDefaultRepo => self.set_default_repo(request).await,
            BeardCommand::SearchRepos => self.search_repos(request).await,
            BeardCommand::Help => self.help(request.chat_id).await,
        }
    }

    /// `/getrepo owner/name`: repository summary.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when no argument arrives, or GitHub or the
    /// chat fails. Names GitHub cannot resolve surface as
    /// [`GithubError::NotFound`](crate::github::GithubError::NotFound).
    pub async fn get_repo(&self, request: &mut CommandRequest<'_>) -> Result<(), CommandError> {
        let argument = self.resolver.resolve(request, GET_REPO_PROMPT).await?;
        let repository = self.github.repository(&argument).await?;

        self.send_plain(request.chat_id, format!("Repo name: {}", repository.name))
            .await?;
        self.send_plain(request.chat_id, repo_message(&repository))
            .await
    }

    /// `/getpr [owner/name]`: one message per open pull request, falling back
    /// to the chat's default repository.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoDefaultRepo`] when neither an argument nor a
    /// default exists, otherwise store, GitHub, or chat failures.
    pub async fn get_pending_pulls(
        &self,
        request: &mut CommandRequest<'_>,
    ) -> Result<(), CommandError> {
        let repo = match request.first_word() {
            Some(word) => word.to_owned(),
            None => self
                .read_default_repo(request.chat_id)
                .await?
                .ok_or(CommandError::NoDefaultRepo)?,
        };
        let pull_requests = self.github.open_pull_requests(&repo).await?;

        if pull_requests.is_empty() {
            return self
                .send_plain(
                    request.chat_id,
                    format!("No pull requests found for {repo}."),
                )
                .await;
        }

        for pull_request in &pull_requests {
            self.chat
                .send_message(
                    request.chat_id,
                    OutgoingMessage::html(pull_request_message_informal(pull_request)),
                )
                .await?;
        }
        Ok(())
    }

    /// `/getdefaultrepo`: reports the chat's default repository.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] on store or chat failures.
    pub async fn get_default_repo(&self, chat_id: ChatId) -> Result<(), CommandError> {
        let text = match self.read_default_repo(chat_id).await? {
            Some(repo) => format!("Default repo for this chat: {repo}"),
            None => "No repo set.".to_owned(),
        };
        self.send_plain(chat_id, text).await
    }

    /// `/setdefaultrepo owner/name`: stores the chat's default repository.
    ///
    /// The text is stored as given; a bad name only fails when `/getpr`
    /// later resolves it.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::StoreConsistency`] when the write cannot be
    /// read back, otherwise argument, store, or chat failures.
    pub async fn set_default_repo(
        &self,
        request: &mut CommandRequest<'_>,
    ) -> Result<(), CommandError> {
        let repo = self
            .resolver
            .resolve(request, SET_DEFAULT_REPO_PROMPT)
            .await?;

        let store = Arc::clone(&self.store);
        let chat_id = request.chat_id;
        let value = repo.clone();
        let confirmed = tokio::task::spawn_blocking(move || store.set(chat_id, &value))
            .await
            .map_err(|error| PersistenceError::TaskFailed {
                message: error.to_string(),
            })??;

        if !confirmed {
            return Err(CommandError::StoreConsistency);
        }
        self.send_plain(chat_id, format!("Repo set to: {repo}"))
            .await
    }

    /// `/searchrepos query`: paginated search results.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when no query arrives, or GitHub or the chat
    /// fails.
    pub async fn search_repos(&self, request: &mut CommandRequest<'_>) -> Result<(), CommandError> {
        let query = self.resolver.resolve(request, SEARCH_PROMPT).await?;
        self.chat
            .send_chat_action(request.chat_id, ChatAction::Typing)
            .await?;

        let mut repositories = self.github.search_repositories(&query).await?;
        repositories.truncate(self.search_result_limit);

        if repositories.is_empty() {
            return self
                .send_plain(
                    request.chat_id,
                    format!("No repositories found for \"{query}\"."),
                )
                .await;
        }

        self.paginator
            .paginate(request.chat_id, &repositories, repo_message)
            .await?;
        Ok(())
    }

    /// `/currentusersrepos [user]`: links to a user's repositories, defaulting
    /// to the token's owner.
    ///
    /// An unknown user is reported in the chat rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] on GitHub or chat failures other than the
    /// user not existing.
    pub async fn get_current_user_repos(
        &self,
        request: &mut CommandRequest<'_>,
    ) -> Result<(), CommandError> {
        let chat_id = request.chat_id;
        let selector = UserSelector::from_login(request.first_word());

        let user = match self.github.user(&selector).await {
            Ok(user) => user,
            Err(error) if error.is_not_found() => {
                return self.send_plain(chat_id, "User not found.").await;
            }
            Err(error) => return Err(error.into()),
        };

        self.send_plain(chat_id, format!("Github repos for {}:", user.display_name()))
            .await?;
        self.chat
            .send_chat_action(chat_id, ChatAction::Typing)
            .await?;

        let repositories = self.github.user_repositories(&selector).await?;
        if repositories.is_empty() {
            return self.send_plain(chat_id, "No repositories found.").await;
        }

        let lines: Vec<String> = repositories.iter().map(repo_link_line).collect();
        for text in join_lines_within(&lines, MAX_MESSAGE_CHARS) {
            self.chat
                .send_message(chat_id, OutgoingMessage::html(text))
                .await?;
        }
        Ok(())
    }

    /// `/help`: the command list.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Chat`] when the message cannot be sent.
    pub async fn help(&self, chat_id: ChatId) -> Result<(), CommandError> {
        self.send_plain(chat_id, help_text()).await
    }

    async fn read_default_repo(&self, chat_id: ChatId) -> Result<Option<String>, CommandError> {
        let store = Arc::clone(&self.store);
        let stored = tokio::task::spawn_blocking(move || store.get(chat_id))
            .await
            .map_err(|error| PersistenceError::TaskFailed {
                message: error.to_string(),
            })??;
        Ok(stored)
    }

    async fn send_plain(
        &self,
        chat_id: ChatId,
        text: impl Into<String> + Send,
    ) -> Result<(), CommandError> {
        self.chat
            .send_message(chat_id, OutgoingMessage::plain(text))
            .await?;
        Ok(())
    }
}

/// Description line followed by `/{command} - {description}` per command.
#[must_use]
pub fn help_text() -> String {
    let mut lines = vec![PLUGIN_DESCRIPTION.to_owned()];
    lines.extend(
        BeardCommand::ALL
            .iter()
            .map(|command| format!("/{} - {}", command.name(), command.description())),
    );
    lines.join("\n")
}
