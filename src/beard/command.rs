//! Command table and command-line parsing.

/// Commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeardCommand {
    /// `/currentusersrepos [user]`
    CurrentUsersRepos,
    /// `/getrepo owner/name`
    GetRepo,
    /// `/getpr [owner/name]`
    GetPullRequests,
    /// `/getdefaultrepo`
    GetDefaultRepo,
    /// `/setdefaultrepo owner/name`
    SetDefaultRepo,
    /// `/searchrepos query`
    SearchRepos,
    /// `/help` or `/start`
    Help,
}

impl BeardCommand {
    /// Every command in help order.
    pub const ALL: [Self; 7] = [
        Self::CurrentUsersRepos,
        Self::GetRepo,
        Self::GetPullRequests,
        Self::GetDefaultRepo,
        Self::SetDefaultRepo,
        Self::SearchRepos,
        Self::Help,
    ];

    /// Looks a command up by its name, without the leading slash.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "currentusersrepos" => Some(Self::CurrentUsersRepos),
            "getrepo" => Some(Self::GetRepo),
            "getpr" => Some(Self::GetPullRequests),
            "getdefaultrepo" => Some(Self::GetDefaultRepo),
            "setdefaultrepo" => Some(Self::SetDefaultRepo),
            "searchrepos" => Some(Self::SearchRepos),
            "help" | "start" => Some(Self::Help),
            _ => None,
        }
    }

    /// Canonical command name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CurrentUsersRepos => "currentusersrepos",
            Self::GetRepo => "getrepo",
            Self::GetPullRequests => "getpr",
            Self::GetDefaultRepo => "getdefaultrepo",
            Self::SetDefaultRepo => "setdefaultrepo",
            Self::SearchRepos => "searchrepos",
            Self::Help => "help",
        }
    }

    /// One-line help text.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CurrentUsersRepos => "Lists clickable links to repos of specified user.",
            Self::GetRepo => "Gets information about given repo specified in 1st arg.",
            Self::GetPullRequests => "Gets pending pull requests from specified repo (1st arg)",
            Self::GetDefaultRepo => "Gets default repo for this chat.",
            Self::SetDefaultRepo => "Sets default repo for this chat.",
            Self::SearchRepos => "Searches for repositories in github.",
            Self::Help => "Lists the available commands.",
        }
    }

    /// Reply used when the command fails without a more specific message.
    #[must_use]
    pub const fn fallback_message(self) -> Option<&'static str> {
        match self {
            Self::GetRepo | Self::GetPullRequests => Some("Failed to get repo info."),
            Self::CurrentUsersRepos
            | Self::GetDefaultRepo
            | Self::SetDefaultRepo
            | Self::SearchRepos
            | Self::Help => None,
        }
    }
}

/// A `/command args` line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Command token without the slash or `@bot` suffix.
    pub name: String,
    /// Trailing text, trimmed; `None` when blank.
    pub argument: Option<String>,
}

impl CommandLine {
    /// Splits `text` when it starts with `/`.
    ///
    /// `/getrepo@beard_bot a/b` yields name `getrepo` and argument `a/b`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.trim_start().strip_prefix('/')?;
        let (token, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        let name = token.split_once('@').map_or(token, |(command, _)| command);
        if name.is_empty() {
            return None;
        }

        let trimmed = rest.trim();
        Some(Self {
            name: name.to_owned(),
            argument: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
        })
    }
}
