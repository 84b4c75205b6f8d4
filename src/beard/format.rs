//! Pure text renderers for repositories and pull requests.
//!
//! HTML renderers escape every interpolated field; plain renderers emit text
//! verbatim.

use crate::github::{PullRequestSummary, Repository};

/// Longest text Telegram accepts in one message.
pub const MAX_MESSAGE_CHARS: usize = 4096;

const UNTITLED: &str = "(untitled)";
const UNKNOWN_AUTHOR: &str = "someone";
const UNKNOWN_REF: &str = "?";

/// Escapes the characters that are significant in Telegram HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Plain-text summary of a repository.
///
/// ```text
/// rust-lang/rust
/// Empowering everyone to build reliable and efficient software.
/// ★ 100 · ⑂ 20 · Rust
/// https://github.com/rust-lang/rust
/// ```
#[must_use]
pub fn repo_message(repository: &Repository) -> String {
    let mut lines = vec![repository.full_name.clone()];

    if let Some(description) = repository
        .description
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        lines.push(description.to_owned());
    }

    let mut stats = format!(
        "★ {} · ⑂ {}",
        repository.stargazers_count, repository.forks_count
    );
    if let Some(language) = repository.language.as_deref() {
        stats.push_str(" · ");
        stats.push_str(language);
    }
    lines.push(stats);

    if let Some(url) = repository.html_url.as_deref() {
        lines.push(url.to_owned());
    }

    lines.join("\n")
}

/// Plain-text pull request summary: `#{number} {title}`, author, link.
#[must_use]
pub fn pull_request_message(pull_request: &PullRequestSummary) -> String {
    let title = pull_request.title.as_deref().unwrap_or(UNTITLED);
    let author = pull_request.author.as_deref().unwrap_or(UNKNOWN_AUTHOR);
    let mut text = format!("#{} {title}\nby {author}", pull_request.number);
    if let Some(url) = pull_request.html_url.as_deref() {
        text.push('\n');
        text.push_str(url);
    }
    text
}

/// Conversational HTML pull request summary.
///
/// ```text
/// <a href="https://github.com/o/r/pull/7">#7 Fix parser</a>
/// octocat wants to merge feature-7 into main
/// opened 2026-03-01 [draft]
/// ```
#[must_use]
pub fn pull_request_message_informal(pull_request: &PullRequestSummary) -> String {
    let heading = format!(
        "#{} {}",
        pull_request.number,
        escape_html(pull_request.title.as_deref().unwrap_or(UNTITLED))
    );
    let linked_heading = match pull_request.html_url.as_deref() {
        Some(url) => format!("<a href=\"{}\">{heading}</a>", escape_html(url)),
        None => format!("<b>{heading}</b>"),
    };

    let merge_line = format!(
        "{} wants to merge {} into {}",
        escape_html(pull_request.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)),
        escape_html(pull_request.head_ref.as_deref().unwrap_or(UNKNOWN_REF)),
        escape_html(pull_request.base_ref.as_deref().unwrap_or(UNKNOWN_REF)),
    );

    let mut status: Vec<String> = Vec::new();
    if let Some(created_at) = pull_request.created_at {
        status.push(format!("opened {}", created_at.format("%Y-%m-%d")));
    }
    if pull_request.draft {
        status.push("[draft]".to_owned());
    }

    let mut lines = vec![linked_heading, merge_line];
    if !status.is_empty() {
        lines.push(status.join(" "));
    }
    lines.join("\n")
}

/// HTML list line linking to a repository.
#[must_use]
pub fn repo_link_line(repository: &Repository) -> String {
    let name = escape_html(&repository.name);
    match repository.html_url.as_deref() {
        Some(url) => format!("- <a href=\"{}\">{name}</a>", escape_html(url)),
        None => format!("- {name}"),
    }
}

/// Joins `lines` with newlines into as few texts as possible, each at most
/// `max_chars` characters. Lines are never split; a single line longer than
/// the limit gets a text of its own.
#[must_use]
pub fn join_lines_within(lines: &[String], max_chars: usize) -> Vec<String> {
    let mut texts = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0_usize;

    for line in lines {
        let line_chars = line.chars().count();
        if !current.is_empty() && current_chars.saturating_add(1).saturating_add(line_chars) > max_chars
        {
            texts.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push('\n');
            current_chars = current_chars.saturating_add(1);
        }
        current.push_str(line);
        current_chars = current_chars.saturating_add(line_chars);
    }

    if !current.is_empty() {
        texts.push(current);
    }
    texts
}
