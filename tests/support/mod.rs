//! Shared test utilities.

use serde_json::json;
use tempfile::TempDir;

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Path of the bot database inside `temp_dir`, as a database URL.
pub fn database_url_in(temp_dir: &TempDir) -> String {
    temp_dir
        .path()
        .join("github-beard.sqlite")
        .to_string_lossy()
        .into_owned()
}

/// GitHub REST payload for a repository called `full_name`.
pub fn repository_json(full_name: &str) -> serde_json::Value {
    let name = full_name
        .rsplit_once('/')
        .map_or(full_name, |(_, short)| short);
    json!({
        "full_name": full_name,
        "name": name,
        "description": format!("Description of {full_name}"),
        "html_url": format!("https://github.com/{full_name}"),
        "language": "Rust",
        "stargazers_count": 7,
        "forks_count": 2,
        "open_issues_count": 0
    })
}
