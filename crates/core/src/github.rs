use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default GitHub REST API base
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Error type for repository metadata parsing
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Invalid repository metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),

    #[error("Repository metadata is missing `{0}`")]
    MissingField(&'static str),
}

/// Owner and repository named by a GitHub repository URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Recognise `http(s)://[www.]github.com/<owner>/<repo>[/...]`
    ///
    /// Deeper paths (tree, blob, issues) still name the same repository.
    pub fn parse(url: &str) -> Option<Self> {
        static RE_REPO: OnceLock<Regex> = OnceLock::new();
        let re_repo = RE_REPO.get_or_init(|| {
            Regex::new(r"^https?://(?:www\.)?github\.com/([^/?#]+)/([^/?#]+)").unwrap()
        });

        let caps = re_repo.captures(url.trim())?;
        let owner = caps.get(1)?.as_str();
        let repo = caps.get(2)?.as_str();
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if repo.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Rewrite the web-facing repository URL to its API endpoint
    pub fn api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// Repository owner as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// The subset of the repository API response used for enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    pub description: String,
    pub owner: RepoOwner,
}

/// Values written to the story form from repository metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub name: String,
    pub summary: String,
}

impl From<&RepoMetadata> for Enrichment {
    fn from(meta: &RepoMetadata) -> Self {
        Self {
            name: format!("{} - {}", meta.name, meta.description),
            summary: format!("{} by {}", meta.description, meta.owner.login),
        }
    }
}

/// Parse a repository API response body
///
/// A body missing any of `name`, `description` or `owner.login`, or carrying
/// `null` for them, is rejected as a whole. Blank values are rejected too.
pub fn parse_repo_metadata(body: &str) -> Result<RepoMetadata, RepoError> {
    let meta: RepoMetadata = serde_json::from_str(body)?;

    if meta.name.trim().is_empty() {
        return Err(RepoError::MissingField("name"));
    }
    if meta.owner.login.trim().is_empty() {
        return Err(RepoError::MissingField("owner.login"));
    }

    Ok(meta)
}
