use crate::prelude::*;
use std::future::Future;

use urltitle_core::github::{parse_repo_metadata, RepoMetadata};

const USER_AGENT: &str = concat!("urltitle/", env!("CARGO_PKG_VERSION"));

/// Network capability used to look up repository metadata
///
/// Injected into [`crate::form::FormSession`] so the event glue never reaches
/// for a global client, and tests can stand in a canned response.
pub trait RepoFetcher: Send + Sync + 'static {
    fn fetch_repo(
        &self,
        api_url: &str,
    ) -> impl Future<Output = std::result::Result<RepoMetadata, Error>> + Send;
}

/// Fetches repository metadata from the GitHub REST API
#[derive(Debug, Clone, Default)]
pub struct GitHubFetcher {
    client: reqwest::Client,
}

impl GitHubFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepoFetcher for GitHubFetcher {
    fn fetch_repo(
        &self,
        api_url: &str,
    ) -> impl Future<Output = std::result::Result<RepoMetadata, Error>> + Send {
        let request = self
            .client
            .get(api_url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT);
        let api_url = api_url.to_string();

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| Error::Network(f!("Failed to fetch {api_url}: {e}")))?;

            if !response.status().is_success() {
                return Err(Error::Network(f!(
                    "Failed to fetch {api_url}: HTTP {}",
                    response.status()
                )));
            }

            let body = response
                .text()
                .await
                .map_err(|e| Error::Network(f!("Failed to read {api_url}: {e}")))?;

            parse_repo_metadata(&body).map_err(|e| Error::Parse(e.to_string()))
        }
    }
}
