use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::fetch::RepoFetcher;
use urltitle_core::form::{StoryForm, UrlChange};
use urltitle_core::github::Enrichment;

/// Event glue between a URL field and the story form it fills
///
/// Each URL change derives a title synchronously. Repository URLs also spawn
/// one lookup task that writes its result whenever it lands. Earlier lookups
/// are never cancelled, so a slow response can overwrite a newer title.
pub struct FormSession<F: RepoFetcher> {
    form: Arc<Mutex<StoryForm>>,
    fetcher: Arc<F>,
    api_base: String,
    enrich: bool,
}

impl<F: RepoFetcher> FormSession<F> {
    pub fn new(form: StoryForm, fetcher: F, api_base: impl Into<String>) -> Self {
        Self {
            form: Arc::new(Mutex::new(form)),
            fetcher: Arc::new(fetcher),
            api_base: api_base.into(),
            enrich: true,
        }
    }

    /// Disable repository lookups
    pub fn without_enrichment(mut self) -> Self {
        self.enrich = false;
        self
    }

    /// Handle a change of the URL field
    ///
    /// Returns the handle of the spawned lookup, if any. Dropping it leaves
    /// the task running.
    pub async fn on_url_change(&self, url: &str) -> Option<JoinHandle<()>> {
        let (change, name) = {
            let mut form = self.form.lock().await;
            let change = form.url_changed(url);
            (change, form.name.clone())
        };

        let repo = match change {
            UrlChange::Kept => {
                log::debug!("name already set, ignoring url change to {url}");
                return None;
            }
            UrlChange::Derived { lookup } => {
                log::debug!("derived name {name:?} from {url}");
                lookup?
            }
        };

        if !self.enrich {
            return None;
        }

        let api_url = repo.api_url(&self.api_base);
        let form = Arc::clone(&self.form);
        let fetcher = Arc::clone(&self.fetcher);

        log::debug!("looking up {}/{} at {api_url}", repo.owner, repo.repo);

        Some(tokio::spawn(async move {
            match fetcher.fetch_repo(&api_url).await {
                Ok(meta) => {
                    let enrichment = Enrichment::from(&meta);
                    log::info!("enriched name from {api_url}: {}", enrichment.name);
                    form.lock().await.apply_enrichment(&enrichment);
                }
                Err(e) => log::warn!("repository lookup failed, keeping derived name: {e}"),
            }
        }))
    }

    /// Current state of the form
    pub async fn snapshot(&self) -> StoryForm {
        self.form.lock().await.clone()
    }

    /// Clear the name field, as a user emptying the input would
    pub async fn clear_name(&self) {
        self.form.lock().await.name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Error;
    use std::future::Future;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use urltitle_core::github::{RepoMetadata, RepoOwner};

    const API_BASE: &str = "http://api.test";

    fn create_test_metadata(name: &str, description: &str) -> RepoMetadata {
        RepoMetadata {
            name: name.to_string(),
            description: description.to_string(),
            owner: RepoOwner {
                login: "octocat".to_string(),
            },
        }
    }

    struct MockFetcher {
        result: std::result::Result<RepoMetadata, Error>,
    }

    impl RepoFetcher for MockFetcher {
        fn fetch_repo(
            &self,
            api_url: &str,
        ) -> impl Future<Output = std::result::Result<RepoMetadata, Error>> + Send {
            assert!(api_url.starts_with(API_BASE), "unexpected url {api_url}");
            let result = self.result.clone();
            async move { result }
        }
    }

    /// Responds only once the test releases it
    struct GatedFetcher {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        meta: RepoMetadata,
    }

    impl RepoFetcher for GatedFetcher {
        fn fetch_repo(
            &self,
            _api_url: &str,
        ) -> impl Future<Output = std::result::Result<RepoMetadata, Error>> + Send {
            async move {
                let gate = self.gate.lock().await.take();
                if let Some(rx) = gate {
                    let _ = rx.await;
                }
                Ok(self.meta.clone())
            }
        }
    }

    #[tokio::test]
    async fn test_plain_url_derives_without_lookup() {
        let session = FormSession::new(
            StoryForm::default(),
            MockFetcher {
                result: Err(Error::Generic("unused".to_string())),
            },
            API_BASE,
        );

        let handle = session
            .on_url_change("https://example.com/123-my-cool-post.html")
            .await;

        assert!(handle.is_none());
        assert_eq!(session.snapshot().await.name, "My cool post");
    }

    #[tokio::test]
    async fn test_repo_lookup_success_overwrites_name() {
        let session = FormSession::new(
            StoryForm::default(),
            MockFetcher {
                result: Ok(create_test_metadata("hello-world", "My first repository")),
            },
            API_BASE,
        );

        let handle = session
            .on_url_change("https://github.com/octocat/hello-world")
            .await
            .unwrap();
        handle.await.unwrap();

        let form = session.snapshot().await;
        assert_eq!(form.name, "hello-world - My first repository");
        assert_eq!(form.summary, "My first repository by octocat");
    }

    #[tokio::test]
    async fn test_repo_lookup_failure_keeps_derived_name() {
        let session = FormSession::new(
            StoryForm::default(),
            MockFetcher {
                result: Err(Error::Network("HTTP 404 Not Found".to_string())),
            },
            API_BASE,
        );

        let handle = session
            .on_url_change("https://github.com/octocat/hello-world")
            .await
            .unwrap();
        handle.await.unwrap();

        let form = session.snapshot().await;
        assert_eq!(form.name, "Hello world");
        assert_eq!(form.summary, "");
    }

    #[tokio::test]
    async fn test_typed_name_is_never_overwritten() {
        let session = FormSession::new(
            StoryForm::with_name("Typed by hand"),
            MockFetcher {
                result: Ok(create_test_metadata("hello-world", "My first repository")),
            },
            API_BASE,
        );

        let handle = session
            .on_url_change("https://github.com/octocat/hello-world")
            .await;

        assert!(handle.is_none());
        let form = session.snapshot().await;
        assert_eq!(form.name, "Typed by hand");
        assert_eq!(form.url, "https://github.com/octocat/hello-world");
    }

    #[tokio::test]
    async fn test_without_enrichment_skips_lookup() {
        let session = FormSession::new(
            StoryForm::default(),
            MockFetcher {
                result: Ok(create_test_metadata("hello-world", "My first repository")),
            },
            API_BASE,
        )
        .without_enrichment();

        let handle = session
            .on_url_change("https://github.com/octocat/hello-world")
            .await;

        assert!(handle.is_none());
        assert_eq!(session.snapshot().await.name, "Hello world");
    }

    #[tokio::test]
    async fn test_late_response_overwrites_newer_title() {
        let (tx, rx) = oneshot::channel();
        let session = FormSession::new(
            StoryForm::default(),
            GatedFetcher {
                gate: Mutex::new(Some(rx)),
                meta: create_test_metadata("hello-world", "My first repository"),
            },
            API_BASE,
        );

        let handle = session
            .on_url_change("https://github.com/octocat/hello-world")
            .await
            .unwrap();

        session.clear_name().await;
        session
            .on_url_change("https://example.com/a-newer-post")
            .await;
        assert_eq!(session.snapshot().await.name, "A newer post");

        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();

        let form = session.snapshot().await;
        assert_eq!(form.name, "hello-world - My first repository");
        assert_eq!(form.url, "https://example.com/a-newer-post");
    }
}
