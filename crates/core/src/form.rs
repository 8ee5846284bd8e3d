//! Story submission form state
//!
//! Pure rules for what a URL change event may write into the form. The
//! shell owns event delivery and the network lookup; this module decides
//! which fields change and whether a lookup is needed.

use serde::{Deserialize, Serialize};

use crate::github::{Enrichment, RepoRef};
use crate::title::derive;

/// Fields of the story submission form touched by title derivation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryForm {
    pub url: String,
    pub name: String,
    pub summary: String,
}

/// Result of a URL change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlChange {
    /// The name field already had a value and was left alone.
    Kept,
    /// The name field was empty and received a derived title. `lookup` is set
    /// when the URL names a repository whose metadata may enrich it.
    Derived { lookup: Option<RepoRef> },
}

impl StoryForm {
    /// Create a form with a pre-filled name, as when the user typed one
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Apply a change of the URL field
    pub fn url_changed(&mut self, url: &str) -> UrlChange {
        self.url = url.to_string();

        if !self.name.is_empty() {
            return UrlChange::Kept;
        }

        self.name = derive(Some(url));

        UrlChange::Derived {
            lookup: RepoRef::parse(url),
        }
    }

    /// Overwrite name and summary with repository metadata
    ///
    /// Applies whatever the name field holds at arrival time, including a
    /// title derived from a later URL change.
    pub fn apply_enrichment(&mut self, enrichment: &Enrichment) {
        self.name = enrichment.name.clone();
        self.summary = enrichment.summary.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_enrichment() -> Enrichment {
        Enrichment {
            name: "serde - Serialization framework".to_string(),
            summary: "Serialization framework by serde-rs".to_string(),
        }
    }

    #[test]
    fn test_url_changed_fills_empty_name() {
        let mut form = StoryForm::default();
        let change = form.url_changed("https://example.com/123-my-cool-post.html");
        assert_eq!(change, UrlChange::Derived { lookup: None });
        assert_eq!(form.name, "My cool post");
        assert_eq!(form.url, "https://example.com/123-my-cool-post.html");
        assert_eq!(form.summary, "");
    }

    #[test]
    fn test_url_changed_keeps_typed_name() {
        let mut form = StoryForm::with_name("My own title");
        let change = form.url_changed("https://github.com/serde-rs/serde");
        assert_eq!(change, UrlChange::Kept);
        assert_eq!(form.name, "My own title");
        assert_eq!(form.url, "https://github.com/serde-rs/serde");
    }

    #[test]
    fn test_url_changed_requests_lookup_for_repo() {
        let mut form = StoryForm::default();
        let change = form.url_changed("https://github.com/serde-rs/serde");
        assert_eq!(
            change,
            UrlChange::Derived {
                lookup: Some(RepoRef {
                    owner: "serde-rs".to_string(),
                    repo: "serde".to_string(),
                })
            }
        );
        assert_eq!(form.name, "Serde");
    }

    #[test]
    fn test_second_change_does_not_rederive() {
        let mut form = StoryForm::default();
        form.url_changed("https://example.com/first-post");
        let change = form.url_changed("https://example.com/second-post");
        assert_eq!(change, UrlChange::Kept);
        assert_eq!(form.name, "First post");
    }

    #[test]
    fn test_empty_derivation_allows_rederive() {
        let mut form = StoryForm::default();
        form.url_changed("");
        assert_eq!(form.name, "");
        form.url_changed("https://example.com/later-post");
        assert_eq!(form.name, "Later post");
    }

    #[test]
    fn test_apply_enrichment() {
        let mut form = StoryForm::default();
        form.url_changed("https://github.com/serde-rs/serde");
        form.apply_enrichment(&create_test_enrichment());
        assert_eq!(form.name, "serde - Serialization framework");
        assert_eq!(form.summary, "Serialization framework by serde-rs");
    }
}
