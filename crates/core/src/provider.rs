//! Recognised link providers
//!
//! Some hosts need special handling when a title is derived from their URLs.
//! Classification runs over the raw URL text, before any normalization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::github::RepoRef;

/// Provider class of a URL, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Video sharing sites (youtube, vimeo)
    Video,
    /// Blogging platforms that append an opaque post id to the slug
    LongForm,
    /// Code hosting repository pages with a metadata API
    CodeHost,
    Generic,
}

impl Provider {
    /// Classify a URL. The first matching class wins.
    pub fn classify(url: &str) -> Self {
        static RE_VIDEO: OnceLock<Regex> = OnceLock::new();
        let re_video = RE_VIDEO.get_or_init(|| Regex::new(r"youtube|vimeo\.com").unwrap());

        static RE_LONG_FORM: OnceLock<Regex> = OnceLock::new();
        let re_long_form = RE_LONG_FORM.get_or_init(|| Regex::new(r"medium\.com").unwrap());

        if re_video.is_match(url) {
            Provider::Video
        } else if re_long_form.is_match(url) {
            Provider::LongForm
        } else if RepoRef::parse(url).is_some() {
            Provider::CodeHost
        } else {
            Provider::Generic
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Provider::Video => "video",
            Provider::LongForm => "long_form",
            Provider::CodeHost => "code_host",
            Provider::Generic => "generic",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_video() {
        assert_eq!(
            Provider::classify("https://www.youtube.com/watch?v=xyz"),
            Provider::Video
        );
        assert_eq!(Provider::classify("https://vimeo.com/1"), Provider::Video);
    }

    #[test]
    fn test_classify_long_form() {
        assert_eq!(
            Provider::classify("https://medium.com/@user/post-abc"),
            Provider::LongForm
        );
    }

    #[test]
    fn test_classify_code_host() {
        assert_eq!(
            Provider::classify("https://github.com/tokio-rs/tokio"),
            Provider::CodeHost
        );
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(
            Provider::classify("https://example.com/post"),
            Provider::Generic
        );
        assert_eq!(Provider::classify(""), Provider::Generic);
        // Profile pages are not repositories.
        assert_eq!(
            Provider::classify("https://github.com/tokio-rs"),
            Provider::Generic
        );
    }

    #[test]
    fn test_classify_video_beats_long_form() {
        assert_eq!(
            Provider::classify("https://medium.com/@user/youtube-tricks-abc"),
            Provider::Video
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Provider::LongForm.to_string(), "long_form");
        assert_eq!(Provider::CodeHost.to_string(), "code_host");
    }
}
