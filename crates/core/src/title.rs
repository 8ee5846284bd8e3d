//! Story title derivation
//!
//! Turns the URL a user pastes into a submission form into a default title.
//! The result is sentence cased with URL structure (path, query, numeric id
//! prefixes, extensions, separators) stripped, then adjusted for a couple of
//! providers whose URLs don't carry a usable title.

use regex::Regex;
use std::sync::OnceLock;

use crate::provider::Provider;

/// Label written for video links, completed by hand afterwards.
pub const VIDEO_LABEL: &str = "Video: ";

/// Derive a default story title from a URL.
///
/// Returns an empty string for `None` or empty input. Never panics.
pub fn derive(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => derive_str(url),
        _ => String::new(),
    }
}

/// Derive a default story title from URL text.
pub fn derive_str(url: &str) -> String {
    let name = sentence_case(&normalize_segment(url));

    match Provider::classify(url) {
        Provider::Video => VIDEO_LABEL.to_string(),
        Provider::LongForm => drop_last_word(&name),
        Provider::CodeHost | Provider::Generic => name,
    }
}

/// Reduce a URL to the words of its last path segment.
///
/// Lower-cased and trimmed, but not yet sentence cased.
pub fn normalize_segment(url: &str) -> String {
    // 1. Remove a single trailing slash.
    let url = url.strip_suffix('/').unwrap_or(url);

    // 2. Last non-empty path segment.
    let segment = url.rsplit('/').find(|s| !s.is_empty()).unwrap_or("");

    // 3. Query string or fragment.
    static RE_QUERY: OnceLock<Regex> = OnceLock::new();
    let re_query = RE_QUERY.get_or_init(|| Regex::new(r"[?#].*$").unwrap());
    let name = re_query.replace(segment, "");

    // 4. Numeric id prefix, e.g. `123-`.
    static RE_ID: OnceLock<Regex> = OnceLock::new();
    let re_id = RE_ID.get_or_init(|| Regex::new(r"^\d*-").unwrap());
    let name = re_id.replace(&name, "");

    // 5. Extension, from the first dot onwards.
    static RE_EXT: OnceLock<Regex> = OnceLock::new();
    let re_ext = RE_EXT.get_or_init(|| Regex::new(r"\..*$").unwrap());
    let name = re_ext.replace(&name, "");

    // 6. Each separator becomes one space. Runs are not collapsed.
    static RE_SEP: OnceLock<Regex> = OnceLock::new();
    let re_sep = RE_SEP.get_or_init(|| Regex::new(r"[_\-+]").unwrap());
    let name = re_sep.replace_all(&name, " ");

    name.trim().to_lowercase()
}

/// Upper-case the first character and lower-case the rest.
pub fn sentence_case(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop the last space-delimited word, as long-form article hosts append an
/// opaque post id to the slug.
pub fn drop_last_word(text: &str) -> String {
    static RE_LAST: OnceLock<Regex> = OnceLock::new();
    let re_last = RE_LAST.get_or_init(|| Regex::new(r" [^ ]*$").unwrap());
    re_last.replace(text, "").to_string()
}
