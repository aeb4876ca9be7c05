// src/mime.rs
// =============================================================================
// Decides what to do with a fetched resource from its content type.
//
// Two sets drive the decision:
// - navigate: pages we read and scan for more links
//   (default: text/plain, text/html)
// - download: files we save to disk (default: empty = save anything)
//
// Matching is exact and case-sensitive. "text/html; charset=utf-8" is NOT
// "text/html"; the crawler strips parameters before asking (see
// crawl/fetch.rs), this module does not.
// =============================================================================

use std::collections::BTreeSet;

pub const DEFAULT_NAVIGATE_TYPES: [&str; 2] = ["text/plain", "text/html"];

// What the crawler should do with one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Read it as text and follow its links
    Navigate,
    /// Save it under the save directory
    Download,
    /// Neither set wants it
    Ignore,
}

// The two content-type sets of a run
//
// BTreeSet keeps the banner output sorted and stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    download: BTreeSet<String>,
    navigate: BTreeSet<String>,
}

impl ContentFilter {
    pub fn new<D, N>(download: D, navigate: N) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            download: download.into_iter().map(Into::into).collect(),
            navigate: navigate.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the download set is empty or lists `content_type`.
    pub fn is_downloadable(&self, content_type: &str) -> bool {
        self.download.is_empty() || self.download.contains(content_type)
    }

    /// True when the navigate set lists `content_type`.
    pub fn is_navigable(&self, content_type: &str) -> bool {
        self.navigate.contains(content_type)
    }

    // Navigation wins when a type is in both sets
    pub fn classify(&self, content_type: &str) -> Disposition {
        if self.is_navigable(content_type) {
            Disposition::Navigate
        } else if self.is_downloadable(content_type) {
            Disposition::Download
        } else {
            Disposition::Ignore
        }
    }

    pub fn download_list(&self) -> String {
        join(&self.download)
    }

    pub fn navigate_list(&self) -> String {
        join(&self.navigate)
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), DEFAULT_NAVIGATE_TYPES)
    }
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_download_set_accepts_everything() {
        let filter = ContentFilter::default();
        assert!(filter.is_downloadable("application/pdf"));
        assert!(filter.is_downloadable("image/png"));
        assert!(filter.is_downloadable(""));
    }

    #[test]
    fn test_default_navigate_set() {
        let filter = ContentFilter::default();
        assert!(filter.is_navigable("text/html"));
        assert!(filter.is_navigable("text/plain"));
        assert!(!filter.is_navigable("application/pdf"));
    }

    #[test]
    fn test_download_set_restricts() {
        let filter = ContentFilter::new(["application/pdf"], DEFAULT_NAVIGATE_TYPES);
        assert!(filter.is_downloadable("application/pdf"));
        assert!(!filter.is_downloadable("image/png"));
        assert_eq!(filter.classify("image/png"), Disposition::Ignore);
    }

    #[test]
    fn test_navigation_takes_precedence() {
        let filter = ContentFilter::new(["text/html"], ["text/html"]);
        assert!(filter.is_downloadable("text/html"));
        assert_eq!(filter.classify("text/html"), Disposition::Navigate);
    }

    // Parameters are not stripped here: callers pass the bare media type
    #[test]
    fn test_matching_is_exact_and_case_sensitive() {
        let filter = ContentFilter::new(["application/pdf"], DEFAULT_NAVIGATE_TYPES);
        assert!(!filter.is_navigable("text/html; charset=utf-8"));
        assert!(!filter.is_navigable("Text/HTML"));
        assert!(!filter.is_downloadable("application/PDF"));
    }

    #[test]
    fn test_lists_are_sorted() {
        let filter = ContentFilter::new(["b/x", "a/y"], ["text/plain", "text/html"]);
        assert_eq!(filter.download_list(), "a/y,b/x");
        assert_eq!(filter.navigate_list(), "text/html,text/plain");
    }
}
