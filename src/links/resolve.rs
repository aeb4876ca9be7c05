// src/links/resolve.rs
// Turns an extracted href into the URL the crawler fetches next.
//
// This is naive on purpose: anything starting with "http" (any case) is
// taken as-is, everything else is glued onto the current URL. No "../"
// handling, no absolute-path handling, no query merging. Directory
// listings ("dir/" pages linking "file.bin" or "sub/") resolve correctly;
// swap this function for `url::Url::join` if general sites are needed.

pub fn resolve_link(current_url: &str, link: &str) -> String {
    if is_absolute(link) {
        link.to_string()
    } else {
        format!("{}{}", current_url, link)
    }
}

fn is_absolute(link: &str) -> bool {
    link.get(..4)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http"))
}

// Visited-set key: the fragment never reaches the server
pub fn canonical(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_link_is_unchanged() {
        assert_eq!(
            resolve_link("http://example.test/", "https://other.test/a.pdf"),
            "https://other.test/a.pdf"
        );
        assert_eq!(
            resolve_link("http://example.test/", "HTTP://other.test/"),
            "HTTP://other.test/"
        );
    }

    #[test]
    fn test_relative_link_is_concatenated() {
        assert_eq!(
            resolve_link("http://example.test/pub/", "a.pdf"),
            "http://example.test/pub/a.pdf"
        );
    }

    // No URL grammar: "/x" is appended, not resolved against the host
    #[test]
    fn test_root_relative_link_is_concatenated_too() {
        assert_eq!(
            resolve_link("http://example.test/pub/", "/x"),
            "http://example.test/pub//x"
        );
    }

    #[test]
    fn test_short_links() {
        assert_eq!(resolve_link("http://h.test/", "ht"), "http://h.test/ht");
        assert_eq!(resolve_link("http://h.test/", ""), "http://h.test/");
    }

    #[test]
    fn test_canonical_drops_fragment() {
        assert_eq!(canonical("http://h.test/a.html#top"), "http://h.test/a.html");
        assert_eq!(canonical("http://h.test/a.html"), "http://h.test/a.html");
    }
}
