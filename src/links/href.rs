// src/links/href.rs
// =============================================================================
// This module pulls href values out of raw page text.
//
// No HTML parser is involved: directory listings and plain text indexes
// are scanned with one regular expression, so anything that looks like
// href="..." counts, wherever it appears.
//
// Rules:
// - the attribute name is matched case-insensitively (HREF="..." works)
// - the value is the shortest run up to the next double quote, and may
//   span lines
// - "./" and "../" (any case) are dropped, they only lead back up the tree
// - order is kept, duplicates are kept, nothing is resolved
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// (?i) case-insensitive, (?s) lets '.' cross newlines
static HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)href="(.*?)""#).expect("href regex is valid"));

// Lazily yields every href value in `content`, in document order
//
// The iterator borrows `content`, so calling this again on the same text
// yields the same sequence.
//
// Example:
//   content = r#"<a href="x.html">x</a> <a href="../">up</a>"#
//   yields  = "x.html"
pub fn extract_links(content: &str) -> impl Iterator<Item = &str> + '_ {
    HREF.captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|link| !is_directory_marker(link))
}

fn is_directory_marker(link: &str) -> bool {
    link.eq_ignore_ascii_case("./") || link.eq_ignore_ascii_case("../")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why once_cell::sync::Lazy?
//    - Compiling a regex is slow compared to running it
//    - Lazy compiles it the first time it is used and reuses it afterwards
//
// 2. What does impl Iterator<Item = &str> + '_ mean?
//    - We return "some iterator" without naming its complicated type
//    - The '_ says it borrows from `content`, so `content` must outlive it
//    - Nothing is scanned until the caller starts pulling items
// -----------------------------------------------------------------------------
