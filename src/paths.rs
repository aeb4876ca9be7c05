// src/paths.rs
// =============================================================================
// Maps a remote URL onto a file below the save directory.
//
// The mapping is plain string surgery:
// 1. Drop the root URL prefix ("http://host/pub/a/b.pdf" -> "a/b.pdf")
// 2. Turn every '/' into the platform separator
// 3. Remove any scheme marker that survives (links to other hosts keep
//    their host name as the first directory)
// 4. Join what is left onto the save directory
//
// There is no ".." handling, no percent-decoding and no length check.
// Whatever the filesystem refuses shows up later as a filesystem error
// when the crawler tries to create the file.
// =============================================================================

use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

// Derives the local path for `resource_url`
//
// Pure: the result depends only on the three arguments.
// Nothing is created on disk here.
//
// Example (unix):
//   root_url     = "http://example.test/"
//   save_dir     = "/out"
//   resource_url = "http://example.test/docs/a.pdf"
//   result       = "/out/docs/a.pdf"
pub fn derive_path(root_url: &str, save_dir: &Path, resource_url: &str) -> PathBuf {
    let relative = resource_url
        .strip_prefix(root_url)
        .unwrap_or(resource_url)
        .replace('/', MAIN_SEPARATOR_STR);

    let relative = strip_scheme_markers(relative);

    // A leading separator would make join() discard the save directory
    save_dir.join(relative.trim_start_matches(MAIN_SEPARATOR))
}

fn strip_scheme_markers(relative: String) -> String {
    let double = format!("{0}{0}", MAIN_SEPARATOR);
    relative
        .replace(&format!("http:{}", double), "")
        .replace(&format!("https:{}", double), "")
}
