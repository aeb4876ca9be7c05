// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   http-mirror <URL> <SAVE_PATH> [DEPTH]
//               [--download-content <types>] [--navigate-content <types>]
//               [--overwrite [<true|false>]] [--timeout <secs>] [--json]
//
// The parsed Cli is turned into a RunConfig (src/config.rs) by
// into_config(); nothing else in the program looks at raw arguments.
// =============================================================================

use crate::config::{Depth, RunConfig};
use crate::mime::{ContentFilter, DEFAULT_NAVIGATE_TYPES};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "http-mirror",
    version,
    about = "Mirror a hyperlinked HTTP folder tree into a local directory",
    long_about = "http-mirror looks for every href=\"...\" in the pages it visits, navigates into \
                  pages whose content type is navigable and saves everything that is downloadable. \
                  Multiple content types are separated by commas."
)]
pub struct Cli {
    /// URL to start from (http or https)
    #[arg(value_parser = parse_root_url)]
    pub url: String,

    /// Directory the files are saved into
    pub save_path: PathBuf,

    /// How many link levels to follow; 0, a negative value or nothing means unlimited.
    ///
    /// 1 scans the starting page only: files it links to are saved, linked pages are not
    /// scanned. 2 also scans the pages the starting page links to, and so on.
    #[arg(allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Content types to save (default: everything)
    #[arg(long = "download-content", alias = "downloadContent", value_delimiter = ',')]
    pub download_content: Vec<String>,

    /// Content types to scan for links
    #[arg(
        long = "navigate-content",
        alias = "navigateContent",
        value_delimiter = ',',
        default_values_t = DEFAULT_NAVIGATE_TYPES.map(String::from)
    )]
    pub navigate_content: Vec<String>,

    /// Replace files that already exist (true|false)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true",
        value_parser = parse_overwrite
    )]
    pub overwrite: bool,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the final statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // Builds the run configuration
    //
    // The save path is made absolute here so every derived file path is
    // absolute too.
    pub fn into_config(self) -> Result<RunConfig> {
        let save_dir = std::path::absolute(&self.save_path)
            .with_context(|| format!("Invalid save path: {}", self.save_path.display()))?;

        let content = ContentFilter::new(
            clean_types(self.download_content),
            clean_types(self.navigate_content),
        );

        Ok(RunConfig::new(self.url, save_dir)
            .with_depth(Depth::from_cli(self.depth))
            .with_overwrite(self.overwrite)
            .with_content(content)
            .with_timeout(self.timeout.map(Duration::from_secs)))
    }
}

// Accepts only http(s) URLs but keeps the text exactly as typed
//
// Url would normalize "http://host" to "http://host/", which would change
// the prefix the path mapper strips.
fn parse_root_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{}': {}", value, e))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("unsupported scheme '{}', use http or https", other)),
    }
}

// Only an explicit "false" turns overwriting off; anything unreadable means true
fn parse_overwrite(value: &str) -> Result<bool, String> {
    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
    Ok(!value.eq_ignore_ascii_case("false"))
}

fn clean_types(types: Vec<String>) -> Vec<String> {
    types
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
