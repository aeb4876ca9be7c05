// src/config.rs
// =============================================================================
// The immutable settings of one mirror run.
//
// `RunConfig` is built by the CLI layer (src/cli.rs) and then only read:
// the crawler never changes it while walking the tree.
//
// `Depth` replaces the "-1 means unlimited" integer with an enum, so the
// crawler cannot accidentally count an unlimited budget down.
// =============================================================================

use crate::mime::ContentFilter;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// How many more navigation steps a branch may take
//
// Variant order matters: the derived Ord makes every Remaining(n) smaller
// than Unlimited, and Remaining values compare by their count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Depth {
    Remaining(u32),
    Unlimited,
}

impl Depth {
    /// Negative values mean unlimited, anything else counts down.
    pub fn from_sentinel(value: i64) -> Self {
        if value < 0 {
            Depth::Unlimited
        } else {
            Depth::Remaining(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }

    /// Command-line reading: absent, zero or negative all mean unlimited.
    pub fn from_cli(value: Option<i64>) -> Self {
        match value {
            Some(n) if n > 0 => Depth::from_sentinel(n),
            _ => Depth::Unlimited,
        }
    }

    /// True once a finite budget is used up.
    pub fn is_exhausted(self) -> bool {
        matches!(self, Depth::Remaining(0))
    }

    /// Budget handed to the links found on a page visited with `self`.
    pub fn next(self) -> Self {
        match self {
            Depth::Remaining(n) => Depth::Remaining(n.saturating_sub(1)),
            Depth::Unlimited => Depth::Unlimited,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Remaining(n) => write!(f, "{}", n),
            Depth::Unlimited => write!(f, "unlimited"),
        }
    }
}

// Everything a run needs to know up front
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root URL, kept exactly as given (it is the prefix stripped by the path mapper)
    pub root_url: String,
    /// Local directory the tree is mirrored into
    pub save_dir: PathBuf,
    pub depth: Depth,
    /// Replace files that already exist locally
    pub overwrite: bool,
    pub content: ContentFilter,
    /// Per-request timeout; None waits forever
    pub timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(root_url: impl Into<String>, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_url: root_url.into(),
            save_dir: save_dir.into(),
            depth: Depth::Unlimited,
            overwrite: true,
            content: ContentFilter::default(),
            timeout: None,
        }
    }

    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_content(mut self, content: ContentFilter) -> Self {
        self.content = content;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

// The "Using:" banner printed before a run starts
impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Using:")?;
        writeln!(f, "    URL:                    {}", self.root_url)?;
        writeln!(f, "    PATH:                   {}", self.save_dir.display())?;
        writeln!(f, "    Depth:                  {}", self.depth)?;
        writeln!(f, "    Overwrite:              {}", self.overwrite)?;
        writeln!(f, "    download MIME:          {}", self.content.download_list())?;
        write!(f, "    navigate MIME:          {}", self.content.navigate_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_conversion() {
        assert_eq!(Depth::from_sentinel(-1), Depth::Unlimited);
        assert_eq!(Depth::from_sentinel(0), Depth::Remaining(0));
        assert_eq!(Depth::from_sentinel(3), Depth::Remaining(3));
    }

    #[test]
    fn test_cli_depth_zero_and_negative_are_unlimited() {
        assert_eq!(Depth::from_cli(None), Depth::Unlimited);
        assert_eq!(Depth::from_cli(Some(0)), Depth::Unlimited);
        assert_eq!(Depth::from_cli(Some(-4)), Depth::Unlimited);
        assert_eq!(Depth::from_cli(Some(2)), Depth::Remaining(2));
    }

    #[test]
    fn test_next_never_goes_below_zero() {
        assert_eq!(Depth::Remaining(2).next(), Depth::Remaining(1));
        assert_eq!(Depth::Remaining(1).next(), Depth::Remaining(0));
        assert_eq!(Depth::Remaining(0).next(), Depth::Remaining(0));
        assert_eq!(Depth::Unlimited.next(), Depth::Unlimited);
    }

    #[test]
    fn test_only_zero_is_exhausted() {
        assert!(Depth::Remaining(0).is_exhausted());
        assert!(!Depth::Remaining(1).is_exhausted());
        assert!(!Depth::Unlimited.is_exhausted());
    }

    #[test]
    fn test_unlimited_is_the_largest_budget() {
        assert!(Depth::Unlimited > Depth::Remaining(u32::MAX));
        assert!(Depth::Remaining(2) > Depth::Remaining(1));
    }
}
