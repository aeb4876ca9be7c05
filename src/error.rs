// src/error.rs
// =============================================================================
// Errors that can end a single branch of the mirror run.
//
// Only two kinds matter to the crawler:
// - Transport: the resource could not be fetched (network, TLS, HTTP status)
// - Filesystem: the resource could not be saved (directory, file, write)
//
// Both are logged where they happen and never stop sibling branches.
// The one exception is `Client`, which happens before the crawl starts.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("cannot write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// The two failure kinds a traversal branch can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Filesystem,
}

impl MirrorError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        MirrorError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MirrorError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MirrorError::Transport { .. } | MirrorError::Status { .. } | MirrorError::Client(_) => {
                ErrorKind::Transport
            }
            MirrorError::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_transport_kind() {
        let err = MirrorError::Status {
            url: "http://example.test/x".to_string(),
            status: 404,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "http://example.test/x answered HTTP 404");
    }

    #[test]
    fn test_filesystem_kind_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = MirrorError::filesystem("/out/a.pdf", io);
        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert!(err.to_string().contains("/out/a.pdf"));
    }
}
