// src/crawl/fetch.rs
// =============================================================================
// This module talks HTTP for the crawler.
//
// Key functionality:
// - Builds the one reqwest Client used for the whole run
// - GETs a URL and wraps the response as a FetchedResource
// - Reads a resource as text (pages) or streams it into a file (downloads)
// - Turns reqwest errors into short human-readable causes for the log
//
// A FetchedResource is owned by the visit that fetched it and is consumed
// by exactly one of text() or save_to().
// =============================================================================

use crate::error::{MirrorError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("http-mirror/", env!("CARGO_PKG_VERSION"));

// Creates the HTTP client for a run
//
// No timeout unless one is configured: a server that never answers
// stalls the run, like a browser tab that never finishes loading.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(MirrorError::Client)
}

// One fetched URL, headers read, body not yet consumed
#[derive(Debug)]
pub struct FetchedResource {
    url: String,
    content_type: Option<String>,
    response: Response,
}

impl FetchedResource {
    /// The Content-Type header as sent, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    // Bare media type: "text/html; charset=utf-8" -> "text/html"
    pub fn media_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub async fn text(self) -> Result<String> {
        let url = self.url;
        self.response
            .text()
            .await
            .map_err(|e| MirrorError::transport(&url, e))
    }

    // Streams the body into a new file at `path` and returns its size
    //
    // Parent directories are created first. If the transfer breaks half
    // way, the partial file is removed again.
    pub async fn save_to(mut self, path: &Path) -> Result<u64> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| MirrorError::filesystem(dir, e))?;
        }

        let mut file = File::create(path)
            .await
            .map_err(|e| MirrorError::filesystem(path, e))?;

        if let Err(e) = self.stream_into(&mut file, path).await {
            drop(file);
            remove_partial(path).await;
            return Err(e);
        }

        let metadata = fs::metadata(path)
            .await
            .map_err(|e| MirrorError::filesystem(path, e))?;
        Ok(metadata.len())
    }

    async fn stream_into(&mut self, file: &mut File, path: &Path) -> Result<()> {
        while let Some(chunk) = self
            .response
            .chunk()
            .await
            .map_err(|e| MirrorError::transport(&self.url, e))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| MirrorError::filesystem(path, e))?;
        }

        file.flush()
            .await
            .map_err(|e| MirrorError::filesystem(path, e))
    }
}

// Deletes a half-written download and says whether it is gone
//
// A leftover would be taken for a finished file by a later run without
// overwrite, so a failed removal is worth a warning.
async fn remove_partial(path: &Path) -> bool {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "partial file removed");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not remove partial file");
            false
        }
    }
}

// GETs `url`
//
// Anything other than a 2xx answer is an error: error pages are neither
// scanned for links nor saved.
pub async fn fetch(client: &Client, url: &str) -> Result<FetchedResource> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MirrorError::transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MirrorError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(FetchedResource {
        url: url.to_string(),
        content_type,
        response,
    })
}

// Short cause for a failed request, for the warning line in the log
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Too many redirects
// - a URL reqwest cannot even parse (naive link joining produces some)
pub fn describe_transport_error(error: &reqwest::Error) -> &'static str {
    let text = error.to_string();

    if error.is_timeout() {
        "request timed out"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_builder() {
        "invalid URL"
    } else if error.is_connect() {
        if text.contains("dns") {
            "could not resolve hostname"
        } else {
            "connection failed"
        }
    } else if error.is_body() || error.is_decode() {
        "response body interrupted"
    } else {
        "request failed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn serve(server: &MockServer, at: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_media_type_strips_parameters() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/page",
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_bytes(b"<html></html>".to_vec()),
        )
        .await;

        let client = build_client(None).unwrap();
        let resource = fetch(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap();

        assert_eq!(resource.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(resource.media_type(), Some("text/html"));
        assert_eq!(resource.text().await.unwrap(), "<html></html>");
    }

    #[tokio::test]
    async fn test_missing_content_type_has_no_media_type() {
        let server = MockServer::start().await;
        serve(&server, "/raw", ResponseTemplate::new(200)).await;

        let client = build_client(None).unwrap();
        let resource = fetch(&client, &format!("{}/raw", server.uri()))
            .await
            .unwrap();

        assert_eq!(resource.media_type(), None);
    }

    #[tokio::test]
    async fn test_error_status_is_a_transport_failure() {
        let server = MockServer::start().await;
        serve(&server, "/gone", ResponseTemplate::new(404)).await;

        let client = build_client(None).unwrap();
        let err = fetch(&client, &format!("{}/gone", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, MirrorError::Status { status: 404, .. }));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transport_failure() {
        let client = build_client(Some(Duration::from_secs(5))).unwrap();
        // Port 1 (tcpmux) is essentially never served
        let err = fetch(&client, "http://127.0.0.1:1/").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        if let MirrorError::Transport { source, .. } = &err {
            assert_eq!(describe_transport_error(source), "connection failed");
        } else {
            panic!("expected a transport error, got {:?}", err);
        }
    }

    #[tokio::test]
    async fn test_save_to_creates_directories_and_reports_size() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/a.bin",
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/octet-stream")
                .set_body_bytes(vec![7u8; 3000]),
        )
        .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("deep").join("er").join("a.bin");

        let client = build_client(None).unwrap();
        let resource = fetch(&client, &format!("{}/a.bin", server.uri()))
            .await
            .unwrap();
        let size = resource.save_to(&target).await.unwrap();

        assert_eq!(size, 3000);
        assert_eq!(std::fs::read(&target).unwrap(), vec![7u8; 3000]);
    }

    #[tokio::test]
    async fn test_save_to_a_directory_is_a_filesystem_failure() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/x",
            ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()),
        )
        .await;

        let dir = TempDir::new().unwrap();
        let client = build_client(None).unwrap();
        let resource = fetch(&client, &format!("{}/x", server.uri()))
            .await
            .unwrap();

        let err = resource.save_to(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[tokio::test]
    async fn test_remove_partial_reports_outcome() {
        let dir = TempDir::new().unwrap();
        let partial = dir.path().join("half.bin");
        std::fs::write(&partial, b"half").unwrap();

        assert!(remove_partial(&partial).await);
        assert!(!partial.exists());

        // a directory cannot be removed as a file: left in place, reported
        let stuck = dir.path().join("stuck");
        std::fs::create_dir(&stuck).unwrap();
        assert!(!remove_partial(&stuck).await);
        assert!(stuck.exists());
    }
}
