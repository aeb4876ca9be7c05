// src/crawl/queue.rs
// =============================================================================
// This module walks the remote tree and mirrors it to disk.
//
// How it works:
// 1. Start with the root URL and the configured depth on a stack
// 2. Pop a frame, work out where it would be saved locally
// 3. If that file exists and overwrite is off, skip it without fetching
// 4. Fetch it and look at the media type:
//    - navigable: read the text, push every href found (depth - 1)
//    - downloadable: stream it into the local file
//    - anything else: nothing to do
// 5. Repeat until the stack is empty
//
// Children are pushed in reverse so they come off the stack in document
// order: the walk is the same depth-first order a recursive crawler has.
//
// A failed fetch or save ends that branch only. It is logged, counted,
// and the next frame is processed.
// =============================================================================

use crate::config::{Depth, RunConfig};
use crate::crawl::fetch::{self, FetchedResource};
use crate::error::{MirrorError, Result};
use crate::links::{canonical, extract_links, resolve_link};
use crate::mime::Disposition;
use crate::paths::derive_path;
use crate::stats::RunStatistics;
use reqwest::Client;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

// One pending visit
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    url: String,
    depth: Depth,
}

// What the visited map remembers about a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seen {
    // Navigable page, scanned (or left unscanned) with this budget
    Page(Depth),
    // Downloaded, skipped, ignored or failed: never fetched again
    Done,
}

// How a visit ended
enum Visit {
    Page(Vec<Frame>),
    Leaf,
}

// Mirrors the tree described by `config`
//
// Only fails if the HTTP client cannot be built. Once the walk starts,
// every error is absorbed into the returned statistics.
pub async fn run(config: &RunConfig) -> Result<RunStatistics> {
    let client = fetch::build_client(config.timeout)?;
    let mut stats = RunStatistics::start();

    Mirror { config, client }.walk(&mut stats).await;

    stats.finish();
    info!(
        links = stats.links_visited(),
        downloads = stats.files_downloaded(),
        bytes = stats.bytes_transferred(),
        saved_bytes = stats.total_download_size(),
        skipped = stats.skipped(),
        failures = stats.failures(),
        "mirror finished"
    );
    Ok(stats)
}

struct Mirror<'a> {
    config: &'a RunConfig,
    client: Client,
}

impl Mirror<'_> {
    async fn walk(&self, stats: &mut RunStatistics) {
        let mut pending = vec![Frame {
            url: self.config.root_url.clone(),
            depth: self.config.depth,
        }];

        let mut visited: HashMap<String, Seen> = HashMap::new();

        while let Some(frame) = pending.pop() {
            if !mark_visited(&mut visited, &frame) {
                debug!(url = %frame.url, "already visited");
                continue;
            }

            match self.visit(&frame, stats).await {
                Ok(Visit::Page(children)) => pending.extend(children.into_iter().rev()),
                Ok(Visit::Leaf) => mark_done(&mut visited, &frame),
                Err(e) => {
                    report_failure(&frame.url, &e);
                    stats.record_failure();
                    mark_done(&mut visited, &frame);
                }
            }
        }
    }

    // Handles one frame; a navigable page returns the frames it discovered
    async fn visit(&self, frame: &Frame, stats: &mut RunStatistics) -> Result<Visit> {
        let target = derive_path(&self.config.root_url, &self.config.save_dir, &frame.url);

        // Checked before fetching so an existing mirror costs no traffic
        if !self.config.overwrite && is_existing_file(&target).await {
            debug!(url = %frame.url, path = %target.display(), "file exists, skipping");
            stats.record_skip();
            return Ok(Visit::Leaf);
        }

        info!(url = %frame.url, depth = %frame.depth, "visiting");
        let resource = fetch::fetch(&self.client, &frame.url).await?;
        debug!(url = %frame.url, content_type = ?resource.content_type(), "fetched");

        let Some(media_type) = resource.media_type().map(str::to_string) else {
            debug!(url = %frame.url, "no content type, ignoring");
            return Ok(Visit::Leaf);
        };

        match self.config.content.classify(&media_type) {
            Disposition::Navigate => Ok(Visit::Page(self.navigate(frame, resource, stats).await?)),
            Disposition::Download => {
                self.download(frame, resource, &target, stats).await?;
                Ok(Visit::Leaf)
            }
            Disposition::Ignore => {
                debug!(url = %frame.url, media_type = %media_type, "neither navigable nor downloadable");
                Ok(Visit::Leaf)
            }
        }
    }

    async fn navigate(
        &self,
        frame: &Frame,
        resource: FetchedResource,
        stats: &mut RunStatistics,
    ) -> Result<Vec<Frame>> {
        if frame.depth.is_exhausted() {
            debug!(url = %frame.url, "depth exhausted, not following links");
            return Ok(Vec::new());
        }

        let text = resource.text().await?;
        stats.record_page(text.len() as u64);

        let depth = frame.depth.next();
        let children: Vec<Frame> = extract_links(&text)
            .map(|link| Frame {
                url: resolve_link(&frame.url, link),
                depth,
            })
            .collect();

        debug!(url = %frame.url, links = children.len(), "page scanned");
        Ok(children)
    }

    async fn download(
        &self,
        frame: &Frame,
        resource: FetchedResource,
        target: &Path,
        stats: &mut RunStatistics,
    ) -> Result<()> {
        info!(url = %frame.url, path = %target.display(), "saving");
        let size = resource.save_to(target).await?;
        stats.record_download(size);
        Ok(())
    }
}

// Records the visit and says whether it should happen
//
// Only a page can be visited again, and only when it now carries a larger
// depth budget than before. Cyclic link graphs stay finite even with
// unlimited depth, and a file reached twice is fetched once.
fn mark_visited(visited: &mut HashMap<String, Seen>, frame: &Frame) -> bool {
    let key = canonical(&frame.url);
    match visited.get(key) {
        Some(Seen::Done) => false,
        Some(&Seen::Page(seen)) if seen >= frame.depth => false,
        _ => {
            visited.insert(key.to_string(), Seen::Page(frame.depth));
            true
        }
    }
}

fn mark_done(visited: &mut HashMap<String, Seen>, frame: &Frame) {
    visited.insert(canonical(&frame.url).to_string(), Seen::Done);
}

async fn is_existing_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn report_failure(url: &str, error: &MirrorError) {
    match error {
        MirrorError::Transport { source, .. } => {
            warn!(
                url = %url,
                kind = ?error.kind(),
                cause = fetch::describe_transport_error(source),
                "{}",
                error
            );
        }
        _ => warn!(url = %url, kind = ?error.kind(), "{}", error),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec as a stack instead of recursion?
//    - An async fn cannot call itself without boxing the future
//    - A Vec of pending frames does the same job with push() / pop()
//    - Memory grows with the number of pending links, not with call depth
//
// 2. Why HashMap<String, Seen> and not HashSet<String>?
//    - A page first reached with a small budget may be reached again
//      with a bigger one; it should then be expanded further
//    - Files have nothing to expand, so they are marked Done and never
//      fetched twice
//
// 3. What is let-else?
//    - let Some(x) = value else { return ...; };
//    - Binds x when the pattern matches, otherwise runs the else block
//    - The else block must leave the function (return, break, ...)
//
// 4. Why &mut RunStatistics instead of a global?
//    - The borrow checker guarantees only one place updates it at a time
//    - Tests can create their own statistics without shared state
// -----------------------------------------------------------------------------
