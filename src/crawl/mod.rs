// src/crawl/mod.rs
// =============================================================================
// This module mirrors a remote folder tree.
//
// Features:
// - Depth-first walk starting from the root URL
// - Depth limit (or none at all)
// - Content-type based choice between "read for links" and "save to disk"
// - Skips files already on disk when overwrite is off
//
// Submodules:
// - fetch: HTTP access (client, GET, text / streamed body)
// - queue: the walk itself
// =============================================================================

mod fetch;
mod queue;

// Re-export the entry point used by main
pub use queue::run;
