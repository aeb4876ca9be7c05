// src/links/mod.rs
// =============================================================================
// Link handling for the crawler.
//
// Submodules:
// - href: finds href="..." values in page text
// - resolve: turns a found href into the next URL to fetch
// =============================================================================

mod href;
mod resolve;

pub use href::extract_links;
pub use resolve::{canonical, resolve_link};
