//! Remote album shelf: the album index and per-folder track catalogs.
//!
//! A shelf is a static `songs/` tree served by any plain HTTP file
//! server. Two interchangeable strategies resolve it: scraping
//! directory-listing pages or reading JSON manifests.

mod fetch;
mod listing;
mod manifest;
mod model;
mod source;

pub use fetch::{FetchError, Fetcher, HttpFetcher, build_agent};
pub use model::*;
pub use source::*;
