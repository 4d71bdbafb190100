//! App Store customer review feed.
//!
//! Fetching, decoding and recency filtering of review entries.

pub mod fetcher;
pub mod filter;
pub mod types;

pub use fetcher::{parse_entries, ReviewFetcher};
pub use filter::{is_recent, select_recent};
pub use types::{Author, Feed, FeedResponse, Label, ReviewEntry};
