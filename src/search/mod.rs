//! Search pipeline: candidate titles, summary fan-out, fallback hand-off

mod client;
mod models;
mod summary;

pub use client::SearchClient;
pub use models::SearchResult;
pub use summary::{SummaryFetcher, FETCH_FAILED_SUMMARY, NO_SUMMARY};
