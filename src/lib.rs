//! Wikinote: search Wikipedia from the terminal and save results as notes.
//!
//! The core pipeline resolves a free-text query to candidate article titles,
//! fetches a one-paragraph summary per title concurrently, and persists the
//! chosen result as a markdown note. When a query yields nothing, a
//! language-model fallback can rewrite it once.

pub mod config;
pub mod fallback;
pub mod network;
pub mod notes;
pub mod notify;
pub mod search;
pub mod tui;

pub use config::Settings;
pub use notes::{NoteSaver, SaveOutcome};
pub use notify::{NoticeBoard, Notify};
pub use search::{SearchClient, SearchResult};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
