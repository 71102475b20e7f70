//! Per-title summary fetching from the Wikipedia REST API

use super::models::SearchResult;
use crate::config::WikiSettings;
use crate::network::{HttpClient, Throttle};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

/// Placeholder when the article has no extract
pub const NO_SUMMARY: &str = "No summary available.";

/// Placeholder when the fetch itself fails
pub const FETCH_FAILED_SUMMARY: &str = "Failed to fetch summary.";

/// Fetches a one-paragraph summary for a canonical article title.
///
/// Failures never reach the caller: a failed fetch degrades to a placeholder
/// result carrying the original title, so one broken title cannot abort a
/// whole result batch.
pub struct SummaryFetcher {
    client: HttpClient,
    throttle: Arc<dyn Throttle>,
    base_url: String,
}

impl SummaryFetcher {
    pub fn new(client: HttpClient, throttle: Arc<dyn Throttle>, settings: &WikiSettings) -> Self {
        Self {
            client,
            throttle,
            base_url: settings.summary_endpoint(),
        }
    }

    /// Fetch the summary for a title; infallible by contract
    pub async fn fetch(&self, title: &str) -> SearchResult {
        self.throttle.pause().await;

        let url = format!("{}/{}", self.base_url, urlencoding::encode(title));
        match self.try_fetch(title, &url).await {
            Ok(result) => result,
            Err(e) => {
                warn!("failed to fetch summary for {:?}: {}", title, e);
                SearchResult::new(title, FETCH_FAILED_SUMMARY, "")
            }
        }
    }

    async fn try_fetch(&self, title: &str, url: &str) -> Result<SearchResult> {
        let response = self.client.get(url).await?;
        let json: serde_json::Value = serde_json::from_str(&response.text)?;

        let true_title = json
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or(title);

        let summary = json
            .get("extract")
            .and_then(|e| e.as_str())
            .unwrap_or(NO_SUMMARY);

        let page_url = json
            .get("content_urls")
            .and_then(|c| c.get("desktop"))
            .and_then(|d| d.get("page"))
            .and_then(|p| p.as_str())
            .unwrap_or("");

        Ok(SearchResult::new(true_title, summary, page_url))
    }
}
