//! Search orchestration: candidate titles, concurrent summary fan-out,
//! single fallback retry

use super::models::SearchResult;
use super::summary::SummaryFetcher;
use crate::config::Settings;
use crate::fallback::QueryRewriter;
use crate::network::{HttpClient, Throttle};
use crate::notify::Notify;
use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves a free-text query to an ordered list of summarized results.
pub struct SearchClient {
    client: HttpClient,
    throttle: Arc<dyn Throttle>,
    summaries: SummaryFetcher,
    rewriter: QueryRewriter,
    notify: Arc<dyn Notify>,
    api_url: String,
    search_limit: u32,
    fallback_enabled: bool,
}

impl SearchClient {
    pub fn new(
        client: HttpClient,
        throttle: Arc<dyn Throttle>,
        notify: Arc<dyn Notify>,
        settings: &Settings,
    ) -> Self {
        let summaries = SummaryFetcher::new(client.clone(), throttle.clone(), &settings.wiki);
        let rewriter = QueryRewriter::new(client.clone(), notify.clone(), &settings.fallback);

        Self {
            client,
            throttle,
            summaries,
            rewriter,
            notify,
            api_url: settings.wiki.api_endpoint(),
            search_limit: settings.wiki.search_limit,
            fallback_enabled: settings.fallback.enabled,
        }
    }

    /// Execute a search.
    ///
    /// Returns one result per candidate title, in the order the search
    /// endpoint produced them. When the candidate list is empty and
    /// `allow_fallback` holds (and the fallback is enabled), the query is
    /// rewritten once and re-searched with the fallback disabled, so a
    /// rewritten query that also finds nothing simply returns empty.
    pub async fn search(&self, query: &str, allow_fallback: bool) -> Vec<SearchResult> {
        match self.search_once(query).await {
            Ok(results) => {
                if results.is_empty() && allow_fallback && self.fallback_enabled {
                    self.fallback_search(query).await
                } else {
                    results
                }
            }
            Err(e) => {
                warn!("search request for {:?} failed: {}", query, e);
                self.notify.error("Error searching Wikipedia.");
                Vec::new()
            }
        }
    }

    /// One round: candidate titles, then a joined concurrent summary fan-out
    async fn search_once(&self, query: &str) -> Result<Vec<SearchResult>> {
        let titles = self.candidate_titles(query).await?;
        debug!("query {:?} resolved to {} candidate titles", query, titles.len());

        let fetches = titles.iter().map(|title| self.summaries.fetch(title));
        Ok(join_all(fetches).await)
    }

    /// Ask the language model for a better query, then retry exactly once
    async fn fallback_search(&self, query: &str) -> Vec<SearchResult> {
        self.notify
            .info("No results found. Trying the fallback language model.");

        let Some(rewritten) = self.rewriter.rewrite(query).await else {
            return Vec::new();
        };

        info!("fallback rewrote {:?} to {:?}", query, rewritten);
        self.notify.info(&format!("Searching for:\n{rewritten}"));

        match self.search_once(&rewritten).await {
            Ok(results) => results,
            Err(e) => {
                warn!("search request for {:?} failed: {}", rewritten, e);
                self.notify.error("Error searching Wikipedia.");
                Vec::new()
            }
        }
    }

    /// Fetch candidate titles via the opensearch endpoint.
    ///
    /// The response is a JSON array whose second element is the ordered list
    /// of matching titles.
    async fn candidate_titles(&self, query: &str) -> Result<Vec<String>> {
        self.throttle.pause().await;

        let params = [
            ("action", "opensearch".to_string()),
            ("search", query.to_string()),
            ("limit", self.search_limit.to_string()),
            ("namespace", "0".to_string()),
            ("format", "json".to_string()),
        ];

        let response = self.client.get_with_params(&self.api_url, &params).await?;
        if !response.is_success() {
            anyhow::bail!("HTTP error: {}", response.status);
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)?;
        let titles = json
            .as_array()
            .and_then(|arr| arr.get(1))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NoDelay;
    use crate::notify::NoticeBoard;
    use crate::search::{FETCH_FAILED_SUMMARY, NO_SUMMARY};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings(server_uri: &str, api_key: Option<&str>) -> Settings {
        let mut settings = Settings::default();
        settings.wiki.api_url = format!("{server_uri}/w/api.php");
        settings.wiki.summary_url = format!("{server_uri}/page/summary");
        settings.fallback.api_url = format!("{server_uri}/v1/chat/completions");
        settings.fallback.api_key = api_key.map(String::from);
        settings
    }

    fn test_client(settings: &Settings) -> (SearchClient, NoticeBoard) {
        let board = NoticeBoard::new();
        let client = SearchClient::new(
            HttpClient::new().unwrap(),
            Arc::new(NoDelay),
            Arc::new(board.clone()),
            settings,
        );
        (client, board)
    }

    fn opensearch_response(query: &str, titles: &[&str]) -> serde_json::Value {
        json!([query, titles, [], []])
    }

    async fn mount_summary(server: &MockServer, encoded_title: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/page/summary/{encoded_title}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn returns_one_result_per_candidate_in_candidate_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "opensearch"))
            .and(query_param("search", "turing"))
            .and(query_param("limit", "5"))
            .and(query_param("namespace", "0"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opensearch_response(
                "turing",
                &["Alan Turing", "Turing machine"],
            )))
            .mount(&server)
            .await;

        // Delay the first title's summary so it settles after the second;
        // output order must still follow candidate order.
        Mock::given(method("GET"))
            .and(path("/page/summary/Alan%20Turing"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "title": "Alan Turing",
                        "extract": "English mathematician.",
                        "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Alan_Turing"}}
                    }))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;
        mount_summary(
            &server,
            "Turing%20machine",
            json!({
                "title": "Turing machine",
                "extract": "Abstract model of computation.",
                "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Turing_machine"}}
            }),
        )
        .await;

        let settings = test_settings(&server.uri(), None);
        let (client, board) = test_client(&settings);

        let results = client.search("turing", true).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Alan Turing");
        assert_eq!(results[1].title, "Turing machine");
        assert_ne!(results[0].summary, NO_SUMMARY);
        assert_ne!(results[1].summary, NO_SUMMARY);
        assert!(board.active().is_empty());
    }

    #[tokio::test]
    async fn failed_summary_degrades_entry_without_aborting_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opensearch_response(
                "x",
                &["Good", "Bad"],
            )))
            .mount(&server)
            .await;
        mount_summary(&server, "Good", json!({"title": "Good", "extract": "Fine."})).await;
        Mock::given(method("GET"))
            .and(path("/page/summary/Bad"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let settings = test_settings(&server.uri(), None);
        let (client, _board) = test_client(&settings);

        let results = client.search("x", true).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].summary, "Fine.");
        assert_eq!(results[1].summary, FETCH_FAILED_SUMMARY);
        assert_eq!(results[1].title, "Bad");
    }

    #[tokio::test]
    async fn fallback_rewrites_once_and_never_recurses() {
        let server = MockServer::start().await;
        // Both the original and the rewritten query yield zero candidates;
        // exactly two opensearch calls and one completion call may happen.
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(opensearch_response("any", &[])),
            )
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {"content": "{\"query\": \"rewritten term\"}"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let settings = test_settings(&server.uri(), Some("sk-test"));
        let (client, board) = test_client(&settings);

        let results = client.search("gibberish", true).await;
        assert!(results.is_empty());

        let notices: Vec<String> = board.active().iter().map(|n| n.text.clone()).collect();
        assert!(notices.iter().any(|n| n.contains("fallback language model")));
        assert!(notices.iter().any(|n| n.contains("rewritten term")));
    }

    #[tokio::test]
    async fn missing_credential_skips_completion_endpoint_entirely() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(opensearch_response("any", &[])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let settings = test_settings(&server.uri(), None);
        let (client, board) = test_client(&settings);

        let results = client.search("gibberish", true).await;
        assert!(results.is_empty());
        assert!(board
            .active()
            .iter()
            .any(|n| n.text.contains("OpenAI API key not found")));
    }

    #[tokio::test]
    async fn fallback_disabled_by_settings_returns_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(opensearch_response("any", &[])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut settings = test_settings(&server.uri(), Some("sk-test"));
        settings.fallback.enabled = false;
        let (client, board) = test_client(&settings);

        let results = client.search("gibberish", true).await;
        assert!(results.is_empty());
        assert!(board.active().is_empty());
    }

    #[tokio::test]
    async fn rewrite_on_successful_second_search_returns_its_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "teh turing"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(opensearch_response("teh turing", &[])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "Turing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opensearch_response(
                "Turing",
                &["Alan Turing"],
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "{\"query\": \"Turing\"}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_summary(
            &server,
            "Alan%20Turing",
            json!({"title": "Alan Turing", "extract": "Mathematician."}),
        )
        .await;

        let settings = test_settings(&server.uri(), Some("sk-test"));
        let (client, _board) = test_client(&settings);

        let results = client.search("teh turing", true).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Alan Turing");
    }

    #[tokio::test]
    async fn search_endpoint_failure_notifies_and_returns_empty_without_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let settings = test_settings(&server.uri(), Some("sk-test"));
        let (client, board) = test_client(&settings);

        let results = client.search("anything", true).await;
        assert!(results.is_empty());
        assert!(board
            .active()
            .iter()
            .any(|n| n.text == "Error searching Wikipedia."));
    }
}
