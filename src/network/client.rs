//! HTTP client for the Wikipedia and chat-completion endpoints

use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper with wikinote-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

/// A fetched response, body already read
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub text: String,
    pub url: String,
}

impl HttpResponse {
    /// Whether the status code is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            user_agent: format!("wikinote/{}", crate::VERSION),
        })
    }

    /// Simple GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// GET request with query parameters
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .query(params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// POST with a JSON body and optional bearer credential
    pub async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<HttpResponse> {
        let mut req_builder = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .json(body);

        if let Some(token) = bearer {
            req_builder = req_builder.bearer_auth(token);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Read a response into an HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(HttpResponse { status, text, url })
    }
}
