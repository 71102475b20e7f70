//! Language-model query rewrite for zero-result searches
//!
//! When a search yields no candidate titles, the original query is handed to
//! a chat-completion endpoint that proposes a better opensearch keyword. The
//! rewrite happens at most once per user search; the caller re-searches with
//! the fallback disabled.

use crate::config::FallbackSettings;
use crate::network::HttpClient;
use crate::notify::Notify;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

/// Chat completion response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Proposes a replacement query when a search comes back empty.
pub struct QueryRewriter {
    client: HttpClient,
    notify: Arc<dyn Notify>,
    settings: FallbackSettings,
}

impl QueryRewriter {
    pub fn new(client: HttpClient, notify: Arc<dyn Notify>, settings: &FallbackSettings) -> Self {
        Self {
            client,
            notify,
            settings: settings.clone(),
        }
    }

    /// Ask the model for a better query string.
    ///
    /// Returns `None` on any failure: missing credential, transport error,
    /// unexpected response shape, or a model answer without a `query` field.
    /// Every failure surfaces as an error notice; nothing propagates.
    pub async fn rewrite(&self, query: &str) -> Option<String> {
        let Some(api_key) = self.settings.api_key.clone() else {
            self.notify.error(
                "OpenAI API key not found. Set the OPENAI_API_KEY environment variable.",
            );
            return None;
        };

        match self.request_rewrite(&api_key, query).await {
            Ok(Some(rewritten)) => Some(rewritten),
            Ok(None) => {
                self.notify.error("The model failed to respond.");
                None
            }
            Err(e) => {
                warn!("fallback rewrite failed: {}", e);
                self.notify
                    .error("Error searching Wikipedia using the fallback language model.");
                None
            }
        }
    }

    async fn request_rewrite(&self, api_key: &str, query: &str) -> Result<Option<String>> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: rewrite_prompt(query),
            }],
            max_tokens: self.settings.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post_json(
                &self.settings.api_url,
                &serde_json::to_value(&request)?,
                Some(api_key),
            )
            .await?;

        if !response.is_success() {
            anyhow::bail!("HTTP error: {}", response.status);
        }

        let parsed: ChatResponse = serde_json::from_str(&response.text)?;
        let content = &parsed
            .choices
            .first()
            .ok_or_else(|| anyhow!("no choices in completion response"))?
            .message
            .content;
        debug!("fallback model answered: {}", content);

        // The model is constrained to a JSON object; the query lives in its
        // `query` field. A well-formed object without that field is a model
        // failure, not a transport failure.
        let answer: serde_json::Value = serde_json::from_str(content)?;
        Ok(answer
            .get("query")
            .and_then(|q| q.as_str())
            .map(String::from))
    }
}

/// Fixed instructional prompt embedding the user's query
fn rewrite_prompt(query: &str) -> String {
    format!(
        "The user is attempting to find a Wikipedia article and needs your assistance.\n\n\
         Given the following query by the user:\n\"{query}\"\n\n\
         Ponder on what the user is trying to find and suggest the proper keyword to query \
         in an opensearch query to the English Wikipedia official API.\n\n\
         Answer in a JSON format containing the `query` attribute."
    )
}
