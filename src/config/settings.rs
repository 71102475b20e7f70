//! Settings structures for wikinote configuration
//!
//! There is no settings file: defaults are compiled in and selectively
//! overridden from the environment (and CLI flags in main).

use serde::{Deserialize, Serialize};

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wiki: WikiSettings,
    pub fallback: FallbackSettings,
    pub outgoing: OutgoingSettings,
    pub notes: NoteSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wiki: WikiSettings::default(),
            fallback: FallbackSettings::default(),
            outgoing: OutgoingSettings::default(),
            notes: NoteSettings::default(),
        }
    }
}

impl Settings {
    /// Merge with environment variables (WIKINOTE_* prefix, plus
    /// OPENAI_API_KEY for the fallback credential)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("WIKINOTE_LANG") {
            self.wiki.lang = val;
        }
        if let Ok(val) = std::env::var("WIKINOTE_SEARCH_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.wiki.search_limit = limit;
            }
        }
        if let Ok(val) = std::env::var("WIKINOTE_THROTTLE_MS") {
            if let Ok(ms) = val.parse() {
                self.outgoing.throttle_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("WIKINOTE_FALLBACK") {
            self.fallback.enabled = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("WIKINOTE_FALLBACK_MODEL") {
            self.fallback.model = val;
        }
        if let Ok(val) = std::env::var("WIKINOTE_NOTE_FOLDER") {
            self.notes.folder = val;
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            if !val.is_empty() {
                self.fallback.api_key = Some(val);
            }
        }
    }
}

/// Wikipedia endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    /// Opensearch API URL template
    pub api_url: String,
    /// REST summary API URL template (title appended, URL-encoded)
    pub summary_url: String,
    /// Language code substituted into the URL templates
    pub lang: String,
    /// Maximum candidate titles per search
    pub search_limit: u32,
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            api_url: "https://{lang}.wikipedia.org/w/api.php".to_string(),
            summary_url: "https://{lang}.wikipedia.org/api/rest_v1/page/summary".to_string(),
            lang: "en".to_string(),
            search_limit: 5,
        }
    }
}

impl WikiSettings {
    /// Opensearch endpoint with the language substituted
    pub fn api_endpoint(&self) -> String {
        self.api_url.replace("{lang}", &self.lang)
    }

    /// Summary endpoint with the language substituted
    pub fn summary_endpoint(&self) -> String {
        self.summary_url.replace("{lang}", &self.lang)
    }
}

/// Language-model fallback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    /// Whether the fallback query rewrite runs on empty results
    pub enabled: bool,
    /// Chat completions endpoint
    pub api_url: String,
    /// Model used for the rewrite
    pub model: String,
    /// Token budget for the rewrite response
    pub max_tokens: u32,
    /// Bearer credential; absence disables the fallback with a notice
    pub api_key: Option<String>,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 50,
            api_key: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Fixed politeness delay before each Wikipedia request, in milliseconds
    pub throttle_ms: u64,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            throttle_ms: 200,
        }
    }
}

/// Note persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteSettings {
    /// Folder notes are written into, relative to the working directory
    pub folder: String,
}

impl Default for NoteSettings {
    fn default() -> Self {
        Self {
            folder: "keyword".to_string(),
        }
    }
}
