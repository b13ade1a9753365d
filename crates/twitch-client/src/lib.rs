//! Twitch integration client library.
//!
//! Provides a REST client for the legacy Kraken (v5) and Helix APIs, the
//! mapping from Twitch records to the media host's content model, and the
//! static language tables used as directory filter metadata.

pub mod api;
pub mod content;
pub mod locale;

use url::Url;

/// Default Twitch API host.
pub const DEFAULT_API_BASE: &str = "https://api.twitch.tv";

/// Default media host serving HLS playlists.
pub const DEFAULT_USHER_BASE: &str = "https://usher.ttvnw.net";

/// Immutable configuration injected into [`api::TwitchApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Value for the `Client-ID` header. Omitted when `None`.
    pub client_id: Option<String>,
    pub api_base: Url,
    pub usher_base: Url,
}

impl ClientConfig {
    /// Configuration against the public Twitch hosts.
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client_id: client_id.filter(|id| !id.is_empty()),
            api_base: Url::parse(DEFAULT_API_BASE).expect("static URL is valid"),
            usher_base: Url::parse(DEFAULT_USHER_BASE).expect("static URL is valid"),
        }
    }

    /// Override both hosts, e.g. to point at a proxy.
    pub fn with_bases(mut self, api_base: Url, usher_base: Url) -> Self {
        self.api_base = api_base;
        self.usher_base = usher_base;
        self
    }
}

/// Unified error type for the twitch-client crate.
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Twitch API error (status {status}): {body}")]
    ApiError {
        status: u16,
        /// Parsed JSON body, or the raw text as a JSON string.
        body: serde_json::Value,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}
