//! Runtime addon configuration loaded from environment variables.

use anyhow::Context;
use twitch_client::{ClientConfig, DEFAULT_API_BASE, DEFAULT_USHER_BASE};
use url::Url;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AddonConfig {
    pub client_id: Option<String>,
    pub debug: bool,
    pub server_port: u16,
    pub api_base: Url,
    pub usher_base: Url,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            debug: false,
            server_port: 3000,
            api_base: Url::parse(DEFAULT_API_BASE).expect("static URL is valid"),
            usher_base: Url::parse(DEFAULT_USHER_BASE).expect("static URL is valid"),
        }
    }
}

impl AddonConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_base = match g("TWITCH_API_URL") {
            Some(v) => Url::parse(&v).with_context(|| format!("invalid TWITCH_API_URL: {v}"))?,
            None => defaults.api_base,
        };
        let usher_base = match g("TWITCH_USHER_URL") {
            Some(v) => Url::parse(&v).with_context(|| format!("invalid TWITCH_USHER_URL: {v}"))?,
            None => defaults.usher_base,
        };

        Ok(Self {
            client_id: g("TWITCH_CLIENT_ID"),
            debug: g("DEBUG").is_some_and(|v| parse_flag(&v)),
            server_port: parse_u16(g("SERVER_PORT").as_deref(), defaults.server_port),
            api_base,
            usher_base,
        })
    }

    /// Client configuration derived from this addon configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.client_id.clone())
            .with_bases(self.api_base.clone(), self.usher_base.clone())
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on" | "*")
}

fn parse_u16(s: Option<&str>, default: u16) -> u16 {
    s.and_then(|v| v.parse().ok()).unwrap_or(default)
}
