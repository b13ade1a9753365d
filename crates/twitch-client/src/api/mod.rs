//! Twitch REST API client.
//!
//! Wraps the legacy Kraken (v5) endpoints plus the Helix game lookup with
//! `Client-ID` header injection, and reshapes the responses into the
//! host's content records.

mod channels;
mod games;
mod request;
mod streams;

pub mod models;

pub use models::{
    HelixGame, HelixResponse, KrakenChannel, KrakenGame, KrakenGameBox, KrakenStream,
    KrakenStreams, KrakenTopGame, KrakenTopGames, PlaybackAccessToken,
};
pub use channels::{channel_item, public_url};
pub use games::{BOX_ART_HEIGHT, BOX_ART_WIDTH, CHANNELS_DIRECTORY, box_art_url};
pub use request::{ApiRequest, Body, decode_body, encode_form};

use crate::{ClientConfig, TwitchError};

/// Items requested per directory page.
pub const PAGE_SIZE: u64 = 25;

/// Pinned legacy API version.
pub const ACCEPT_V5: &str = "application/vnd.twitchtv.v5+json";

/// Twitch API client. Holds only immutable configuration, so it can be
/// shared across concurrent requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TwitchApiClient {
    pub(super) http: reqwest::Client,
    pub(super) config: ClientConfig,
}

impl TwitchApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Offset a directory page starts at. An absent cursor is the first page.
pub fn page_offset(cursor: Option<u64>) -> u64 {
    cursor.unwrap_or(0)
}

/// Cursor after a stream page: exhausted once a page comes back short.
pub fn next_stream_cursor(offset: u64, returned: usize) -> Option<u64> {
    let returned = returned as u64;
    if returned < PAGE_SIZE {
        None
    } else {
        offset.checked_add(returned)
    }
}

/// Cursor after a game page: exhausted once the next offset reaches `total`.
pub fn next_game_cursor(offset: u64, total: u64) -> Option<u64> {
    offset.checked_add(PAGE_SIZE).filter(|&next| next < total)
}
