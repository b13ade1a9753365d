use serde::{Deserialize, Deserializer, Serialize};

/// Wrapper for Twitch Helix responses.
#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    pub data: Vec<T>,
}

/// Game from GET /helix/games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelixGame {
    pub id: String,
    pub name: String,
    /// Template URL with `{width}`/`{height}` placeholders.
    #[serde(default)]
    pub box_art_url: Option<String>,
}

/// Channel from GET /kraken/channels/{id}, also embedded in stream records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KrakenChannel {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    /// Login name.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Current stream title.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub broadcaster_language: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub video_banner: Option<String>,
    #[serde(default)]
    pub profile_banner: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Live stream from GET /kraken/streams and /kraken/search/streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KrakenStream {
    #[serde(rename = "_id", default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub viewers: u64,
    pub channel: KrakenChannel,
}

#[derive(Debug, Deserialize)]
pub struct KrakenStreams {
    #[serde(rename = "_total", default)]
    pub total: u64,
    // Search answers `"streams": null` when nothing matches.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub streams: Vec<KrakenStream>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KrakenGameBox {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KrakenGame {
    #[serde(rename = "_id", default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "box", default)]
    pub box_art: KrakenGameBox,
}

/// Entry of GET /kraken/games/top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KrakenTopGame {
    pub game: KrakenGame,
    #[serde(default)]
    pub viewers: u64,
    #[serde(default)]
    pub channels: u64,
}

#[derive(Debug, Deserialize)]
pub struct KrakenTopGames {
    #[serde(rename = "_total", default)]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub top: Vec<KrakenTopGame>,
}

/// Playback authorization from GET /api/channels/{login}/access_token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackAccessToken {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub sig: Option<String>,
}

impl PlaybackAccessToken {
    /// Token and signature, when the handshake granted both.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        let sig = self.sig.as_deref().filter(|s| !s.is_empty())?;
        Some((token, sig))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

// Kraken ids are numbers in v5 responses and strings in older ones.
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(de).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(de)?.map(String::from))
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}
