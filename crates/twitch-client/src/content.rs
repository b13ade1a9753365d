//! Records of the media host's content model.
//!
//! These are what the addon hands back to the host; field names follow the
//! host's camelCase JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upstream identifiers of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIds {
    pub id: String,
}

/// Image set of an item. Missing images serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    pub logo: Option<String>,
    pub poster: Option<String>,
    pub background: Option<String>,
}

/// Reference to playable or externally linked media of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Source {
    /// HLS manifest the host can play directly.
    Url { id: String, name: String, url: String },
    /// Web page the host opens outside its player.
    ExternalUrl { id: String, name: String, url: String },
}

impl Source {
    pub fn playable(url: String) -> Self {
        Self::Url {
            id: "main".into(),
            name: "Live".into(),
            url,
        }
    }

    pub fn external(url: String) -> Self {
        Self::ExternalUrl {
            id: "main".into(),
            name: "Twitch".into(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Url { url, .. } | Self::ExternalUrl { url, .. } => url,
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Url { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    pub id: String,
    pub ids: ItemIds,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub game: Option<String>,
    pub language: Option<String>,
    pub images: Images,
    pub sources: Vec<Source>,
}

/// Filter arguments the host sends back when a directory item is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryArgs {
    pub filter: DirectoryFilter,
}

/// Pointer to another directory, e.g. the channel listing of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryItem {
    pub id: String,
    pub name: String,
    pub images: Images,
    pub args: DirectoryArgs,
}

/// Any entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Channel(ChannelItem),
    Directory(DirectoryItem),
}

/// One selectable value of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub key: String,
    pub value: String,
}

/// Filter descriptor the host renders as a selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFeature {
    pub id: String,
    pub name: String,
    pub values: Vec<FilterValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFeatures {
    pub filter: Vec<FilterFeature>,
}

/// One page of a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    pub items: Vec<Item>,
    /// Offset of the next page, `None` once the listing is exhausted.
    pub next_cursor: Option<u64>,
    pub features: DirectoryFeatures,
}
