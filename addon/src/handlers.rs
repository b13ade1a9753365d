//! The three addon actions: `directory`, `item` and `source`.
//!
//! Each request is resolved once into its shape and handed to a single
//! client method; the client's result goes back to the host unchanged.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use twitch_client::TwitchError;
use twitch_client::api::TwitchApiClient;
use twitch_client::content::{ChannelItem, DirectoryFilter, DirectoryResponse, Item, Source};

/// Per-call context supplied by the serving layer.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub addon_id: String,
}

/// Raw `directory` request as the host sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "nullable_filter")]
    pub filter: DirectoryFilter,
    #[serde(default, deserialize_with = "cursor")]
    pub cursor: Option<u64>,
}

/// Shape of a `directory` request, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryQuery {
    /// Named sub-directory, e.g. `channels`, listing live channels.
    ById {
        id: String,
        filter: DirectoryFilter,
        cursor: Option<u64>,
    },
    BySearch {
        search: String,
        cursor: Option<u64>,
    },
    /// Top-level listing of games.
    Listing { cursor: Option<u64> },
}

impl From<DirectoryRequest> for DirectoryQuery {
    fn from(req: DirectoryRequest) -> Self {
        // Empty strings count as absent: the games dashboard has id "".
        let id = req.id.filter(|id| !id.is_empty());
        let search = req.search.filter(|s| !s.trim().is_empty());

        match (id, search) {
            (Some(id), _) => Self::ById {
                id,
                filter: req.filter,
                cursor: req.cursor,
            },
            (None, Some(search)) => Self::BySearch {
                search,
                cursor: req.cursor,
            },
            (None, None) => Self::Listing { cursor: req.cursor },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemIds {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub ids: ItemIds,
}

/// `source` requests carry the item they were opened from; the payload is
/// not inspected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRequest {
    #[serde(default)]
    pub ids: Option<Value>,
}

pub async fn directory(
    client: &TwitchApiClient,
    req: DirectoryRequest,
    ctx: &ActionContext,
) -> Result<DirectoryResponse, TwitchError> {
    let query = DirectoryQuery::from(req);
    tracing::debug!(addon = %ctx.addon_id, ?query, "directory");

    match query {
        DirectoryQuery::ById { filter, cursor, .. } => client.list_channels(&filter, cursor).await,
        DirectoryQuery::BySearch { search, cursor } => {
            client.search_channels(&search, cursor).await
        }
        DirectoryQuery::Listing { cursor } => client.list_games(cursor).await,
    }
}

pub async fn item(
    client: &TwitchApiClient,
    req: ItemRequest,
    ctx: &ActionContext,
) -> Result<Item, TwitchError> {
    tracing::debug!(addon = %ctx.addon_id, id = %req.ids.id, "item");
    let channel: ChannelItem = client.get_channel(&req.ids.id).await?;
    Ok(Item::Channel(channel))
}

/// Always empty: playable sources are attached by `item`.
pub async fn source(req: SourceRequest, ctx: &ActionContext) -> Result<Vec<Source>, TwitchError> {
    tracing::debug!(addon = %ctx.addon_id, ids = ?req.ids, "source");
    Ok(Vec::new())
}

fn nullable_filter<'de, D: Deserializer<'de>>(de: D) -> Result<DirectoryFilter, D::Error> {
    Ok(Option::<DirectoryFilter>::deserialize(de)?.unwrap_or_default())
}

// Accepts null, a number, or a numeric string.
fn cursor<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid cursor: {n}"))),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid cursor: {s}"))),
        Some(other) => Err(D::Error::custom(format!("invalid cursor: {other}"))),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}
