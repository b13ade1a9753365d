use super::channels::{channel_item, public_url};
use super::*;
use crate::content::{DirectoryFilter, DirectoryResponse, Item, Source};
use crate::locale;

impl TwitchApiClient {
    /// Get one page of live channels, optionally narrowed to a game and a
    /// broadcaster language.
    pub async fn list_channels(
        &self,
        filter: &DirectoryFilter,
        cursor: Option<u64>,
    ) -> Result<DirectoryResponse, TwitchError> {
        let offset = page_offset(cursor);
        let mut query = vec![("limit", PAGE_SIZE.to_string()), ("offset", offset.to_string())];
        if let Some(game) = filter.game.as_ref().filter(|g| !g.is_empty()) {
            query.push(("game", game.clone()));
        }
        if let Some(language) = filter.language.as_ref().filter(|l| !l.is_empty()) {
            if !locale::is_known_language(language) {
                tracing::debug!(language = %language, "Filtering by unlisted language");
            }
            query.push(("language", language.clone()));
        }

        let resp: KrakenStreams = self.get_json("kraken/streams", &query).await?;
        Ok(stream_page(resp, offset))
    }

    /// Get one page of live channels matching a text query.
    pub async fn search_channels(
        &self,
        search: &str,
        cursor: Option<u64>,
    ) -> Result<DirectoryResponse, TwitchError> {
        let offset = page_offset(cursor);
        let query = [
            ("query", search.to_owned()),
            ("limit", PAGE_SIZE.to_string()),
            ("offset", offset.to_string()),
        ];

        let resp: KrakenStreams = self.get_json("kraken/search/streams", &query).await?;
        Ok(stream_page(resp, offset))
    }
}

/// Reshape a stream page. Listing items link to the channel page; the
/// playback handshake only runs for single items.
pub(super) fn stream_page(resp: KrakenStreams, offset: u64) -> DirectoryResponse {
    let returned = resp.streams.len();
    let items = resp
        .streams
        .into_iter()
        .map(|stream| {
            let source = Source::external(public_url(&stream.channel));
            let mut item = channel_item(stream.channel, vec![source]);
            if item.game.is_none() {
                item.game = stream.game.filter(|g| !g.is_empty());
            }
            Item::Channel(item)
        })
        .collect();

    DirectoryResponse {
        items,
        next_cursor: next_stream_cursor(offset, returned),
        features: locale::channel_features(),
    }
}
