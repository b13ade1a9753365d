use chrono::{DateTime, Utc};
use rand::Rng;
use url::Url;

use super::request::endpoint_url;
use super::*;
use crate::content::{ChannelItem, Images, ItemIds, Source};

impl TwitchApiClient {
    /// Get one channel with exactly one source attached: a playable HLS
    /// manifest when the playback handshake is granted, otherwise the
    /// channel's public page as an external link.
    pub async fn get_channel(&self, id: &str) -> Result<ChannelItem, TwitchError> {
        let url = endpoint_url(&self.config.api_base, &["kraken", "channels", id])?;
        let channel: KrakenChannel = self.get_json(url.as_str(), &[]).await?;

        let playable = match self.playback_access_token(&channel.name).await {
            Ok(grant) => match grant.credentials() {
                Some((token, sig)) => {
                    let cache_buster = rand::thread_rng().gen_range(1.0..1_000_000.0);
                    Some(self.manifest_url(&channel.name, token, sig, cache_buster)?)
                }
                None => {
                    tracing::debug!(channel = %channel.name, "Playback token has no signature");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(channel = %channel.name, "Playback token request failed: {e}");
                None
            }
        };

        let source = match playable {
            Some(url) => Source::playable(url.into()),
            None => Source::external(public_url(&channel)),
        };
        Ok(channel_item(channel, vec![source]))
    }

    /// Exchange a channel login for playback authorization.
    pub async fn playback_access_token(
        &self,
        login: &str,
    ) -> Result<PlaybackAccessToken, TwitchError> {
        let url = endpoint_url(&self.config.api_base, &["api", "channels", login, "access_token"])?;
        self.get_json(url.as_str(), &[]).await
    }

    /// HLS manifest URL on the media host for a granted token.
    pub fn manifest_url(
        &self,
        login: &str,
        token: &str,
        sig: &str,
        cache_buster: f64,
    ) -> Result<Url, TwitchError> {
        let manifest = format!("{login}.m3u8");
        let mut url = endpoint_url(
            &self.config.usher_base,
            &["api", "channel", "hls", manifest.as_str()],
        )?;
        url.query_pairs_mut()
            .append_pair("player", "twitchweb")
            .append_pair("token", token)
            .append_pair("sig", sig)
            .append_pair("allow_audio_only", "true")
            .append_pair("allow_source", "true")
            .append_pair("type", "any")
            .append_pair("p", &cache_buster.to_string());
        Ok(url)
    }
}

/// Map an upstream channel to a host channel item.
pub fn channel_item(channel: KrakenChannel, sources: Vec<Source>) -> ChannelItem {
    let release_date = channel
        .created_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc));

    ChannelItem {
        id: channel.id.clone(),
        ids: ItemIds { id: channel.id },
        name: present(channel.display_name).unwrap_or(channel.name),
        description: present(channel.description).or(present(channel.status)),
        release_date,
        game: present(channel.game),
        language: present(channel.language).or(present(channel.broadcaster_language)),
        images: Images {
            logo: present(channel.logo),
            poster: present(channel.video_banner),
            background: present(channel.profile_banner),
        },
        sources,
    }
}

/// Public web page of a channel.
pub fn public_url(channel: &KrakenChannel) -> String {
    channel
        .url
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("https://www.twitch.tv/{}", channel.name))
}

// Empty strings from upstream count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
