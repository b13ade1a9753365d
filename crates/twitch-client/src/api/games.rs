use super::*;
use crate::content::{DirectoryArgs, DirectoryFilter, DirectoryItem, DirectoryResponse, Images, Item};
use crate::locale;

/// Box art size requested from Helix templates.
pub const BOX_ART_WIDTH: u32 = 285;
pub const BOX_ART_HEIGHT: u32 = 380;

/// Directory id the host requests to open a game's channel listing.
pub const CHANNELS_DIRECTORY: &str = "channels";

impl TwitchApiClient {
    /// Get one page of the most watched games.
    pub async fn list_games(&self, cursor: Option<u64>) -> Result<DirectoryResponse, TwitchError> {
        let offset = page_offset(cursor);
        let query = [("limit", PAGE_SIZE.to_string()), ("offset", offset.to_string())];

        let resp: KrakenTopGames = self.get_json("kraken/games/top", &query).await?;
        Ok(game_page(resp, offset))
    }

    /// Get a single game from Helix.
    pub async fn get_game(&self, id: &str) -> Result<DirectoryItem, TwitchError> {
        let resp: HelixResponse<HelixGame> =
            self.get_json("helix/games", &[("id", id.to_owned())]).await?;

        let game = resp.data.into_iter().next().ok_or_else(|| TwitchError::ApiError {
            status: 404,
            body: serde_json::json!({ "error": "Not Found", "message": format!("game {id} not found") }),
        })?;
        Ok(helix_game_item(game))
    }
}

/// Substitute fixed dimensions into a box-art template URL.
pub fn box_art_url(template: &str, width: u32, height: u32) -> String {
    template
        .replace("{width}", &width.to_string())
        .replace("{height}", &height.to_string())
}

pub(super) fn game_page(resp: KrakenTopGames, offset: u64) -> DirectoryResponse {
    let items = resp
        .top
        .into_iter()
        .map(|entry| Item::Directory(top_game_item(entry.game)))
        .collect();

    DirectoryResponse {
        items,
        next_cursor: next_game_cursor(offset, resp.total),
        features: locale::game_features(),
    }
}

fn top_game_item(game: KrakenGame) -> DirectoryItem {
    let poster = game
        .box_art
        .large
        .filter(|u| !u.is_empty())
        .or_else(|| {
            game.box_art
                .template
                .filter(|u| !u.is_empty())
                .map(|t| box_art_url(&t, BOX_ART_WIDTH, BOX_ART_HEIGHT))
        });

    DirectoryItem {
        id: CHANNELS_DIRECTORY.into(),
        images: Images {
            poster,
            ..Images::default()
        },
        args: DirectoryArgs {
            filter: DirectoryFilter {
                game: Some(game.name.clone()),
                language: None,
            },
        },
        name: game.name,
    }
}

fn helix_game_item(game: HelixGame) -> DirectoryItem {
    let poster = game
        .box_art_url
        .filter(|u| !u.is_empty())
        .map(|u| box_art_url(&u, BOX_ART_WIDTH, BOX_ART_HEIGHT));

    DirectoryItem {
        id: game.id,
        images: Images {
            poster,
            ..Images::default()
        },
        args: DirectoryArgs {
            filter: DirectoryFilter {
                game: Some(game.name.clone()),
                language: None,
            },
        },
        name: game.name,
    }
}
