//! Addon registration record presented to the host.

use serde::Serialize;
use twitch_client::api::CHANNELS_DIRECTORY;

pub const ADDON_ID: &str = "twitch";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOptions {
    pub image_shape: &'static str,
    pub display_name: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchFeature {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultDirectoryFeatures {
    pub search: SearchFeature,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonManifest {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub item_types: Vec<&'static str>,
    pub default_directory_options: DirectoryOptions,
    pub default_directory_features: DefaultDirectoryFeatures,
    pub dashboards: Vec<Dashboard>,
}

impl AddonManifest {
    pub fn twitch() -> Self {
        Self {
            id: ADDON_ID,
            name: "Twitch Games",
            version: env!("CARGO_PKG_VERSION"),
            item_types: vec!["channel"],
            default_directory_options: DirectoryOptions {
                image_shape: "landscape",
                display_name: true,
            },
            default_directory_features: DefaultDirectoryFeatures {
                search: SearchFeature { enabled: true },
            },
            dashboards: vec![
                // Root directory: the games listing.
                Dashboard {
                    id: "",
                    name: "Twitch Games",
                },
                Dashboard {
                    id: CHANNELS_DIRECTORY,
                    name: "Top Twitch Channels",
                },
            ],
        }
    }
}
