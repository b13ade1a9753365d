//! Broadcaster language table and the filter metadata derived from it.

use crate::content::{DirectoryFeatures, FilterFeature, FilterValue};

/// Broadcaster languages Twitch accepts in the `language` stream filter.
pub const LOCALES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("asl", "American Sign Language"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tl", "Tagalog"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
    ("zh-hk", "Cantonese"),
    ("other", "Other"),
];

pub const LANGUAGE_FILTER_ID: &str = "language";

/// Display name for a language code, case-insensitive.
pub fn language_name(code: &str) -> Option<&'static str> {
    LOCALES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Whether `code` is a language the stream listing can be filtered by.
pub fn is_known_language(code: &str) -> bool {
    language_name(code).is_some()
}

pub fn language_filter() -> FilterFeature {
    FilterFeature {
        id: LANGUAGE_FILTER_ID.into(),
        name: "Language".into(),
        values: LOCALES
            .iter()
            .map(|(key, value)| FilterValue {
                key: (*key).into(),
                value: (*value).into(),
            })
            .collect(),
    }
}

/// Features advertised on channel listings.
pub fn channel_features() -> DirectoryFeatures {
    DirectoryFeatures {
        filter: vec![language_filter()],
    }
}

/// Features advertised on the game listing, which has no filters.
pub fn game_features() -> DirectoryFeatures {
    DirectoryFeatures::default()
}
