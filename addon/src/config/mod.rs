//! Configuration management: loading from the environment (and `.env`).

pub mod app_config;

pub use app_config::AddonConfig;

/// Load .env from multiple candidate paths. Returns the path that loaded.
pub fn load_dotenv() -> Option<&'static str> {
    let candidates = [".env", "../.env", "../../.env"];
    candidates
        .into_iter()
        .find(|path| dotenvy::from_filename(path).is_ok())
}
