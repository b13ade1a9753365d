//! Twitch addon for the media-browser host.
//!
//! Serves the addon manifest and the `directory`, `item` and `source`
//! actions over HTTP, backed by [`twitch_client`].

pub mod app;
pub mod config;
pub mod handlers;
pub mod manifest;
pub mod server;

use tracing_subscriber::EnvFilter;

use config::AddonConfig;

/// Load `.env`, read the configuration and start tracing.
pub fn init_foundation() -> Result<AddonConfig, anyhow::Error> {
    let dotenv = config::load_dotenv();
    let config = AddonConfig::load()?;
    init_tracing(config.debug);

    match dotenv {
        Some(path) => tracing::info!("Loaded .env from: {path}"),
        None => tracing::info!("No .env file found, using system environment variables"),
    }
    if config.client_id.is_none() {
        tracing::warn!("TWITCH_CLIENT_ID is not set; Twitch will reject most requests");
    }

    tracing::info!(
        port = config.server_port,
        api = %config.api_base,
        "Configuration loaded"
    );
    Ok(config)
}

/// `RUST_LOG` wins when set; otherwise `DEBUG` raises the default level.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
