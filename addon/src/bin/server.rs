//! Headless addon server binary.

use twitch_addon_lib::app::SharedState;
use twitch_addon_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = twitch_addon_lib::init_foundation()?;
    tracing::info!("Starting Twitch addon");

    let state = SharedState::new(config);
    server::start_server(state).await
}
