use std::sync::Arc;

use twitch_client::api::TwitchApiClient;

use crate::config::AddonConfig;

/// Addon state shared by all request handlers. Immutable after startup.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    client: TwitchApiClient,
    config: AddonConfig,
}

impl SharedState {
    pub fn new(config: AddonConfig) -> Self {
        let client = TwitchApiClient::new(config.client_config());
        Self {
            inner: Arc::new(SharedStateInner { client, config }),
        }
    }

    pub fn client(&self) -> &TwitchApiClient {
        &self.inner.client
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }
}
