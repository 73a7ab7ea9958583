// Application state module
// Immutable per-process state shared by all connections

use super::types::Config;
use crate::wiki::WikiClient;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Pooled upstream client
    pub wiki: WikiClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            config: config.clone(),
            wiki: WikiClient::new(&config.upstream)?,
        })
    }
}
