//! Shared application state for the HTTP server

use crate::client::Client;

/// State shared across all request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Resource gateway - the only path to the datastore
    pub client: Client,
}

impl AppState {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}
