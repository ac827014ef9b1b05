use std::sync::Arc;

use landreg_client::geocode::Geocoder;
use landreg_client::LandRegistryApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Anonymous backend client; handlers derive authorized copies per request.
    pub backend: LandRegistryApi,
    /// Reverse geocoder for footprint previews.
    pub geocoder: Geocoder,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let backend = LandRegistryApi::new(config.backend_url.clone());
        let geocoder = Geocoder::new(config.geocoder_url.clone(), config.geocoder_api_key.clone());
        Self {
            config: Arc::new(config),
            backend,
            geocoder,
        }
    }
}
