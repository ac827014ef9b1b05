//! Reverse geocoding for parcel location labels.
//!
//! Talks to an OpenCage-compatible `geocode/v1/json` endpoint and reduces
//! the first result to a `"city, state, country"` label.

use landreg_core::geo::GeoPoint;
use serde::Deserialize;

use crate::error::ApiError;

/// Label used whenever no place name can be determined.
pub const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    components: PlaceComponents,
}

/// Address components of a geocoding result.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceComponents {
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl PlaceComponents {
    /// `"<settlement>, <state>, <country>"`, skipping empty parts.
    ///
    /// The settlement is the most specific of village, town and city.
    pub fn label(&self) -> String {
        let settlement = [&self.village, &self.town, &self.city]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LOCATION);

        [Some(settlement), self.state.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl Geocoder {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up a place label for `point`.
    ///
    /// Never fails: without an API key, or on any lookup error, the label is
    /// [`UNKNOWN_LOCATION`].
    pub async fn reverse(&self, point: GeoPoint) -> String {
        let Some(key) = self.api_key.as_deref() else {
            return UNKNOWN_LOCATION.to_string();
        };

        match self.lookup(point, key).await {
            Ok(Some(components)) => components.label(),
            Ok(None) => UNKNOWN_LOCATION.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, lat = point.lat, lng = point.lng, "Reverse geocoding failed");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn lookup(&self, point: GeoPoint, key: &str) -> Result<Option<PlaceComponents>, ApiError> {
        let query = format!("{}, {}", point.lat, point.lng);
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", query.as_str()), ("key", key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeocodeResponse = response.json().await?;
        Ok(parsed.results.into_iter().next().map(|r| r.components))
    }
}
