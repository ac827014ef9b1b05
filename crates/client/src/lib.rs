//! HTTP client library for the land-registry backend.
//!
//! Provides typed models for lands, owners, ownership history, users and
//! notifications, a bearer-authenticated REST wrapper and a reverse
//! geocoder for labelling parcel locations.

pub mod api;
pub mod error;
pub mod geocode;
pub mod models;

pub use api::LandRegistryApi;
pub use error::ApiError;
