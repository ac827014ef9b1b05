//! Wire models for the land-registry backend.
//!
//! Field names follow the backend's camelCase JSON.

use landreg_core::error::CoreError;
use landreg_core::geo::{Footprint, GeoPoint};
use landreg_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page size used by every paged listing.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the dashboard will request.
pub const MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// One page of a backend listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
}

impl<T> Page<T> {
    /// Apply `f` to every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            number: self.number,
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PageRequest {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Lands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageType {
    Residential,
    Agricultural,
    Commercial,
    Farming,
}

impl UsageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Agricultural => "Agricultural",
            Self::Commercial => "Commercial",
            Self::Farming => "Farming",
        }
    }
}

/// Sort orders supported by the paged land listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandSort {
    #[default]
    Id,
    Location,
    SurfaceAreaAsc,
    SurfaceAreaDesc,
}

impl LandSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Location => "location",
            Self::SurfaceAreaAsc => "surfaceAreaAsc",
            Self::SurfaceAreaDesc => "surfaceAreaDesc",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Land {
    pub id: DbId,
    #[serde(default)]
    pub location: Option<String>,
    /// `"lat, lng"` as entered when the parcel was registered.
    pub location_coordinates: String,
    #[serde(default)]
    pub surface_area: Option<f64>,
    #[serde(default)]
    pub usage_type: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub current_owner: Option<LandOwner>,
}

impl Land {
    pub fn coordinates(&self) -> Result<GeoPoint, CoreError> {
        GeoPoint::parse(&self.location_coordinates)
    }

    /// Map-preview footprint from the recorded centroid and surface area.
    pub fn footprint(&self) -> Result<Footprint, CoreError> {
        Ok(self.coordinates()?.footprint(self.surface_area))
    }
}

/// Request body for registering a parcel.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewLand {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(rename = "surfaceArea", default)]
    #[validate(range(min = 0.0))]
    pub surface_area: f64,
    pub usage_type: UsageType,
}

/// Optional filters for the land search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<UsageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub sorted_by: LandSort,
}

// ---------------------------------------------------------------------------
// Owners and history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandOwner {
    pub id: DbId,
    pub full_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub number_of_lands: Option<u32>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Request body for registering a land owner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLandOwner {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(rename = "phoneNb")]
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
    #[validate(email)]
    pub email_address: String,
    pub date_of_birth: chrono::NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipHistory {
    pub land: Land,
    pub land_owner: LandOwner,
    #[serde(default)]
    pub ownership_start: Option<Timestamp>,
    #[serde(default)]
    pub ownership_end: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub google_user: bool,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLog {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    pub action: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Username/password pair for `login` and `register`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of the password change for the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Body of the username change for the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsernameChange {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub sender_id: Option<DbId>,
    #[serde(default)]
    pub issued_at: Option<Timestamp>,
}
