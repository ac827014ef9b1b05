//! Map-preview geometry for land parcels.
//!
//! A parcel's true shape is unknown to the dashboard; only a centroid and a
//! surface area are recorded. For previews the parcel is drawn as a square
//! of equal area centered on the recorded point.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Meters per degree of latitude on a spherical earth.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Area substituted when none (or a non-positive one) is supplied.
pub const DEFAULT_AREA_SQ_M: f64 = 100.0;

/// Latitude magnitude at which the longitude correction is capped.
///
/// `cos(90°)` is zero, which would make the longitude delta infinite.
pub const MAX_CORRECTION_LATITUDE: f64 = 89.9999;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// ---------------------------------------------------------------------------
// GeoPoint
// ---------------------------------------------------------------------------

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point after range-checking both components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        validate_coordinates(lat, lng)?;
        Ok(Self { lat, lng })
    }

    /// Parse the backend's `"lat, lng"` coordinate string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let (lat, lng) = raw.split_once(',').ok_or_else(|| {
            CoreError::Validation(format!("coordinates must be \"lat, lng\", got {raw:?}"))
        })?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("invalid latitude {:?}", lat.trim())))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("invalid longitude {:?}", lng.trim())))?;

        Self::new(lat, lng)
    }

    /// Footprint of a parcel of `area_sq_m` centered on this point.
    pub fn footprint(&self, area_sq_m: Option<f64>) -> Footprint {
        compute_footprint(self.lat, self.lng, area_sq_m)
    }
}

/// Check that latitude and longitude fall within their valid ranges.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), CoreError> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return Err(CoreError::Validation(format!(
            "latitude must be between {MIN_LATITUDE} and {MAX_LATITUDE}, got {lat}"
        )));
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng) {
        return Err(CoreError::Validation(format!(
            "longitude must be between {MIN_LONGITUDE} and {MAX_LONGITUDE}, got {lng}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// Four corners of a rectangular parcel preview, wound
/// north-west, north-east, south-east, south-west.
///
/// The ring is open: the last corner is not a repeat of the first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Footprint {
    pub corners: [GeoPoint; 4],
}

impl Footprint {
    /// Corners of the bounding box, as map libraries take it.
    pub fn north_west(&self) -> GeoPoint {
        self.corners[0]
    }

    pub fn south_east(&self) -> GeoPoint {
        self.corners[2]
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> GeoPoint {
        let (lat, lng) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
        GeoPoint {
            lat: lat / 4.0,
            lng: lng / 4.0,
        }
    }

    /// The corners followed by the first corner again.
    pub fn closed_ring(&self) -> [GeoPoint; 5] {
        let [a, b, c, d] = self.corners;
        [a, b, c, d, a]
    }

    /// GeoJSON `Polygon` geometry (`[lng, lat]` positions, closed ring).
    pub fn to_geojson(&self) -> serde_json::Value {
        let ring: Vec<[f64; 2]> = self
            .closed_ring()
            .iter()
            .map(|p| [p.lng, p.lat])
            .collect();
        serde_json::json!({
            "type": "Polygon",
            "coordinates": [ring],
        })
    }
}

/// The area a footprint is drawn with: `None`, non-positive and NaN areas
/// become [`DEFAULT_AREA_SQ_M`].
pub fn effective_area(area_sq_m: Option<f64>) -> f64 {
    match area_sq_m {
        Some(a) if a > 0.0 => a,
        _ => DEFAULT_AREA_SQ_M,
    }
}

/// Approximate a parcel as a square of `area_sq_m` centered on `(lat, lng)`.
///
/// The area goes through [`effective_area`]. Input ranges are not checked
/// here; callers validate coordinates first.
pub fn compute_footprint(lat: f64, lng: f64, area_sq_m: Option<f64>) -> Footprint {
    let side = effective_area(area_sq_m).sqrt();

    let d_lat = side / METERS_PER_DEGREE;
    let correction_lat = lat.clamp(-MAX_CORRECTION_LATITUDE, MAX_CORRECTION_LATITUDE);
    let d_lng = side / (METERS_PER_DEGREE * correction_lat.to_radians().cos());

    let north = lat + d_lat / 2.0;
    let south = lat - d_lat / 2.0;
    let west = lng - d_lng / 2.0;
    let east = lng + d_lng / 2.0;

    Footprint {
        corners: [
            GeoPoint { lat: north, lng: west },
            GeoPoint { lat: north, lng: east },
            GeoPoint { lat: south, lng: east },
            GeoPoint { lat: south, lng: west },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn round5(v: f64) -> f64 {
        (v * 1e5).round() / 1e5
    }

    #[test]
    fn known_parcel_matches_expected_corners() {
        let fp = compute_footprint(40.0, -75.0, Some(400.0));
        let expected = [
            (40.00009, -75.00012),
            (40.00009, -74.99988),
            (39.99991, -74.99988),
            (39.99991, -75.00012),
        ];
        for (corner, (lat, lng)) in fp.corners.iter().zip(expected) {
            assert!((round5(corner.lat) - lat).abs() < EPS, "lat {corner:?}");
            assert!((round5(corner.lng) - lng).abs() < EPS, "lng {corner:?}");
        }
    }

    #[test]
    fn centroid_is_the_source_point() {
        for &(lat, lng, area) in &[
            (0.0, 0.0, 1.0),
            (51.5, -0.12, 2_500.0),
            (-33.9, 151.2, 1_000_000.0),
            (64.1, -21.9, 37.5),
        ] {
            let c = compute_footprint(lat, lng, Some(area)).centroid();
            assert!((c.lat - lat).abs() < EPS);
            assert!((c.lng - lng).abs() < EPS);
        }
    }

    #[test]
    fn missing_or_non_positive_area_uses_default() {
        let default = compute_footprint(10.0, 20.0, Some(DEFAULT_AREA_SQ_M));
        assert_eq!(compute_footprint(10.0, 20.0, None), default);
        assert_eq!(compute_footprint(10.0, 20.0, Some(0.0)), default);
        assert_eq!(compute_footprint(10.0, 20.0, Some(-50.0)), default);
        assert_eq!(compute_footprint(10.0, 20.0, Some(f64::NAN)), default);
    }

    #[test]
    fn effective_area_substitutes_default() {
        assert_eq!(effective_area(None), DEFAULT_AREA_SQ_M);
        assert_eq!(effective_area(Some(0.0)), DEFAULT_AREA_SQ_M);
        assert_eq!(effective_area(Some(f64::NAN)), DEFAULT_AREA_SQ_M);
        assert_eq!(effective_area(Some(250.0)), 250.0);
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = compute_footprint(12.34, 56.78, Some(900.0));
        let b = compute_footprint(12.34, 56.78, Some(900.0));
        assert_eq!(a, b);
    }

    #[test]
    fn winding_is_nw_ne_se_sw() {
        let fp = compute_footprint(5.0, 5.0, Some(10_000.0));
        let [nw, ne, se, sw] = fp.corners;
        assert!(nw.lat > 5.0 && nw.lng < 5.0);
        assert!(ne.lat > 5.0 && ne.lng > 5.0);
        assert!(se.lat < 5.0 && se.lng > 5.0);
        assert!(sw.lat < 5.0 && sw.lng < 5.0);
        assert_eq!(fp.north_west(), nw);
        assert_eq!(fp.south_east(), se);
    }

    #[test]
    fn side_length_matches_area_at_equator() {
        let fp = compute_footprint(0.0, 0.0, Some(10_000.0));
        let height_m = (fp.corners[0].lat - fp.corners[3].lat) * METERS_PER_DEGREE;
        let width_m = (fp.corners[1].lng - fp.corners[0].lng) * METERS_PER_DEGREE;
        assert!((height_m - 100.0).abs() < 1e-6);
        assert!((width_m - 100.0).abs() < 1e-6);
    }

    #[test]
    fn poles_produce_finite_symmetric_corners() {
        for lat in [90.0, -90.0] {
            let fp = compute_footprint(lat, 0.0, Some(100.0));
            assert!(fp.corners.iter().all(|p| p.lat.is_finite() && p.lng.is_finite()));
            let c = fp.centroid();
            assert!((c.lat - lat).abs() < EPS);
            assert!(c.lng.abs() < EPS);
        }
    }

    #[test]
    fn closed_ring_repeats_first_corner() {
        let fp = compute_footprint(1.0, 2.0, None);
        let ring = fp.closed_ring();
        assert_eq!(ring[0], ring[4]);
        assert_ne!(fp.corners[0], fp.corners[3]);
    }

    #[test]
    fn geojson_uses_lng_lat_order() {
        let fp = compute_footprint(40.0, -75.0, Some(400.0));
        let json = fp.to_geojson();
        assert_eq!(json["type"], "Polygon");
        let ring = json["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0][0].as_f64().unwrap(), fp.corners[0].lng);
        assert_eq!(ring[0][1].as_f64().unwrap(), fp.corners[0].lat);
    }

    #[test]
    fn parse_accepts_backend_coordinate_string() {
        let p = GeoPoint::parse(" 40.5 , -75.25").unwrap();
        assert_eq!(p, GeoPoint { lat: 40.5, lng: -75.25 });
    }

    #[test]
    fn parse_rejects_garbage_and_out_of_range() {
        assert!(GeoPoint::parse("40.5").is_err());
        assert!(GeoPoint::parse("north, -75").is_err());
        assert!(GeoPoint::parse("91, 0").is_err());
        assert!(GeoPoint::parse("0, 181").is_err());
    }

    #[test]
    fn new_accepts_boundary_values() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }
}
