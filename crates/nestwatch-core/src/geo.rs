//! Great-circle geometry and safe-zone containment.
//!
//! Every function in this module is a pure, deterministic computation over
//! immutable inputs: no I/O, no shared state, safe to call concurrently.
//! Callers are expected to validate coordinates and radii at the boundary
//! (see [`crate::models::SafeZone::validate`]); out-of-range input produces
//! meaningless geometry rather than an error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SafeZone;

/// Mean Earth radius in meters, spherical approximation.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Speed below which a device is considered stationary (m/s).
pub const STATIONARY_SPEED_MPS: f64 = 1.0;

/// Worst accuracy still considered usable for containment display (meters).
pub const GOOD_ACCURACY_METERS: f64 = 50.0;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    /// Latitude in degrees, valid range [-90, 90].
    #[schema(example = 37.7749)]
    pub latitude: f64,

    /// Longitude in degrees, valid range [-180, 180].
    #[schema(example = -122.4194)]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether this point represents a usable fix.
    ///
    /// Coordinates must be in range, and (0, 0) exactly is treated as
    /// "no fix" since location providers emit it when unavailable.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
            && !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

/// An axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub min_lat: f64,
    /// Northern edge in degrees.
    pub max_lat: f64,
    /// Western edge in degrees.
    pub min_lng: f64,
    /// Eastern edge in degrees.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Whether the point falls inside the box (inclusive edges).
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }
}

/// Great-circle distance between two points in meters (Haversine formula).
///
/// Symmetric in its arguments, and zero (within floating tolerance) iff
/// the points coincide.
#[must_use]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Initial compass bearing from `a` to `b`, in degrees in `[0, 360)`.
///
/// Degenerate when the points coincide; returns 0 in that case.
#[must_use]
pub fn bearing_degrees(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// 8-wind compass direction for a bearing in degrees.
#[must_use]
pub fn cardinal_direction(bearing: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((bearing / 45.0).round() as usize) % 8;
    DIRECTIONS[index]
}

/// Approximate bounding box around `center` with the given radius.
///
/// Planar approximation (1 degree of latitude taken as 111 km), suitable
/// only for coarse pre-filtering of zone candidates. Containment decisions
/// must always go through [`distance_meters`] / [`is_within_zone`].
#[must_use]
pub fn bounding_box(center: GeoPoint, radius_meters: f64) -> BoundingBox {
    let lat_offset = radius_meters / 111_000.0;
    let lng_offset = radius_meters / (111_000.0 * center.latitude.to_radians().cos());

    BoundingBox {
        min_lat: center.latitude - lat_offset,
        max_lat: center.latitude + lat_offset,
        min_lng: center.longitude - lng_offset,
        max_lng: center.longitude + lng_offset,
    }
}

/// Whether `point` lies inside the safe zone.
///
/// Inactive zones never contain anything. The boundary is inclusive: a
/// point at exactly the radius is inside.
#[must_use]
pub fn is_within_zone(point: GeoPoint, zone: &SafeZone) -> bool {
    if !zone.is_active {
        return false;
    }
    distance_meters(point, zone.center()) <= f64::from(zone.radius)
}

/// First zone in input order that contains `point`, or `None`.
///
/// Overlapping zones resolve deterministically by list order, not by
/// nearest center.
#[must_use]
pub fn find_containing_zone<'a>(point: GeoPoint, zones: &'a [SafeZone]) -> Option<&'a SafeZone> {
    zones.iter().find(|zone| is_within_zone(point, zone))
}

/// Human-readable distance: meters below 1 km, otherwise kilometers.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Convert a speed from m/s to km/h.
#[must_use]
pub fn speed_kmh(speed_mps: f64) -> f64 {
    speed_mps * 3.6
}

/// Human-readable speed in km/h.
#[must_use]
pub fn format_speed(speed_mps: f64) -> String {
    format!("{:.1} km/h", speed_kmh(speed_mps))
}

/// Whether the sample's reported speed indicates a stationary device.
#[must_use]
pub fn is_stationary(speed_mps: f64) -> bool {
    speed_mps < STATIONARY_SPEED_MPS
}

/// Qualitative rating of a GPS accuracy figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyRating {
    /// Within 10 meters.
    Excellent,
    /// Within 25 meters.
    Good,
    /// Within 50 meters.
    Fair,
    /// Within 100 meters.
    Poor,
    /// Worse than 100 meters.
    VeryPoor,
}

impl AccuracyRating {
    /// Bucket an accuracy figure (meters) into a rating.
    #[must_use]
    pub fn from_meters(accuracy: f64) -> Self {
        if accuracy <= 10.0 {
            Self::Excellent
        } else if accuracy <= 25.0 {
            Self::Good
        } else if accuracy <= 50.0 {
            Self::Fair
        } else if accuracy <= 100.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

/// Whether an accuracy figure is good enough for containment display.
#[must_use]
pub fn has_good_accuracy(accuracy_meters: f64) -> bool {
    accuracy_meters <= GOOD_ACCURACY_METERS
}

/// Coarse movement classification from reported speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    /// Below 1 m/s.
    Stationary,
    /// 1 to 5 m/s.
    Walking,
    /// 5 to 15 m/s.
    RunningCycling,
    /// 15 to 50 m/s.
    Vehicle,
    /// 50 m/s and above.
    FastVehicle,
}

impl MovementStatus {
    /// Classify a speed in m/s.
    #[must_use]
    pub fn from_speed_mps(speed: f64) -> Self {
        if speed < 1.0 {
            Self::Stationary
        } else if speed < 5.0 {
            Self::Walking
        } else if speed < 15.0 {
            Self::RunningCycling
        } else if speed < 50.0 {
            Self::Vehicle
        } else {
            Self::FastVehicle
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stationary => "Stationary",
            Self::Walking => "Walking",
            Self::RunningCycling => "Running/Cycling",
            Self::Vehicle => "Vehicle",
            Self::FastVehicle => "Fast Vehicle",
        }
    }
}
