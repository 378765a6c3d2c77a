//! Population zones, the safe zone and the points they sit on.
//!
//! Coordinates are WGS84 decimal degrees held in a [`geo::Coord`] with
//! `x = longitude` and `y = latitude`. No range clamping is performed.

use geo::Coord;

/// Severity at or above which a zone is evacuated first.
pub const HIGH_SEVERITY_THRESHOLD: f64 = 5.0;

/// A geographic position in decimal degrees.
///
/// # Examples
/// ```
/// use evacroute_core::GeoPoint;
///
/// let point = GeoPoint::new(51.5, -0.12);
/// assert_eq!(point.lat(), 51.5);
/// assert_eq!(point.lng(), -0.12);
/// assert_eq!(point.coord().x, -0.12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::wire::LatLng", into = "crate::wire::LatLng")
)]
pub struct GeoPoint(Coord<f64>);

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self(Coord { x: lng, y: lat })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.0.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.0.x
    }

    /// The underlying `geo` coordinate (`x = lng`, `y = lat`).
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.0
    }

    /// Whether both components are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self(coord)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        point.0
    }
}

/// A population centre that may be evacuated.
///
/// Zones carry no identifier; identity is their position in the input.
///
/// # Examples
/// ```
/// use evacroute_core::{GeoPoint, HIGH_SEVERITY_THRESHOLD, Zone};
///
/// let zone = Zone::new(GeoPoint::new(0.0, 0.0), 120, 7.0);
/// assert!(zone.meets_severity(HIGH_SEVERITY_THRESHOLD));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::wire::ZoneRecord", into = "crate::wire::ZoneRecord")
)]
pub struct Zone {
    /// Where the zone is.
    pub location: GeoPoint,
    /// Number of people to move.
    pub population: u64,
    /// Urgency rating.
    pub severity: f64,
}

impl Zone {
    /// Construct a zone.
    #[must_use]
    pub const fn new(location: GeoPoint, population: u64, severity: f64) -> Self {
        Self {
            location,
            population,
            severity,
        }
    }

    /// Whether the zone's severity is at or above `threshold`.
    ///
    /// A NaN severity or threshold never qualifies.
    #[must_use]
    pub fn meets_severity(&self, threshold: f64) -> bool {
        self.severity >= threshold
    }
}

/// The fixed destination every route terminates at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::wire::LatLng", into = "crate::wire::LatLng")
)]
pub struct SafeZone(GeoPoint);

impl SafeZone {
    /// Construct a safe zone from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self(GeoPoint::new(lat, lng))
    }

    /// Position of the safe zone.
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        self.0
    }
}

impl From<GeoPoint> for SafeZone {
    fn from(point: GeoPoint) -> Self {
        Self(point)
    }
}
