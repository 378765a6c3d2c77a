//! Great-circle distance between geographic points.
//!
//! [`DistanceMetric`] is the seam the route optimiser measures legs through.
//! [`Haversine`] is the production metric.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::GeoPoint;

/// Earth radius used by [`Haversine`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Measure the distance between two points in kilometres.
///
/// Implementations must be symmetric and return zero for identical points.
/// Invalid coordinates produce a meaningless number rather than an error.
///
/// # Examples
///
/// ```rust
/// use evacroute_core::{DistanceMetric, GeoPoint};
///
/// struct Manhattan;
///
/// impl DistanceMetric for Manhattan {
///     fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
///         (a.lat() - b.lat()).abs() + (a.lng() - b.lng()).abs()
///     }
/// }
///
/// let d = Manhattan.distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 2.0));
/// assert_eq!(d, 3.0);
/// ```
pub trait DistanceMetric: Send + Sync {
    /// Return the distance from `a` to `b` in kilometres.
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// Haversine great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Examples
///
/// ```rust
/// use evacroute_core::{DistanceMetric, GeoPoint, Haversine};
///
/// let d = Haversine.distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
/// assert!((d - 111.195).abs() < 1e-3);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    #[expect(
        clippy::float_arithmetic,
        reason = "the haversine formula is floating-point trigonometry"
    )]
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let lat1 = a.lat().to_radians();
        let lat2 = b.lat().to_radians();
        let dlat = lat2 - lat1;
        let dlng = b.lng().to_radians() - a.lng().to_radians();

        let sin_dlat = (dlat / 2.0).sin();
        let sin_dlng = (dlng / 2.0).sin();
        // Rounding can push the term a hair past 1.0, which would make the
        // second square root NaN.
        let h = (sin_dlat.powi(2) + lat1.cos() * lat2.cos() * sin_dlng.powi(2)).clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Round `value` to `decimals` places.
///
/// The exact binary value is rounded, not a scaled copy of it, so a value
/// stored just below a half rounds down. Exact halves go to the even digit.
/// Non-finite values and magnitudes beyond `Decimal` range are returned
/// unchanged.
///
/// # Examples
/// ```
/// use evacroute_core::round_to;
///
/// assert_eq!(round_to(1.23456, 3), 1.235);
/// assert_eq!(round_to(1.0005, 3), 1.0);
/// assert_eq!(round_to(2.25, 1), 2.2);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}
