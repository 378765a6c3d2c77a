//! Planning requests as received from callers, and their validation.

use thiserror::Error;

use crate::{SafeZone, Zone};

/// Parameters for a planning run.
///
/// Every field may be absent in the wire format; [`PlanRequest::validate`]
/// decides whether the request can be planned.
///
/// # Examples
/// ```
/// use evacroute_core::{GeoPoint, PlanRequest, RequestLimits, SafeZone, Zone};
///
/// let request = PlanRequest {
///     zones: vec![Zone::new(GeoPoint::new(0.0, 0.0), 10, 6.0)],
///     vehicle_capacity: 50,
///     safe_zone: Some(SafeZone::new(0.0, 1.0)),
/// };
/// assert!(request.validate(RequestLimits::default()).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Candidate zones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<Zone>,
    /// Seats available in the vehicle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle_capacity: i64,
    /// Route terminus.
    #[cfg_attr(feature = "serde", serde(default))]
    pub safe_zone: Option<SafeZone>,
}

/// Caller-side bounds on request size.
///
/// Selection and routing are exact and exponential, so hosts that accept
/// untrusted input should cap the zone count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestLimits {
    /// Maximum number of zones; unbounded when `None`.
    pub max_zones: Option<usize>,
}

/// Reasons a [`PlanRequest`] cannot be planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    /// No zones were supplied.
    #[error("request must contain at least one zone")]
    MissingZones,
    /// No safe zone was supplied.
    #[error("request must specify a safe zone")]
    MissingSafeZone,
    /// The vehicle capacity was zero or negative.
    #[error("vehicle capacity must be positive, got {capacity}")]
    NonPositiveCapacity {
        /// Capacity as supplied.
        capacity: i64,
    },
    /// More zones were supplied than the host accepts.
    #[error("request contains {count} zones; at most {limit} are accepted")]
    TooManyZones {
        /// Zones supplied.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// A zone has a NaN or infinite coordinate.
    #[error("zone {index} has a non-finite coordinate")]
    NonFiniteZone {
        /// Position of the zone in the request.
        index: usize,
    },
    /// The safe zone has a NaN or infinite coordinate.
    #[error("safe zone has a non-finite coordinate")]
    NonFiniteSafeZone,
}

impl PlanRequest {
    /// Check the request and return its safe zone.
    ///
    /// Checks run in order: zones present, safe zone present, positive
    /// capacity, zone count within `limits`, finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequestValidationError`] encountered.
    pub fn validate(&self, limits: RequestLimits) -> Result<SafeZone, RequestValidationError> {
        if self.zones.is_empty() {
            return Err(RequestValidationError::MissingZones);
        }
        let safe_zone = self
            .safe_zone
            .ok_or(RequestValidationError::MissingSafeZone)?;
        if self.vehicle_capacity <= 0 {
            return Err(RequestValidationError::NonPositiveCapacity {
                capacity: self.vehicle_capacity,
            });
        }
        if let Some(limit) = limits.max_zones
            && self.zones.len() > limit
        {
            return Err(RequestValidationError::TooManyZones {
                count: self.zones.len(),
                limit,
            });
        }
        if let Some(index) = self.zones.iter().position(|z| !z.location.is_finite()) {
            return Err(RequestValidationError::NonFiniteZone { index });
        }
        if !safe_zone.location().is_finite() {
            return Err(RequestValidationError::NonFiniteSafeZone);
        }
        Ok(safe_zone)
    }
}
