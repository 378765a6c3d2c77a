//! Evacuation planning: selection, routing and the travel-time estimate.

use thiserror::Error;

use crate::distance::round_to;
use crate::{
    DistanceMetric, HIGH_SEVERITY_THRESHOLD, Haversine, PlanRequest, RequestLimits,
    RequestValidationError, Route, RouteOptimiser, SafeZone, Zone, partition_by_severity,
    select_zones,
};

/// Decimal places kept for the travel-time estimate in minutes.
pub const TIME_DECIMALS: u32 = 1;

/// Configuration for [`Planner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Assumed average vehicle speed for the travel-time estimate.
    pub average_speed_kmh: f64,
    /// Severity at or above which zones are selected first.
    pub severity_threshold: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 25.0,
            severity_threshold: HIGH_SEVERITY_THRESHOLD,
        }
    }
}

impl PlannerConfig {
    /// Check that the settings can produce a finite travel time.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError::InvalidAverageSpeed`] when the speed is
    /// zero, negative or not finite.
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        let speed = self.average_speed_kmh;
        if speed.is_finite() && speed > 0.0 {
            Ok(())
        } else {
            Err(PlannerConfigError::InvalidAverageSpeed { speed })
        }
    }
}

/// Reasons a [`PlannerConfig`] cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerConfigError {
    /// The average speed would make the travel time infinite or negative.
    #[error("average speed must be a positive number of km/h, got {speed}")]
    InvalidAverageSpeed {
        /// Speed as configured.
        speed: f64,
    },
}

/// Outcome of a planning run.
///
/// # Examples
/// ```
/// use evacroute_core::{EvacuationPlan, SafeZone};
///
/// let plan = EvacuationPlan::empty(SafeZone::new(1.0, 2.0));
/// assert_eq!(plan.total_people, 0);
/// assert!(plan.route.legs.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::wire::PlanRecord", into = "crate::wire::PlanRecord")
)]
pub struct EvacuationPlan {
    /// People carried by the selected zones.
    pub total_people: u64,
    /// Estimated driving time in minutes.
    pub estimated_time_min: f64,
    /// Visiting order and legs.
    pub route: Route,
    /// Terminus of the route.
    pub safe_zone: SafeZone,
}

impl EvacuationPlan {
    /// A plan that moves nobody.
    #[must_use]
    pub const fn empty(safe_zone: SafeZone) -> Self {
        Self {
            total_people: 0,
            estimated_time_min: 0.0,
            route: Route::empty(),
            safe_zone,
        }
    }
}

/// Chooses which zones to evacuate and the order to visit them.
///
/// High-severity zones are selected first against the full capacity, then
/// low-severity zones fill whatever capacity is left. The combined selection
/// is routed to the safe zone by [`RouteOptimiser`].
///
/// Planning is a pure function of its inputs; a planner can be shared across
/// threads.
///
/// # Examples
/// ```
/// use evacroute_core::{GeoPoint, Planner, SafeZone, Zone};
///
/// let zones = [
///     Zone::new(GeoPoint::new(0.0, 0.0), 10, 6.0),
///     Zone::new(GeoPoint::new(0.0, 1.0), 5, 2.0),
/// ];
/// let plan = Planner::new().plan(&zones, 100, SafeZone::new(0.0, 2.0));
/// assert_eq!(plan.total_people, 15);
/// assert_eq!(plan.route.stops.last().map(|z| z.population), Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct Planner<M = Haversine> {
    optimiser: RouteOptimiser<M>,
    config: PlannerConfig,
}

impl Planner {
    /// Construct a planner with the haversine metric and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            optimiser: RouteOptimiser::new(Haversine),
            config: PlannerConfig::default(),
        }
    }

    /// Construct a planner with the haversine metric and explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError`] when `config` fails
    /// [`PlannerConfig::validate`].
    pub fn with_config(config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        Self::with_metric(Haversine, config)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: DistanceMetric> Planner<M> {
    /// Construct a planner measuring distances with `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError`] when `config` fails
    /// [`PlannerConfig::validate`].
    pub fn with_metric(metric: M, config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        Ok(Self {
            optimiser: RouteOptimiser::new(metric),
            config,
        })
    }

    /// Settings in use.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan an evacuation of `zones` with a vehicle of `capacity`.
    ///
    /// Never fails: an empty selection yields [`EvacuationPlan::empty`].
    pub fn plan(&self, zones: &[Zone], capacity: i64, safe_zone: SafeZone) -> EvacuationPlan {
        let groups = partition_by_severity(zones, self.config.severity_threshold);

        let high = select_zones(&groups.high, capacity);
        let leftover = capacity.saturating_sub_unsigned(high.population);
        let low = select_zones(&groups.low, leftover);

        if high.is_empty() && low.is_empty() {
            log::info!(
                "no zone fits capacity {capacity}; {} zones left in place",
                zones.len()
            );
            return EvacuationPlan::empty(safe_zone);
        }
        let mut selected = high.zones;
        selected.extend(low.zones);

        let total_people = selected
            .iter()
            .fold(0_u64, |sum, zone| sum.saturating_add(zone.population));
        let route = self.optimiser.optimise(&selected, safe_zone);
        let estimated_time_min = self.estimate_minutes(route.total_distance_km);

        log::info!(
            "evacuating {total_people} people from {} of {} zones over {} km (~{estimated_time_min} min)",
            selected.len(),
            zones.len(),
            route.total_distance_km,
        );

        EvacuationPlan {
            total_people,
            estimated_time_min,
            route,
            safe_zone,
        }
    }

    /// Validate `request` against `limits` and plan it.
    ///
    /// # Errors
    ///
    /// Returns [`RequestValidationError`] when the request is missing zones
    /// or a safe zone, has a non-positive capacity, exceeds `limits`, or
    /// carries non-finite coordinates.
    pub fn plan_request(
        &self,
        request: &PlanRequest,
        limits: RequestLimits,
    ) -> Result<EvacuationPlan, RequestValidationError> {
        let safe_zone = request.validate(limits)?;
        Ok(self.plan(&request.zones, request.vehicle_capacity, safe_zone))
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance over speed in floating point"
    )]
    fn estimate_minutes(&self, distance_km: f64) -> f64 {
        round_to(
            (distance_km / self.config.average_speed_kmh) * 60.0,
            TIME_DECIMALS,
        )
    }
}
