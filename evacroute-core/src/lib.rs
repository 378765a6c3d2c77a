//! Core optimisation engine for evacuation routing.
//!
//! Given population zones, a vehicle capacity and a safe zone, the engine
//! chooses which zones to evacuate (high severity first, maximising people
//! carried without exceeding capacity) and the visiting order that minimises
//! great-circle distance to the safe zone.
//!
//! Both searches are exact and exponential. They are intended for the small
//! inputs of a single vehicle load; hosts accepting untrusted input should
//! bound the zone count with [`RequestLimits`].
//!
//! # Examples
//! ```
//! use evacroute_core::{GeoPoint, Planner, SafeZone, Zone};
//!
//! let zones = [
//!     Zone::new(GeoPoint::new(0.0, 0.0), 10, 6.0),
//!     Zone::new(GeoPoint::new(0.0, 1.0), 5, 2.0),
//! ];
//! let plan = Planner::new().plan(&zones, 100, SafeZone::new(0.0, 2.0));
//! assert_eq!(plan.total_people, 15);
//! assert_eq!(plan.route.legs.len(), 3);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod partition;
mod permutations;
mod plan;
mod request;
mod route;
mod selector;
#[cfg(feature = "serde")]
mod wire;
mod zone;

pub use distance::{DistanceMetric, EARTH_RADIUS_KM, Haversine, round_to};
pub use partition::{SeverityGroups, partition_by_severity};
pub use permutations::{Permutations, permutations};
pub use plan::{EvacuationPlan, Planner, PlannerConfig, PlannerConfigError, TIME_DECIMALS};
pub use request::{PlanRequest, RequestLimits, RequestValidationError};
pub use route::{DISTANCE_DECIMALS, Route, RouteLeg, RouteOptimiser, Stop};
pub use selector::{Selection, select_zones};
pub use zone::{GeoPoint, HIGH_SEVERITY_THRESHOLD, SafeZone, Zone};
