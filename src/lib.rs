//! Facade crate for the evacuation route planner.
//!
//! This crate re-exports the core domain types and the planning entry points
//! so embedders depend on a single package.

#![forbid(unsafe_code)]

pub use evacroute_core::{
    DistanceMetric, EvacuationPlan, GeoPoint, Haversine, PlanRequest, Planner, PlannerConfig,
    PlannerConfigError, RequestLimits, RequestValidationError, Route, RouteLeg, RouteOptimiser,
    SafeZone, Selection, Stop, Zone,
};
