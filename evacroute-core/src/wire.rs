//! JSON shapes for the public types.
//!
//! Domain types convert through these records with `serde(from, into)` so
//! the wire format stays flat (`lat`/`lng` beside zone attributes) while the
//! domain keeps `geo` coordinates.

use serde::{Deserialize, Serialize};

use crate::{EvacuationPlan, GeoPoint, Route, RouteLeg, SafeZone, Stop, Zone};

/// Label attached to the safe zone when it appears as a leg destination.
pub(crate) const SAFE_ZONE_NAME: &str = "Safe Zone";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(record: LatLng) -> Self {
        Self::new(record.lat, record.lng)
    }
}

impl From<GeoPoint> for LatLng {
    fn from(point: GeoPoint) -> Self {
        Self {
            lat: point.lat(),
            lng: point.lng(),
        }
    }
}

impl From<LatLng> for SafeZone {
    fn from(record: LatLng) -> Self {
        Self::new(record.lat, record.lng)
    }
}

impl From<SafeZone> for LatLng {
    fn from(safe_zone: SafeZone) -> Self {
        safe_zone.location().into()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct ZoneRecord {
    lat: f64,
    lng: f64,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    severity: f64,
}

impl From<ZoneRecord> for Zone {
    fn from(record: ZoneRecord) -> Self {
        Self::new(
            GeoPoint::new(record.lat, record.lng),
            record.population,
            record.severity,
        )
    }
}

impl From<Zone> for ZoneRecord {
    fn from(zone: Zone) -> Self {
        Self {
            lat: zone.location.lat(),
            lng: zone.location.lng(),
            population: zone.population,
            severity: zone.severity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NamedPoint {
    lat: f64,
    lng: f64,
    name: String,
}

/// Safe-zone destinations carry a `name`; zones do not, so the named shape
/// is tried first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum StopRecord {
    SafeZone(NamedPoint),
    Zone(ZoneRecord),
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        match record {
            StopRecord::SafeZone(point) => Self::SafeZone(SafeZone::new(point.lat, point.lng)),
            StopRecord::Zone(zone) => Self::Zone(zone.into()),
        }
    }
}

impl From<Stop> for StopRecord {
    fn from(stop: Stop) -> Self {
        match stop {
            Stop::SafeZone(safe_zone) => Self::SafeZone(NamedPoint {
                lat: safe_zone.location().lat(),
                lng: safe_zone.location().lng(),
                name: SAFE_ZONE_NAME.to_owned(),
            }),
            Stop::Zone(zone) => Self::Zone(zone.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlanRecord {
    total_people: u64,
    total_distance_km: f64,
    estimated_time_min: f64,
    final_route: Vec<Zone>,
    legs: Vec<RouteLeg>,
    safe_zone: SafeZone,
}

impl From<PlanRecord> for EvacuationPlan {
    fn from(record: PlanRecord) -> Self {
        Self {
            total_people: record.total_people,
            estimated_time_min: record.estimated_time_min,
            route: Route {
                stops: record.final_route,
                total_distance_km: record.total_distance_km,
                legs: record.legs,
            },
            safe_zone: record.safe_zone,
        }
    }
}

impl From<EvacuationPlan> for PlanRecord {
    fn from(plan: EvacuationPlan) -> Self {
        Self {
            total_people: plan.total_people,
            total_distance_km: plan.route.total_distance_km,
            estimated_time_min: plan.estimated_time_min,
            final_route: plan.route.stops,
            legs: plan.route.legs,
            safe_zone: plan.safe_zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{EvacuationPlan, PlanRequest, Planner, SafeZone};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn request_fields_default_when_absent() {
        let request: PlanRequest =
            serde_json::from_value(json!({ "zones": [{ "lat": 1.0, "lng": 2.0 }] }))
                .expect("decode request");
        assert_eq!(request.vehicle_capacity, 0);
        assert_eq!(request.safe_zone, None);
        assert_eq!(request.zones[0].population, 0);
        assert_eq!(request.zones[0].severity, 0.0);
        assert_eq!(request.zones[0].location.lng(), 2.0);
    }

    #[rstest]
    fn negative_population_is_a_decode_error() {
        let result = serde_json::from_value::<PlanRequest>(json!({
            "zones": [{ "lat": 0.0, "lng": 0.0, "population": -4 }]
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn plan_serialises_in_response_shape() {
        let request: PlanRequest = serde_json::from_value(json!({
            "zones": [
                { "lat": 0.0, "lng": 0.0, "population": 10, "severity": 6 },
                { "lat": 0.0, "lng": 1.0, "population": 5, "severity": 2 }
            ],
            "vehicle_capacity": 100,
            "safe_zone": { "lat": 0.0, "lng": 2.0 }
        }))
        .expect("decode request");
        let plan = Planner::new()
            .plan_request(&request, Default::default())
            .expect("plan");

        let value = serde_json::to_value(&plan).expect("encode plan");
        assert_eq!(value["total_people"], json!(15));
        assert_eq!(value["total_distance_km"], json!(222.39));
        assert_eq!(value["estimated_time_min"], json!(533.7));
        assert_eq!(value["final_route"][1]["lng"], json!(1.0));
        assert_eq!(value["legs"][0]["from"], json!(null));
        assert_eq!(
            value["legs"][2]["to"],
            json!({ "lat": 0.0, "lng": 2.0, "name": "Safe Zone" })
        );
        assert_eq!(value["safe_zone"], json!({ "lat": 0.0, "lng": 2.0 }));
    }

    #[rstest]
    fn plan_decodes_what_it_encodes() {
        let plan = EvacuationPlan::empty(SafeZone::new(4.0, 5.0));
        let text = serde_json::to_string(&plan).expect("encode");
        let decoded: EvacuationPlan = serde_json::from_str(&text).expect("decode");
        assert_eq!(decoded, plan);
    }
}
