//! Routes through selected zones to the safe zone.
//!
//! [`RouteOptimiser`] tries every visiting order of the selected zones and
//! keeps the one with the shortest total distance, including the final hop
//! into the safe zone. The vehicle's starting position is not modelled: the
//! first leg has no origin and costs nothing.

use crate::distance::round_to;
use crate::{DistanceMetric, Haversine, SafeZone, Zone, permutations};

/// Decimal places kept for distances in kilometres.
pub const DISTANCE_DECIMALS: u32 = 3;

/// Where a leg ends.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::wire::StopRecord", into = "crate::wire::StopRecord")
)]
pub enum Stop {
    /// A selected zone.
    Zone(Zone),
    /// The route terminus.
    SafeZone(SafeZone),
}

/// One directed hop of a route.
///
/// Distances are rounded to three decimals independently: `cumulative_km`
/// is the unrounded running total rounded at this leg, not a sum of the
/// rounded leg distances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    /// Previous zone; `None` for the first leg.
    pub from: Option<Zone>,
    /// Destination of the hop.
    pub to: Stop,
    /// Length of this hop in kilometres.
    pub distance_km: f64,
    /// Distance from the start of the route through this hop.
    pub cumulative_km: f64,
}

/// An ordered visit of the selected zones ending at the safe zone.
///
/// # Examples
/// ```
/// use evacroute_core::Route;
///
/// let route = Route::empty();
/// assert!(route.stops.is_empty());
/// assert!(route.legs.is_empty());
/// assert_eq!(route.total_distance_km, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    /// Zones in visiting order.
    pub stops: Vec<Zone>,
    /// Total length in kilometres, rounded from the unrounded sum.
    pub total_distance_km: f64,
    /// One leg per stop plus the final hop into the safe zone.
    pub legs: Vec<RouteLeg>,
}

impl Route {
    /// A route with nothing to visit.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stops: Vec::new(),
            total_distance_km: 0.0,
            legs: Vec::new(),
        }
    }
}

/// Exact shortest-order search over a small set of zones.
///
/// Runs in `O(k! * k)` for `k` zones.
#[derive(Debug, Default, Clone)]
pub struct RouteOptimiser<M = Haversine> {
    metric: M,
}

impl<M: DistanceMetric> RouteOptimiser<M> {
    /// Construct an optimiser measuring legs with `metric`.
    pub const fn new(metric: M) -> Self {
        Self { metric }
    }

    /// Find the visiting order of `zones` with the shortest total distance.
    ///
    /// Orders are enumerated with [`permutations`]; the first order reaching
    /// the minimum is kept. An empty input yields [`Route::empty`].
    ///
    /// # Examples
    /// ```
    /// use evacroute_core::{GeoPoint, Haversine, RouteOptimiser, SafeZone, Zone};
    ///
    /// let zones = [
    ///     Zone::new(GeoPoint::new(0.0, 1.0), 5, 2.0),
    ///     Zone::new(GeoPoint::new(0.0, 0.0), 10, 6.0),
    /// ];
    /// let route = RouteOptimiser::new(Haversine).optimise(&zones, SafeZone::new(0.0, 2.0));
    /// assert_eq!(route.stops[0].population, 10);
    /// assert_eq!(route.legs.len(), 3);
    /// ```
    pub fn optimise(&self, zones: &[Zone], safe_zone: SafeZone) -> Route {
        if zones.is_empty() {
            return Route::empty();
        }

        let mut best: Option<(f64, Vec<usize>)> = None;
        let mut evaluated = 0_u64;
        for order in permutations(zones.len()) {
            evaluated = evaluated.saturating_add(1);
            let total = self.order_distance(zones, &order, safe_zone);
            if best
                .as_ref()
                .is_none_or(|(best_total, _)| total < *best_total)
            {
                best = Some((total, order));
            }
        }

        let Some((total, order)) = best else {
            return Route::empty();
        };
        if !total.is_finite() {
            log::warn!(
                "shortest route over {} zones has non-finite length {total}",
                zones.len()
            );
        }
        log::debug!(
            "evaluated {evaluated} orderings of {} zones; shortest is {total} km",
            zones.len()
        );

        let stops: Vec<Zone> = order
            .iter()
            .filter_map(|&idx| zones.get(idx).copied())
            .collect();
        let legs = self.legs(&stops, safe_zone);
        Route {
            stops,
            total_distance_km: round_to(total, DISTANCE_DECIMALS),
            legs,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "route length is a floating-point sum of leg distances"
    )]
    fn order_distance(&self, zones: &[Zone], order: &[usize], safe_zone: SafeZone) -> f64 {
        let mut stops = order.iter().filter_map(|&idx| zones.get(idx));
        let Some(first) = stops.next() else {
            return 0.0;
        };

        let mut total = 0.0;
        let mut previous = first;
        for stop in stops {
            total += self.metric.distance_km(previous.location, stop.location);
            previous = stop;
        }
        total + self.metric.distance_km(previous.location, safe_zone.location())
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "cumulative distance is a floating-point running sum"
    )]
    fn legs(&self, stops: &[Zone], safe_zone: SafeZone) -> Vec<RouteLeg> {
        let mut legs = Vec::with_capacity(stops.len().saturating_add(1));
        let mut cumulative = 0.0;
        let mut previous: Option<&Zone> = None;

        for stop in stops {
            let distance = previous.map_or(0.0, |from| {
                self.metric.distance_km(from.location, stop.location)
            });
            cumulative += distance;
            legs.push(RouteLeg {
                from: previous.copied(),
                to: Stop::Zone(*stop),
                distance_km: round_to(distance, DISTANCE_DECIMALS),
                cumulative_km: round_to(cumulative, DISTANCE_DECIMALS),
            });
            previous = Some(stop);
        }

        if let Some(last) = previous {
            let distance = self.metric.distance_km(last.location, safe_zone.location());
            cumulative += distance;
            legs.push(RouteLeg {
                from: Some(*last),
                to: Stop::SafeZone(safe_zone),
                distance_km: round_to(distance, DISTANCE_DECIMALS),
                cumulative_km: round_to(cumulative, DISTANCE_DECIMALS),
            });
        }
        legs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;
    use rstest::{fixture, rstest};

    /// Distance along the longitude axis only, for hand-checkable routes.
    struct LngAxis;

    impl DistanceMetric for LngAxis {
        #[expect(clippy::float_arithmetic, reason = "test metric")]
        fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
            (a.lng() - b.lng()).abs()
        }
    }

    fn zone_at(lng: f64) -> Zone {
        Zone::new(GeoPoint::new(0.0, lng), 1, 1.0)
    }

    #[fixture]
    fn safe_zone() -> SafeZone {
        SafeZone::new(0.0, 10.0)
    }

    #[rstest]
    fn empty_selection_has_no_legs(safe_zone: SafeZone) {
        let route = RouteOptimiser::new(LngAxis).optimise(&[], safe_zone);
        assert_eq!(route, Route::empty());
    }

    #[rstest]
    fn single_zone_has_two_legs(safe_zone: SafeZone) {
        let route = RouteOptimiser::new(LngAxis).optimise(&[zone_at(4.0)], safe_zone);
        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.legs[0].from, None);
        assert_eq!(route.legs[0].distance_km, 0.0);
        assert_eq!(route.legs[1].to, Stop::SafeZone(safe_zone));
        assert_eq!(route.legs[1].distance_km, 6.0);
        assert_eq!(route.total_distance_km, 6.0);
    }

    #[rstest]
    fn visits_farthest_zone_first(safe_zone: SafeZone) {
        let zones = [zone_at(8.0), zone_at(2.0), zone_at(5.0)];
        let route = RouteOptimiser::new(LngAxis).optimise(&zones, safe_zone);
        let order: Vec<f64> = route.stops.iter().map(|z| z.location.lng()).collect();
        assert_eq!(order, [2.0, 5.0, 8.0]);
        assert_eq!(route.total_distance_km, 8.0);
    }

    #[rstest]
    fn legs_chain_consecutive_stops(safe_zone: SafeZone) {
        let zones = [zone_at(8.0), zone_at(2.0), zone_at(5.0)];
        let route = RouteOptimiser::new(LngAxis).optimise(&zones, safe_zone);
        assert_eq!(route.legs.len(), zones.len() + 1);
        for pair in route.legs.windows(2) {
            let [earlier, later] = pair else { continue };
            assert_eq!(later.from.map(Stop::Zone), Some(earlier.to));
            assert!(later.cumulative_km >= earlier.cumulative_km);
        }
        let last = route.legs.last().expect("final leg");
        assert_eq!(last.cumulative_km, route.total_distance_km);
    }

    #[rstest]
    fn equal_length_orders_keep_the_first_enumerated(safe_zone: SafeZone) {
        // Both zones sit at the same spot, so every order ties.
        let zones = [
            Zone::new(GeoPoint::new(0.0, 3.0), 1, 1.0),
            Zone::new(GeoPoint::new(0.0, 3.0), 2, 1.0),
        ];
        let route = RouteOptimiser::new(LngAxis).optimise(&zones, safe_zone);
        let populations: Vec<u64> = route.stops.iter().map(|z| z.population).collect();
        assert_eq!(populations, [1, 2]);
    }

    #[rstest]
    fn haversine_route_rounds_each_leg() {
        let zones = [zone_at(0.0), zone_at(1.0)];
        let route = RouteOptimiser::new(Haversine).optimise(&zones, SafeZone::new(0.0, 2.0));
        assert_eq!(route.legs[1].distance_km, 111.195);
        assert_eq!(route.legs[2].cumulative_km, 222.39);
        assert_eq!(route.total_distance_km, 222.39);
    }
}
