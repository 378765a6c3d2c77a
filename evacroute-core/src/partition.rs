//! Split zones into severity groups ahead of selection.

use std::cmp::Reverse;

use crate::Zone;

/// Zones grouped by severity, each group ordered by population descending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeverityGroups {
    /// Zones at or above the severity threshold.
    pub high: Vec<Zone>,
    /// Every other zone.
    pub low: Vec<Zone>,
}

/// Order `zones` by population (largest first) and split them on `threshold`.
///
/// The sort is stable, so zones with equal population keep their input order,
/// and each group preserves the sorted order. A NaN severity never meets the
/// threshold.
///
/// # Examples
/// ```
/// use evacroute_core::{GeoPoint, Zone, partition_by_severity};
///
/// let origin = GeoPoint::new(0.0, 0.0);
/// let zones = [
///     Zone::new(origin, 10, 2.0),
///     Zone::new(origin, 30, 8.0),
///     Zone::new(origin, 20, 1.0),
/// ];
/// let groups = partition_by_severity(&zones, 5.0);
/// assert_eq!(groups.high.len(), 1);
/// assert_eq!(groups.low.iter().map(|z| z.population).collect::<Vec<_>>(), [20, 10]);
/// ```
#[must_use]
pub fn partition_by_severity(zones: &[Zone], threshold: f64) -> SeverityGroups {
    let mut sorted = zones.to_vec();
    sorted.sort_by_key(|zone| Reverse(zone.population));

    let (high, low) = sorted
        .into_iter()
        .partition(|zone| zone.meets_severity(threshold));
    SeverityGroups { high, low }
}
