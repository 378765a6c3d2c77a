//! Capacity-constrained zone selection.
//!
//! Chooses the subset of zones whose combined population is as large as
//! possible without exceeding the vehicle capacity. The search is an exact
//! 0/1 branch-and-bound: at every zone the "skip" branch is explored before
//! the "take" branch, and a branch is abandoned as soon as the population
//! still on offer cannot beat the best subset found so far.
//!
//! The best subset only changes on a strict improvement, so among equally
//! good subsets the first one reached under skip-before-take order wins.
//! Cost is exponential in the number of zones; callers keep inputs small.

use crate::Zone;

/// Zones chosen by [`select_zones`] and their combined population.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Chosen zones in input order.
    pub zones: Vec<Zone>,
    /// Sum of the chosen zones' populations.
    pub population: u64,
}

impl Selection {
    /// Whether no zone was chosen.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Select the zones that carry the most people within `capacity`.
///
/// A zero or negative capacity admits no zone with a positive population.
///
/// # Examples
/// ```
/// use evacroute_core::{GeoPoint, Zone, select_zones};
///
/// let origin = GeoPoint::new(0.0, 0.0);
/// let zones = [
///     Zone::new(origin, 60, 6.0),
///     Zone::new(origin, 50, 6.0),
///     Zone::new(origin, 45, 6.0),
/// ];
/// let selection = select_zones(&zones, 100);
/// assert_eq!(selection.population, 95);
/// assert_eq!(selection.zones.len(), 2);
/// ```
#[must_use]
pub fn select_zones(zones: &[Zone], capacity: i64) -> Selection {
    if zones.is_empty() {
        return Selection::default();
    }

    let space = SearchSpace::new(zones, capacity);
    let mut stats = SearchStats::default();
    let mut chosen = Vec::with_capacity(zones.len());
    let best = space.search(0, 0, &mut chosen, Best::default(), &mut stats);

    log::debug!(
        "selected {} of {} zones ({} people, capacity {capacity}); visited {} nodes, pruned {}",
        best.indices.len(),
        zones.len(),
        best.population,
        stats.visited,
        stats.pruned,
    );

    Selection {
        zones: best
            .indices
            .iter()
            .filter_map(|&idx| zones.get(idx).copied())
            .collect(),
        population: best.population,
    }
}

#[derive(Debug, Default)]
struct Best {
    population: u64,
    indices: Vec<usize>,
}

#[derive(Debug, Default)]
struct SearchStats {
    visited: u64,
    pruned: u64,
}

struct SearchSpace<'a> {
    zones: &'a [Zone],
    /// `remaining[i]` is the population of `zones[i..]`.
    remaining: Vec<u64>,
    /// `None` when the capacity is negative.
    capacity: Option<u64>,
}

impl<'a> SearchSpace<'a> {
    fn new(zones: &'a [Zone], capacity: i64) -> Self {
        let mut remaining = Vec::with_capacity(zones.len());
        let mut total = 0_u64;
        for zone in zones.iter().rev() {
            total = total.saturating_add(zone.population);
            remaining.push(total);
        }
        remaining.reverse();

        Self {
            zones,
            remaining,
            capacity: u64::try_from(capacity).ok(),
        }
    }

    /// Population after taking a zone, if it still fits.
    fn admit(&self, carried: u64, population: u64) -> Option<u64> {
        let capacity = self.capacity?;
        carried
            .checked_add(population)
            .filter(|&total| total <= capacity)
    }

    fn search(
        &self,
        index: usize,
        carried: u64,
        chosen: &mut Vec<usize>,
        best: Best,
        stats: &mut SearchStats,
    ) -> Best {
        stats.visited = stats.visited.saturating_add(1);

        let Some(zone) = self.zones.get(index) else {
            if carried > best.population {
                return Best {
                    population: carried,
                    indices: chosen.clone(),
                };
            }
            return best;
        };

        let on_offer = self.remaining.get(index).copied().unwrap_or(0);
        if carried.saturating_add(on_offer) <= best.population {
            stats.pruned = stats.pruned.saturating_add(1);
            return best;
        }

        let next = index.saturating_add(1);
        let after_skip = self.search(next, carried, chosen, best, stats);

        match self.admit(carried, zone.population) {
            Some(with_zone) => {
                chosen.push(index);
                let after_take = self.search(next, with_zone, chosen, after_skip, stats);
                chosen.pop();
                after_take
            }
            None => after_skip,
        }
    }
}
