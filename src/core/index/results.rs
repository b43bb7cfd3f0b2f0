use crate::core::index::distance::Distance;
use crate::core::index::point::Label;

/// Number of neighbors retained per query.
pub const RESULT_CAPACITY: usize = 3;

/// A single retrieved neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub dist_sq: Distance,
    pub label: Label,
}

/// Bounded, distance-sorted per-query result list.
///
/// Holds at most [`RESULT_CAPACITY`] neighbors in ascending distance order in
/// fixed storage, so a query never allocates for its results. Once full,
/// inserting a neighbor that is not strictly closer than the current worst is
/// a no-op; ties keep the incumbent.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    slots: [Neighbor; RESULT_CAPACITY],
    len: usize,
}

impl PartialEq for NearestNeighbors {
    fn eq(&self, other: &Self) -> bool {
        self.slots[..self.len] == other.slots[..other.len]
    }
}

impl Eq for NearestNeighbors {}

impl NearestNeighbors {
    /// Creates an empty result list.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: [Neighbor { dist_sq: 0, label: 0 }; RESULT_CAPACITY], len: 0 }
    }

    /// Number of neighbors currently held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no neighbor has been inserted yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once [`RESULT_CAPACITY`] neighbors are held.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == RESULT_CAPACITY
    }

    /// Distance of the worst neighbor currently held, if any. This is the
    /// pruning bound used by the tree traversals.
    #[must_use]
    pub fn worst_dist(&self) -> Option<Distance> {
        (self.len > 0).then(|| self.slots[self.len - 1].dist_sq)
    }

    /// The closest neighbor found so far, if any.
    #[must_use]
    pub fn best(&self) -> Option<Neighbor> {
        (self.len > 0).then(|| self.slots[0])
    }

    /// Offers a candidate neighbor. Returns `true` if it was kept.
    pub fn insert(&mut self, dist_sq: Distance, label: Label) -> bool {
        if self.is_full() {
            if dist_sq >= self.slots[RESULT_CAPACITY - 1].dist_sq {
                return false;
            }
            // Evict the current worst; the insertion below refills the slot.
            self.len -= 1;
        }
        let mut pos = self.len;
        while pos > 0 && self.slots[pos - 1].dist_sq > dist_sq {
            self.slots[pos] = self.slots[pos - 1];
            pos -= 1;
        }
        self.slots[pos] = Neighbor { dist_sq, label };
        self.len += 1;
        true
    }

    /// Iterates the retained neighbors from best (closest) to worst.
    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.slots[..self.len].iter()
    }
}

impl Default for NearestNeighbors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distances(results: &NearestNeighbors) -> Vec<Distance> {
        results.iter().map(|n| n.dist_sq).collect()
    }

    #[test]
    fn stays_sorted_ascending() {
        let mut results = NearestNeighbors::new();
        assert!(results.insert(50, 1));
        assert!(results.insert(10, 2));
        assert!(results.insert(30, 3));
        assert_eq!(distances(&results), vec![10, 30, 50]);
        assert_eq!(results.best().unwrap().label, 2);
        assert_eq!(results.worst_dist(), Some(50));
    }

    #[test]
    fn full_list_rejects_worse_candidates() {
        let mut results = NearestNeighbors::new();
        for (d, l) in [(10, 1), (20, 2), (30, 3)] {
            results.insert(d, l);
        }
        assert!(!results.insert(30, 4)); // tie with worst keeps incumbent
        assert!(!results.insert(99, 5));
        assert_eq!(distances(&results), vec![10, 20, 30]);
        assert_eq!(results.iter().map(|n| n.label).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn better_candidate_evicts_the_worst() {
        let mut results = NearestNeighbors::new();
        for (d, l) in [(10, 1), (20, 2), (30, 3)] {
            results.insert(d, l);
        }
        assert!(results.insert(15, 4));
        assert_eq!(distances(&results), vec![10, 15, 20]);
        assert!(results.is_full());
    }

    #[test]
    fn equal_distances_keep_arrival_order() {
        let mut results = NearestNeighbors::new();
        results.insert(20, 1);
        results.insert(20, 2);
        results.insert(5, 3);
        assert_eq!(
            results.iter().map(|n| (n.dist_sq, n.label)).collect::<Vec<_>>(),
            vec![(5, 3), (20, 1), (20, 2)]
        );
    }

    #[test]
    fn empty_list_reports_no_bound() {
        let results = NearestNeighbors::new();
        assert!(results.is_empty());
        assert_eq!(results.worst_dist(), None);
        assert_eq!(results.best(), None);
    }
}
