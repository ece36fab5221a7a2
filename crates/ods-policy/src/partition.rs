//! Split of a run's trips into routing candidates and outright rejections.

use ods_core::TripId;

/// Result of [`ScenarioPolicy::partition`][crate::ScenarioPolicy::partition].
///
/// Both lists keep generation order.  Candidate `i` (0-based) becomes node
/// `i + 1` of the routing problem; node 0 is always the depot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripPartition {
    pub candidates: Vec<TripId>,
    pub ineligible: Vec<TripId>,
}

impl TripPartition {
    /// `true` when nothing is left to route.  Ineligible trips may remain.
    #[inline]
    pub fn has_no_candidates(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The candidate routed at problem node `node`, if any.
    pub fn candidate_at_node(&self, node: usize) -> Option<TripId> {
        node.checked_sub(1).and_then(|i| self.candidates.get(i).copied())
    }

    /// Total number of trips seen by the partition.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len() + self.ineligible.len()
    }
}
