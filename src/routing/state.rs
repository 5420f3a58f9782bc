//! Search state: labels, heap ordering, and dominance pruning

use std::cmp::Ordering;

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{Energy, Time};

/// One search label: a concrete way of reaching `node`, with the charge
/// left after doing so and a predecessor link for path reconstruction.
#[derive(Debug, Clone, Copy)]
pub(super) struct Label {
    pub(super) node: NodeIndex,
    pub(super) time: Time,
    /// Remaining charge, capped at battery capacity. May go negative in
    /// the diagnostic (floor-free) search pass.
    pub(super) charge: Energy,
    pub(super) blended: f64,
    /// Arena index of the predecessor label and the edge taken from it.
    pub(super) pred: Option<(usize, EdgeIndex)>,
}

/// Priority queue entry. Min-heap by blended cost with deterministic
/// tie-breaks: lower time, then higher remaining charge (equivalent to
/// lower net energy spent), then smaller node index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct QueueEntry {
    pub(super) blended: f64,
    pub(super) time: Time,
    pub(super) charge: Energy,
    pub(super) node: NodeIndex,
    pub(super) label: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .blended
            .total_cmp(&self.blended)
            .then_with(|| other.time.total_cmp(&self.time))
            .then_with(|| self.charge.total_cmp(&other.charge))
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
struct StoredLabel {
    time: Time,
    bucket: i64,
    blended: f64,
    label: usize,
}

/// Nondominated labels per node. The charge dimension is compared on
/// buckets of `bucket_size` kWh, which bounds the state space at the price
/// of exactness.
pub(super) struct LabelStore {
    bucket_size: f64,
    frontier: HashMap<NodeIndex, Vec<StoredLabel>>,
}

impl LabelStore {
    pub(super) fn new(bucket_size: f64) -> Self {
        Self {
            bucket_size,
            frontier: HashMap::new(),
        }
    }

    fn bucket(&self, charge: Energy) -> i64 {
        (charge / self.bucket_size).floor() as i64
    }

    /// Inserts the candidate unless an existing label at the node
    /// dominates it (no worse in time, charge bucket, and blended cost);
    /// evicts stored labels the candidate dominates. Returns whether the
    /// candidate survived.
    pub(super) fn insert(
        &mut self,
        node: NodeIndex,
        time: Time,
        charge: Energy,
        blended: f64,
        label: usize,
    ) -> bool {
        let bucket = self.bucket(charge);
        let entries = self.frontier.entry(node).or_default();

        if entries.iter().any(|stored| {
            stored.time <= time && stored.bucket >= bucket && stored.blended <= blended
        }) {
            return false;
        }

        entries.retain(|stored| {
            !(time <= stored.time && bucket >= stored.bucket && blended <= stored.blended)
        });
        entries.push(StoredLabel {
            time,
            bucket,
            blended,
            label,
        });
        true
    }

    /// Whether the label is still on its node's frontier. Used for lazy
    /// deletion of stale heap entries.
    pub(super) fn is_live(&self, node: NodeIndex, label: usize) -> bool {
        self.frontier
            .get(&node)
            .is_some_and(|entries| entries.iter().any(|stored| stored.label == label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_cheapest_blended_first() {
        let mut heap = BinaryHeap::new();
        for (blended, label) in [(3.0, 0), (1.0, 1), (2.0, 2)] {
            heap.push(QueueEntry {
                blended,
                time: 0.0,
                charge: 0.0,
                node: NodeIndex::new(0),
                label,
            });
        }
        assert_eq!(heap.pop().unwrap().label, 1);
        assert_eq!(heap.pop().unwrap().label, 2);
    }

    #[test]
    fn ties_broken_by_time_then_charge_then_node() {
        let entry = |time: f64, charge: f64, node: usize| QueueEntry {
            blended: 1.0,
            time,
            charge,
            node: NodeIndex::new(node),
            label: 0,
        };

        assert!(entry(1.0, 0.0, 0) > entry(2.0, 0.0, 0));
        assert!(entry(1.0, 5.0, 0) > entry(1.0, 2.0, 0));
        assert!(entry(1.0, 5.0, 3) > entry(1.0, 5.0, 7));
    }

    #[test]
    fn dominated_candidate_pruned() {
        let mut store = LabelStore::new(0.1);
        let node = NodeIndex::new(0);

        assert!(store.insert(node, 10.0, 5.0, 3.0, 0));
        // Worse in every dimension.
        assert!(!store.insert(node, 11.0, 4.0, 4.0, 1));
        // Identical state collapses too.
        assert!(!store.insert(node, 10.0, 5.0, 3.0, 2));
    }

    #[test]
    fn incomparable_labels_coexist() {
        let mut store = LabelStore::new(0.1);
        let node = NodeIndex::new(0);

        assert!(store.insert(node, 10.0, 5.0, 3.0, 0));
        // Slower but with more charge left.
        assert!(store.insert(node, 12.0, 6.0, 3.5, 1));
        assert!(store.is_live(node, 0));
        assert!(store.is_live(node, 1));
    }

    #[test]
    fn dominating_candidate_evicts_stored() {
        let mut store = LabelStore::new(0.1);
        let node = NodeIndex::new(0);

        assert!(store.insert(node, 10.0, 5.0, 3.0, 0));
        // Better in every dimension.
        assert!(store.insert(node, 9.0, 6.0, 2.0, 1));
        assert!(!store.is_live(node, 0));
        assert!(store.is_live(node, 1));
    }

    #[test]
    fn charge_differences_below_bucket_collapse() {
        let mut store = LabelStore::new(1.0);
        let node = NodeIndex::new(0);

        assert!(store.insert(node, 10.0, 5.1, 3.0, 0));
        // More charge, but within the same bucket: dominated.
        assert!(!store.insert(node, 10.0, 5.9, 3.0, 1));
    }
}
