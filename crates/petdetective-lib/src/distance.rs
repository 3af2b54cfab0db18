use std::collections::{HashMap, VecDeque};

use crate::graph::{Graph, NodeId};

/// Distance assumed when a pair of nodes is unreachable or a target is not in
/// the graph. The heuristic is tuned around this value.
pub const UNREACHABLE_DISTANCE: u32 = 100;

/// All-pairs hop counts over the puzzle graph.
///
/// Each row holds only the nodes reachable from its source; callers go through
/// [`DistanceOracle::distance`] to get the [`UNREACHABLE_DISTANCE`] default.
#[derive(Debug, Clone, Default)]
pub struct DistanceOracle {
    rows: Vec<HashMap<NodeId, u32>>,
}

impl DistanceOracle {
    /// Run one breadth-first traversal per node.
    pub fn build(graph: &Graph) -> Self {
        Self {
            rows: graph.nodes().map(|node| hop_counts(graph, node)).collect(),
        }
    }

    /// Exact hop count, or `None` when `to` is unreachable from `from`.
    pub fn hops(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.rows.get(from).and_then(|row| row.get(&to)).copied()
    }

    /// Hop count with the unreachable default applied. A missing `to` (for
    /// example a house that never appears in the graph) is unreachable too.
    pub fn distance(&self, from: NodeId, to: Option<NodeId>) -> u32 {
        to.and_then(|to| self.hops(from, to))
            .unwrap_or(UNREACHABLE_DISTANCE)
    }

    /// Whether `to` can be reached from `from` at all.
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> bool {
        self.hops(from, to).is_some()
    }
}

/// Hop counts from `source` to every node reachable from it, itself included.
pub fn hop_counts(graph: &Graph, source: NodeId) -> HashMap<NodeId, u32> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();

    distances.insert(source, 0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[&current] + 1;
        for &next in graph.neighbours(current) {
            if distances.contains_key(&next) {
                continue;
            }
            distances.insert(next, next_distance);
            queue.push_back(next);
        }
    }

    distances
}
