// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::{reconstruct_path, SearchOutcome, VisitLog};
use crate::{NodeId, RoadGraph};

#[derive(Debug, Clone)]
struct QueueItem {
    at: NodeId,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.cost.partial_cmp(&self.cost)
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// Finds the shortest route between two nodes with
/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// over the non-negative edge weights.
///
/// The frontier is a binary min-heap without decrease-key: relaxing a node
/// pushes a fresh entry, and entries made stale by a later, cheaper
/// relaxation are dropped when popped.
pub fn dijkstra(g: &RoadGraph, from: &NodeId, to: &NodeId) -> SearchOutcome {
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut known_costs: HashMap<NodeId, f64> = HashMap::new();
    let mut log = VisitLog::default();

    queue.push(QueueItem {
        at: from.clone(),
        cost: 0.0,
    });
    known_costs.insert(from.clone(), 0.0);

    while let Some(item) = queue.pop() {
        log.record(&item.at);

        if item.at == *to {
            return SearchOutcome {
                path: Some(reconstruct_path(&came_from, &item.at)),
                visited: log.into_order(),
            };
        }

        // Multiple entries may exist in the queue for the same node.
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for (neighbor, weight) in g.neighbors(&item.at) {
            let candidate = item.cost + weight;
            if candidate < known_costs.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                known_costs.insert(neighbor.clone(), candidate);
                came_from.insert(neighbor.clone(), item.at.clone());
                queue.push(QueueItem {
                    at: neighbor.clone(),
                    cost: candidate,
                });
            }
        }
    }

    SearchOutcome {
        path: None,
        visited: log.into_order(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    fn id(lat: f64, lon: f64) -> NodeId {
        Coordinate::new(lat, lon).node_id()
    }

    /// Two routes between the same endpoints: a short two-hop chain and a
    /// detour around two corners, roughly 3x the length.
    fn two_routes() -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_segment(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.01),
            Coordinate::new(0.0, 0.02),
        ]);
        g.add_segment(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-0.02, 0.0),
            Coordinate::new(-0.02, 0.02),
            Coordinate::new(0.0, 0.02),
        ]);
        g
    }

    #[test]
    fn prefers_the_cheaper_route() {
        let g = two_routes();
        let outcome = dijkstra(&g, &id(0.0, 0.0), &id(0.0, 0.02));
        assert_eq!(
            outcome.path,
            Some(vec![id(0.0, 0.0), id(0.0, 0.01), id(0.0, 0.02)])
        );
    }

    #[test]
    fn records_visits_in_cost_order() {
        let g = two_routes();
        let outcome = dijkstra(&g, &id(0.0, 0.0), &id(0.0, 0.02));

        // The first two pops are the start and its nearest neighbor; the
        // distant arc nodes must not be selected before the chain midpoint.
        assert_eq!(outcome.visited[0], id(0.0, 0.0));
        assert_eq!(outcome.visited[1], id(0.0, 0.01));
    }

    #[test]
    fn start_cost_is_zero_not_relaxed_back() {
        let mut g = RoadGraph::new();
        g.add_segment(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)]);
        let outcome = dijkstra(&g, &id(0.0, 0.0), &id(0.0, 0.01));

        // The start never re-enters the path through its own neighbor.
        assert_eq!(outcome.path.unwrap().len(), 2);
        assert_eq!(outcome.visited.len(), 2);
    }
}
