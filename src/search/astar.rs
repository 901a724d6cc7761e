// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::{reconstruct_path, SearchOutcome, VisitLog};
use crate::{NodeId, RoadGraph};

#[derive(Debug, Clone)]
struct ScoredQueueItem {
    at: NodeId,
    cost: f64,
    score: f64,
}

impl PartialEq for ScoredQueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.score.eq(&other.score)
    }
}

impl Eq for ScoredQueueItem {}

impl PartialOrd for ScoredQueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.score.partial_cmp(&self.score)
    }
}

impl Ord for ScoredQueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// The A*-shaped variant: the frontier is ordered by a per-entry f-score that
/// is kept separate from the accumulated cost.
///
/// The f-score is assigned the accumulated cost alone; no straight-line
/// estimate of the remaining distance is added. With f = g the expansion
/// order degenerates to Dijkstra's. This matches the long-standing behavior
/// of the routing service and is kept as-is; a true A* would add
/// [earth_distance](crate::earth_distance) to the target here.
pub fn a_star(g: &RoadGraph, from: &NodeId, to: &NodeId) -> SearchOutcome {
    let mut queue: BinaryHeap<ScoredQueueItem> = BinaryHeap::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut known_costs: HashMap<NodeId, f64> = HashMap::new();
    let mut log = VisitLog::default();

    queue.push(ScoredQueueItem {
        at: from.clone(),
        cost: 0.0,
        score: 0.0,
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
                queue.push(ScoredQueueItem {
                    at: neighbor.clone(),
                    cost: candidate,
                    score: candidate,
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
    use crate::search::dijkstra;
    use crate::Coordinate;

    fn id(lat: f64, lon: f64) -> NodeId {
        Coordinate::new(lat, lon).node_id()
    }

    fn grid() -> RoadGraph {
        let mut g = RoadGraph::new();
        // Two east-west streets joined by three north-south cross streets.
        for lat in [0.0, 0.01] {
            g.add_segment(&[
                Coordinate::new(lat, 0.0),
                Coordinate::new(lat, 0.01),
                Coordinate::new(lat, 0.02),
            ]);
        }
        for lon in [0.0, 0.01, 0.02] {
            g.add_segment(&[Coordinate::new(0.0, lon), Coordinate::new(0.01, lon)]);
        }
        g
    }

    #[test]
    fn finds_a_shortest_route() {
        let g = grid();
        let outcome = a_star(&g, &id(0.0, 0.0), &id(0.01, 0.02));
        let path = outcome.path.unwrap();

        // Any shortest route over the grid takes exactly 3 hops.
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&id(0.0, 0.0)));
        assert_eq!(path.last(), Some(&id(0.01, 0.02)));
    }

    #[test]
    fn expansion_matches_dijkstra() {
        let g = grid();
        let from = id(0.0, 0.0);
        let to = id(0.01, 0.02);

        let ours = a_star(&g, &from, &to);
        let baseline = dijkstra(&g, &from, &to);

        // With f = g the selection order is cost order, so the visitation
        // trace is the same as Dijkstra's.
        assert_eq!(ours.visited, baseline.visited);
        assert_eq!(ours.path.is_some(), baseline.path.is_some());
    }
}
