// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::{reconstruct_path, SearchOutcome, VisitLog};
use crate::{initial_bearing, turn_angle, NodeId, RoadGraph};

/// Cost multiplier for any right turn (turn angle > 0).
const RIGHT_TURN_FACTOR: f64 = 0.00001;
/// Cost multiplier for continuing exactly straight.
const STRAIGHT_FACTOR: f64 = 100.0;
/// Cost multiplier for a left turn (-90 <= turn angle < 0).
const LEFT_TURN_FACTOR: f64 = 500_000.0;
/// Cost multiplier for a sharp turn or turn-around (turn angle < -90).
const SHARP_TURN_FACTOR: f64 = 100_000.0;

/// Maps a signed turn angle in `(-180, 180]` to its cost multiplier.
///
/// The thresholds and multipliers are the contract that gives this variant
/// its distinctive output, biasing routes into chains of right turns; they
/// are not calibrated against any traffic model.
fn turn_factor(turn: f64) -> f64 {
    if turn > 0.0 {
        RIGHT_TURN_FACTOR
    } else if turn == 0.0 {
        STRAIGHT_FACTOR
    } else if turn >= -90.0 {
        LEFT_TURN_FACTOR
    } else {
        SHARP_TURN_FACTOR
    }
}

#[derive(Debug, Clone)]
struct HeadingQueueItem {
    at: NodeId,
    cost: f64,
    /// Compass bearing by which `at` was entered; [None] on the start node.
    heading: Option<f64>,
}

impl PartialEq for HeadingQueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl Eq for HeadingQueueItem {}

impl PartialOrd for HeadingQueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.cost.partial_cmp(&self.cost)
    }
}

impl Ord for HeadingQueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// Dijkstra over bearing-penalized edge costs: each relaxation multiplies the
/// edge distance by the [turn_factor] of the heading change required to take
/// it, so the cheapest route is one made of right turns wherever possible.
///
/// Queue entries carry the bearing by which their node was entered; the very
/// first move out of the start has no incoming bearing and costs the plain
/// edge distance. Best known costs are tracked per node, like in the plain
/// Dijkstra variant.
pub fn turn_penalized(g: &RoadGraph, from: &NodeId, to: &NodeId) -> SearchOutcome {
    let mut queue: BinaryHeap<HeadingQueueItem> = BinaryHeap::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut known_costs: HashMap<NodeId, f64> = HashMap::new();
    let mut log = VisitLog::default();

    queue.push(HeadingQueueItem {
        at: from.clone(),
        cost: 0.0,
        heading: None,
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

        let current_at = match g.coordinate(&item.at) {
            Some(at) => at,
            None => continue,
        };

        for (neighbor, weight) in g.neighbors(&item.at) {
            let neighbor_at = match g.coordinate(neighbor) {
                Some(at) => at,
                None => continue,
            };

            let outgoing = initial_bearing(current_at, neighbor_at);
            let factor = match item.heading {
                Some(incoming) => turn_factor(turn_angle(incoming, outgoing)),
                None => 1.0,
            };

            let candidate = item.cost + weight * factor;
            if candidate < known_costs.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                known_costs.insert(neighbor.clone(), candidate);
                came_from.insert(neighbor.clone(), item.at.clone());
                queue.push(HeadingQueueItem {
                    at: neighbor.clone(),
                    cost: candidate,
                    heading: Some(outgoing),
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

    #[test]
    fn factor_table() {
        assert_eq!(turn_factor(20.0), RIGHT_TURN_FACTOR);
        assert_eq!(turn_factor(180.0), RIGHT_TURN_FACTOR);
        assert_eq!(turn_factor(0.0), STRAIGHT_FACTOR);
        assert_eq!(turn_factor(-0.0), STRAIGHT_FACTOR);
        assert_eq!(turn_factor(-45.0), LEFT_TURN_FACTOR);
        assert_eq!(turn_factor(-90.0), LEFT_TURN_FACTOR);
        assert_eq!(turn_factor(-90.5), SHARP_TURN_FACTOR);
        assert_eq!(turn_factor(-179.0), SHARP_TURN_FACTOR);
    }

    /// A square block:
    ///
    ///  nw──ne
    ///  │    │
    ///  sw──se
    fn square() -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_segment(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.01, 0.0),
            Coordinate::new(0.01, 0.01),
            Coordinate::new(0.0, 0.01),
            Coordinate::new(0.0, 0.0),
        ]);
        g
    }

    #[test]
    fn prefers_the_right_turning_side_of_a_square() {
        let g = square();
        let sw = id(0.0, 0.0);
        let nw = id(0.01, 0.0);
        let ne = id(0.01, 0.01);

        // Going north then east is a right turn at nw; the other side of the
        // square needs a left turn at se for the same geometric length.
        let outcome = turn_penalized(&g, &sw, &ne);
        assert_eq!(outcome.path, Some(vec![sw, nw, ne]));
    }

    #[test]
    fn first_move_is_unpenalized() {
        let mut g = RoadGraph::new();
        g.add_segment(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)]);

        let outcome = turn_penalized(&g, &id(0.0, 0.0), &id(0.0, 0.01));
        assert_eq!(outcome.path, Some(vec![id(0.0, 0.0), id(0.0, 0.01)]));
    }

    #[test]
    fn loops_around_the_block_instead_of_turning_left() {
        // Entering a from the south, the target w lies directly to the left
        // (west). Looping clockwise around the block east of a takes four
        // right turns to reach w and beats the single left turn despite
        // being four times as long.
        let mut g = RoadGraph::new();
        let start = Coordinate::new(-0.01, 0.0);
        let a = Coordinate::new(0.0, 0.0);
        let w = Coordinate::new(0.0, -0.01);
        let e = Coordinate::new(0.0, 0.01);
        let se = Coordinate::new(-0.01, 0.01);
        let sw = Coordinate::new(-0.01, -0.01);

        g.add_segment(&[start, a]);
        g.add_segment(&[a, w]);
        g.add_segment(&[a, e, se, sw, w]);

        let outcome = turn_penalized(&g, &start.node_id(), &w.node_id());
        assert_eq!(
            outcome.path,
            Some(vec![
                start.node_id(),
                a.node_id(),
                e.node_id(),
                se.node_id(),
                sw.node_id(),
                w.node_id(),
            ])
        );
    }
}
