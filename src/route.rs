// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::time::{Duration, Instant};

use crate::{earth_distance, Algorithm, NodeId, RoadGraph};

/// A found route, assembled from a search outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Node ids from start to end, inclusive.
    pub path: Vec<NodeId>,
    /// Every node the search visited, in first-visit order.
    pub visited: Vec<NodeId>,
    /// Real-world length of the path in kilometers, rounded to 2 decimals.
    pub distance_km: f64,
    /// Wall-clock duration of the search itself.
    pub search_time: Duration,
}

/// Runs the selected search variant between two nodes and assembles the
/// result: the found path, the visitation trace, the path's geodesic length
/// and the measured search time. Returns [None] when the end is unreachable.
///
/// The timer brackets the search alone; decoding node ids back to
/// coordinates and summing distances happen outside of it.
pub fn plan_route(
    g: &RoadGraph,
    from: &NodeId,
    to: &NodeId,
    algorithm: Algorithm,
) -> Option<Route> {
    let started = Instant::now();
    let outcome = algorithm.run(g, from, to);
    let search_time = started.elapsed();

    let path = outcome.path?;
    let meters: f64 = path
        .windows(2)
        .filter_map(|pair| {
            let a = g.coordinate(&pair[0])?;
            let b = g.coordinate(&pair[1])?;
            Some(earth_distance(a, b))
        })
        .sum();

    Some(Route {
        path,
        visited: outcome.visited,
        distance_km: round_to_km(meters),
        search_time,
    })
}

/// Converts meters to kilometers rounded to 2 decimal places.
fn round_to_km(meters: f64) -> f64 {
    (meters / 1000.0 * 100.0).round() / 100.0
}
