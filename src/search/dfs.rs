// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use super::{reconstruct_path, SearchOutcome, VisitLog};
use crate::{NodeId, RoadGraph};

/// Explores the graph depth-first with an explicit stack, ignoring edge
/// weights. The returned path is the first one found and carries no
/// shortest-path guarantee; the variant exists as a baseline and for
/// visualizing raw traversal order.
///
/// A node counts as visited when it is popped, not when it is pushed, so the
/// same node may sit on the stack several times before being processed. The
/// predecessor map keeps the first discoverer of each node, which is not
/// necessarily the node it ends up being popped after.
pub fn depth_first(g: &RoadGraph, from: &NodeId, to: &NodeId) -> SearchOutcome {
    let mut stack: Vec<NodeId> = vec![from.clone()];
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut log = VisitLog::default();

    while let Some(current) = stack.pop() {
        log.record(&current);

        if current == *to {
            return SearchOutcome {
                path: Some(reconstruct_path(&came_from, &current)),
                visited: log.into_order(),
            };
        }

        if !visited.insert(current.clone()) {
            continue;
        }

        for (neighbor, _) in g.neighbors(&current) {
            if !visited.contains(neighbor) {
                stack.push(neighbor.clone());
                came_from
                    .entry(neighbor.clone())
                    .or_insert_with(|| current.clone());
            }
        }
    }

    SearchOutcome {
        path: None,
        visited: log.into_order(),
    }
}
