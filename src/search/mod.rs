// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

//! The path-search algorithm family.
//!
//! All four variants share one contract: given the road graph and a start and
//! end node, return the node path between them (or nothing when the end is
//! unreachable) together with every node visited along the way. Variants
//! terminate as soon as the end node is popped from the frontier, or when the
//! frontier runs dry. Start ids absent from the graph simply exhaust the
//! frontier. A search from a node to itself yields the single-node path.

mod astar;
mod dfs;
mod dijkstra;
mod turns;

pub use astar::a_star;
pub use dfs::depth_first;
pub use dijkstra::dijkstra;
pub use turns::turn_penalized;

use crate::{NodeId, RoadGraph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Selects one of the search variants. The serde names are the wire-format
/// selector values of the routing API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "dfs")]
    Dfs,
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[default]
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "turns")]
    TurnPenalized,
}

impl Algorithm {
    /// Runs the selected variant over the graph.
    pub fn run(self, g: &RoadGraph, from: &NodeId, to: &NodeId) -> SearchOutcome {
        match self {
            Algorithm::Dfs => depth_first(g, from, to),
            Algorithm::Dijkstra => dijkstra(g, from, to),
            Algorithm::AStar => a_star(g, from, to),
            Algorithm::TurnPenalized => turn_penalized(g, from, to),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::TurnPenalized => "turns",
        };
        f.write_str(name)
    }
}

/// What every search variant produces: the start-to-end node path, or [None]
/// when the end is unreachable, plus all visited nodes in first-visit order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Option<Vec<NodeId>>,
    pub visited: Vec<NodeId>,
}

/// Records frontier pops in first-visit order. Nodes popped again through
/// duplicate frontier entries are not recorded twice.
#[derive(Debug, Default)]
struct VisitLog {
    order: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl VisitLog {
    fn record(&mut self, id: &NodeId) {
        if !self.seen.contains(id) {
            self.seen.insert(id.clone());
            self.order.push(id.clone());
        }
    }

    fn into_order(self) -> Vec<NodeId> {
        self.order
    }
}

/// Walks the predecessor map back from `last` and returns the node ids in
/// start-to-end order.
fn reconstruct_path(came_from: &HashMap<NodeId, NodeId>, last: &NodeId) -> Vec<NodeId> {
    let mut path = vec![last.clone()];
    let mut current = last;

    while let Some(previous) = came_from.get(current) {
        path.push(previous.clone());
        current = previous;
    }

    path.reverse();
    return path;
}
