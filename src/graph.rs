// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Coordinate, NodeId, RoadSegment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a road network as a weighted undirected graph:
/// an adjacency table plus a node-id → [Coordinate] lookup table.
///
/// Nodes are keyed by their canonical coordinate encoding ([NodeId]); edge
/// weights are great-circle distances in meters, stored in both directions.
/// Once built, the graph is treated as read-only by all search algorithms.
///
/// The serde representation is the snapshot file format:
/// `{"graph": {id: {id: meters}}, "nodeCoords": {id: {"lat": .., "lon": ..}}}`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadGraph {
    #[serde(rename = "graph")]
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
    #[serde(rename = "nodeCoords")]
    coords: BTreeMap<NodeId, Coordinate>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a collection of road segments.
    pub fn from_segments(segments: &[RoadSegment]) -> Self {
        let mut graph = Self::new();
        for segment in segments {
            graph.add_segment(&segment.geometry);
        }
        graph
    }

    /// Registers one continuous stretch of road.
    ///
    /// Every consecutive coordinate pair becomes an edge in both directions,
    /// weighted by the great-circle distance between the pair, and both
    /// endpoints become nodes. Registration is idempotent: coordinates with
    /// identical canonical encodings collapse to a single node, and a repeated
    /// edge between the same pair overwrites the stored weight.
    ///
    /// Geometries with fewer than 2 points contribute nothing.
    pub fn add_segment(&mut self, geometry: &[Coordinate]) {
        for pair in geometry.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let a_id = a.node_id();
            let b_id = b.node_id();
            let weight = earth_distance(a, b);

            self.coords.insert(a_id.clone(), a);
            self.coords.insert(b_id.clone(), b);
            self.adjacency
                .entry(a_id.clone())
                .or_default()
                .insert(b_id.clone(), weight);
            self.adjacency.entry(b_id).or_default().insert(a_id, weight);
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the number of directed edge entries (twice the number of
    /// undirected road links).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Retrieves the position of a node.
    pub fn coordinate(&self, id: &NodeId) -> Option<Coordinate> {
        self.coords.get(id).copied()
    }

    /// Returns an iterator over all node ids, in key order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.coords.keys()
    }

    /// Returns an iterator over the neighbors of a node together with the
    /// edge weights in meters. Unknown ids yield an empty iterator.
    pub fn neighbors(&self, id: &NodeId) -> impl Iterator<Item = (&NodeId, f64)> {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(|(neighbor, &weight)| (neighbor, weight))
    }

    /// Gets the weight of the edge between two nodes, if one exists.
    pub fn edge_weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Finds the closest node to the given position.
    ///
    /// This function computes the distance to every node in the graph and is
    /// not suitable for large graphs. Returns [None] only when the graph has
    /// no nodes; there is no "too far" cutoff. Ties go to the first node in
    /// key order.
    pub fn nearest_node(&self, at: Coordinate) -> Option<NodeId> {
        self.coords
            .iter()
            .map(|(id, &position)| (earth_distance(at, position), id))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.partial_cmp(b_dist).unwrap())
            .map(|(_, id)| id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    fn line() -> RoadSegment {
        RoadSegment {
            class: "residential".to_string(),
            geometry: vec![coord(55.60, 12.50), coord(55.61, 12.51), coord(55.62, 12.52)],
        }
    }

    #[test]
    fn builds_nodes_and_symmetric_edges() {
        let g = RoadGraph::from_segments(&[line()]);

        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 4);

        let a = coord(55.60, 12.50).node_id();
        let b = coord(55.61, 12.51).node_id();
        let c = coord(55.62, 12.52).node_id();

        let w = g.edge_weight(&a, &b).unwrap();
        assert_eq!(g.edge_weight(&b, &a).unwrap(), w);
        assert!((1270.0..1285.0).contains(&w), "got {} m", w);

        assert!(g.edge_weight(&a, &c).is_none());
        assert_eq!(g.coordinate(&b).unwrap(), coord(55.61, 12.51));
    }

    #[test]
    fn shared_coordinates_collapse_to_one_node() {
        let west = RoadSegment {
            class: "primary".to_string(),
            geometry: vec![coord(55.60, 12.50), coord(55.61, 12.51)],
        };
        let east = RoadSegment {
            class: "secondary".to_string(),
            geometry: vec![coord(55.61, 12.51), coord(55.62, 12.52)],
        };
        let g = RoadGraph::from_segments(&[west, east]);

        assert_eq!(g.len(), 3);
        let junction = coord(55.61, 12.51).node_id();
        assert_eq!(g.neighbors(&junction).count(), 2);
    }

    #[test]
    fn repeated_edges_overwrite_the_weight() {
        let mut g = RoadGraph::new();
        g.add_segment(&[coord(55.60, 12.50), coord(55.61, 12.51)]);
        g.add_segment(&[coord(55.60, 12.50), coord(55.61, 12.51)]);

        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn short_geometries_contribute_nothing() {
        let mut g = RoadGraph::new();
        g.add_segment(&[coord(55.60, 12.50)]);
        g.add_segment(&[]);
        assert!(g.is_empty());
    }

    #[test]
    fn neighbors_of_unknown_node_are_empty() {
        let g = RoadGraph::from_segments(&[line()]);
        let unknown = coord(1.0, 1.0).node_id();
        assert_eq!(g.neighbors(&unknown).count(), 0);
    }

    #[test]
    fn nearest_node_on_empty_graph_is_none() {
        assert!(RoadGraph::new().nearest_node(coord(55.6, 12.5)).is_none());
    }

    #[test]
    fn nearest_node_returns_the_global_minimum() {
        let g = RoadGraph::from_segments(&[line()]);

        let hit = g.nearest_node(coord(55.611, 12.512)).unwrap();
        assert_eq!(hit, coord(55.61, 12.51).node_id());

        // Arbitrarily distant queries still return the closest node.
        let far = g.nearest_node(coord(0.0, 0.0)).unwrap();
        let far_at = g.coordinate(&far).unwrap();
        for id in g.nodes() {
            let other = g.coordinate(id).unwrap();
            assert!(
                earth_distance(coord(0.0, 0.0), far_at)
                    <= earth_distance(coord(0.0, 0.0), other)
            );
        }
    }

    #[test]
    fn node_ids_decode_back_to_their_coordinates() {
        let segment = line();
        let g = RoadGraph::from_segments(&[segment.clone()]);

        for at in &segment.geometry {
            let decoded = at.node_id().coordinate().unwrap();
            assert_eq!(decoded, *at);
            assert_eq!(g.coordinate(&at.node_id()).unwrap(), *at);
        }
    }
}
