// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

//! Road routing over [OpenStreetMap](https://www.openstreetmap.org/) data.
//!
//! Vejrute converts raw road geometry (fetched from the
//! [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API), or loaded
//! from a JSON snapshot) into a weighted undirected graph, and finds routes
//! between arbitrary coordinates with a selectable search algorithm:
//! depth-first, Dijkstra, A* or a turn-penalized Dijkstra that strongly
//! prefers right turns. The optional `server` feature adds an HTTP routing
//! service on top of the library.
//!
//! # Example
//!
//! ```
//! use vejrute::{plan_route, Algorithm, Coordinate, RoadGraph, RoadSegment};
//!
//! let segment = RoadSegment {
//!     class: "residential".to_string(),
//!     geometry: vec![
//!         Coordinate { lat: 55.60, lon: 12.50 },
//!         Coordinate { lat: 55.61, lon: 12.51 },
//!         Coordinate { lat: 55.62, lon: 12.52 },
//!     ],
//! };
//! let graph = RoadGraph::from_segments(&[segment]);
//!
//! let start = graph.nearest_node(Coordinate::new(55.601, 12.501)).unwrap();
//! let end = graph.nearest_node(Coordinate::new(55.619, 12.519)).unwrap();
//! let route = plan_route(&graph, &start, &end, Algorithm::Dijkstra).unwrap();
//!
//! println!("{} km over {} nodes", route.distance_km, route.path.len());
//! ```

use serde::{Deserialize, Serialize};

mod geo;
mod graph;
pub mod osm;
mod route;
pub mod search;
pub mod snapshot;

#[cfg(feature = "server")]
pub mod server;

pub use geo::{earth_distance, initial_bearing, turn_angle};
pub use graph::RoadGraph;
pub use route::{plan_route, Route};
pub use search::{Algorithm, SearchOutcome};

/// A geographic position, in degrees, on a spherical Earth.
///
/// Matches the point shape used by Overpass `out geom` responses and by the
/// graph snapshot format, so it deserializes straight from both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the canonical [NodeId] of this position.
    pub fn node_id(&self) -> NodeId {
        NodeId(format!("{},{}", self.lat, self.lon))
    }

    /// Checks that both fields are finite and within the valid
    /// latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Canonical key of a graph vertex: the `"<lat>,<lon>"` encoding of a
/// [Coordinate], using the shortest decimal representation that round-trips
/// each `f64`.
///
/// Two coordinates are the same node iff their encodings are byte-identical.
/// This is a precision contract, not geographic equality: values differing by
/// any floating-point jitter (for example the same physical location reported
/// by two data sources) produce distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Decodes the key back into a [Coordinate].
    /// Returns [None] for keys not of the `"<lat>,<lon>"` form.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let (lat, lon) = self.0.split_once(',')?;
        Some(Coordinate {
            lat: lat.parse().ok()?,
            lon: lon.parse().ok()?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Coordinate> for NodeId {
    fn from(at: Coordinate) -> Self {
        at.node_id()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A continuous stretch of road: an ordered coordinate geometry plus the
/// OSM highway class it was matched by.
///
/// Only the geometry participates in graph construction; the class is kept
/// for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    pub class: String,
    pub geometry: Vec<Coordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_encoding_is_shortest_round_trip() {
        // 55.60 and 55.6 are the same f64, so they share a node.
        assert_eq!(Coordinate::new(55.60, 12.50).node_id().as_str(), "55.6,12.5");
        assert_eq!(Coordinate::new(55.6, 12.5).node_id().as_str(), "55.6,12.5");
        assert_eq!(
            Coordinate::new(55.6591075, -12.0).node_id().as_str(),
            "55.6591075,-12"
        );
    }

    #[test]
    fn node_id_decodes_to_the_exact_coordinate() {
        let at = Coordinate::new(55.6591075, 12.5683372);
        let decoded = at.node_id().coordinate().unwrap();
        assert_eq!(decoded.lat, at.lat);
        assert_eq!(decoded.lon, at.lon);
    }

    #[test]
    fn malformed_node_ids_decode_to_none() {
        assert!(NodeId("55.6".to_string()).coordinate().is_none());
        assert!(NodeId("a,b".to_string()).coordinate().is_none());
        assert!(NodeId(String::new()).coordinate().is_none());
    }

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(55.6, 12.5).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 12.5).is_valid());
        assert!(!Coordinate::new(91.0, 12.5).is_valid());
        assert!(!Coordinate::new(55.6, -180.5).is_valid());
    }
}
