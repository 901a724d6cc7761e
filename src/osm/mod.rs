// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

//! Road-data acquisition from OpenStreetMap via the
//! [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API).

mod overpass;

pub use overpass::{
    fetch_road_segments, FetchOptions, DEFAULT_OVERPASS_URL, DEFAULT_ROAD_CLASSES,
};

use serde::{Deserialize, Serialize};

/// Error which can occur when fetching road data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("overpass request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("overpass returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Geographic bounding box in degrees, ordered (south, west, north, east)
/// like an Overpass bbox filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Central Copenhagen and its surroundings, the area this service was
/// originally built for.
pub const DEFAULT_BBOX: BoundingBox = BoundingBox {
    south: 55.55,
    west: 12.45,
    north: 55.75,
    east: 12.65,
};

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl std::str::FromStr for BoundingBox {
    type Err = ParseBoundingBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<f64> = s
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseBoundingBoxError)?;

        match fields.as_slice() {
            &[south, west, north, east] => Ok(BoundingBox {
                south,
                west,
                north,
                east,
            }),
            _ => Err(ParseBoundingBoxError),
        }
    }
}

/// Error returned when a [BoundingBox] string is not of the
/// `south,west,north,east` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBoundingBoxError;

impl std::fmt::Display for ParseBoundingBoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("expected four comma-separated numbers: south,west,north,east")
    }
}

impl std::error::Error for ParseBoundingBoxError {}
