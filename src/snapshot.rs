// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

//! On-disk persistence of a built [RoadGraph] as a JSON snapshot, so a
//! restarted service can skip the Overpass fetch.

use std::fs;
use std::io;
use std::path::Path;

use crate::RoadGraph;

/// Error which can occur when loading or saving a graph snapshot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads a previously saved graph.
///
/// Returns `Ok(None)` when no snapshot exists at the path, leaving the
/// caller to build a fresh graph. A snapshot that exists but fails to
/// decode is an error.
pub fn load(path: impl AsRef<Path>) -> Result<Option<RoadGraph>, Error> {
    let path = path.as_ref();
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let graph: RoadGraph = serde_json::from_slice(&raw)?;
    log::info!(
        "loaded graph snapshot from {} ({} nodes, {} edges)",
        path.display(),
        graph.len(),
        graph.edge_count(),
    );
    Ok(Some(graph))
}

/// Saves the graph as a JSON snapshot at the given path.
pub fn save(path: impl AsRef<Path>, graph: &RoadGraph) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec(graph)?)?;
    log::info!(
        "saved graph snapshot to {} ({} nodes)",
        path.display(),
        graph.len(),
    );
    Ok(())
}
