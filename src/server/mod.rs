// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

//! The HTTP routing service.
//!
//! Exposes `POST /api/route` (compute a route between two coordinates) and
//! `GET /health`. The road graph is built lazily by the first request that
//! needs it: loaded from the configured snapshot when one exists, otherwise
//! fetched from Overpass and snapshotted for the next start. At most one
//! build runs at a time; concurrent requests wait for it, and a failed build
//! is retried by the next request.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::osm::{self, FetchOptions};
use crate::{plan_route, snapshot, Algorithm, Coordinate, NodeId, RoadGraph};

/// Configuration of the routing service.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Path of the graph snapshot file: loaded at build time when present,
    /// written after every successful fresh build.
    pub snapshot_path: PathBuf,
    /// Overpass fetch configuration used for fresh builds.
    pub fetch: FetchOptions,
}

/// State shared by all requests: the configuration and the road graph cell.
///
/// The graph is immutable once built; the [OnceCell] serializes the build so
/// it happens at most once per process, no matter how many requests race for
/// it.
pub struct AppState {
    graph: OnceCell<Arc<RoadGraph>>,
    config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            graph: OnceCell::new(),
            config,
        }
    }

    /// Creates a state with an already-built graph, skipping the snapshot
    /// and the Overpass fetch entirely.
    pub fn with_graph(graph: RoadGraph) -> Self {
        Self {
            graph: OnceCell::new_with(Some(Arc::new(graph))),
            config: ServerConfig::default(),
        }
    }

    /// Returns the shared road graph, building it first if nobody has yet.
    ///
    /// Concurrent callers during a build all wait on that single build. On
    /// failure the cell stays empty and the next caller starts a new build.
    pub async fn graph(&self) -> Result<Arc<RoadGraph>, osm::Error> {
        self.graph
            .get_or_try_init(|| async {
                let graph = build_graph(&self.config).await?;
                Ok(Arc::new(graph))
            })
            .await
            .cloned()
    }
}

/// Loads the graph from the snapshot, or fetches road data from Overpass and
/// builds it. A fresh build is snapshotted; failure to write the snapshot is
/// only a warning since the in-memory graph is complete.
async fn build_graph(config: &ServerConfig) -> Result<RoadGraph, osm::Error> {
    match snapshot::load(&config.snapshot_path) {
        Ok(Some(graph)) => return Ok(graph),
        Ok(None) => log::info!(
            "no graph snapshot at {}, building from overpass",
            config.snapshot_path.display(),
        ),
        Err(e) => log::warn!("ignoring unreadable graph snapshot: {}", e),
    }

    let segments = osm::fetch_road_segments(&config.fetch).await?;
    let graph = RoadGraph::from_segments(&segments);
    log::info!(
        "built road graph: {} nodes, {} edges",
        graph.len(),
        graph.edge_count(),
    );

    if let Err(e) = snapshot::save(&config.snapshot_path, &graph) {
        log::warn!("failed to save graph snapshot: {}", e);
    }

    Ok(graph)
}

/// Builds the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/route", post(route_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteRequest {
    start_lat: f64,
    start_lng: f64,
    end_lat: f64,
    end_lng: f64,
    #[serde(default)]
    algorithm: Algorithm,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
    path: Vec<NodeId>,
    visited_nodes: Vec<NodeId>,
    distance_km: f64,
    duration_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    graph_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<usize>,
}

/// Error responses of the routing API, rendered as `{"error": ..}` JSON.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is not a valid coordinate")]
    InvalidCoordinate(&'static str),

    #[error("road data is unavailable: {0}")]
    Unavailable(#[from] osm::Error),

    #[error("no road near the given point")]
    NoNearbyRoad,

    #[error("no route found between the given points")]
    NoRoute,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCoordinate(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::NoNearbyRoad | ApiError::NoRoute => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

async fn route_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let start = Coordinate::new(request.start_lat, request.start_lng);
    let end = Coordinate::new(request.end_lat, request.end_lng);
    if !start.is_valid() {
        return Err(ApiError::InvalidCoordinate("start"));
    }
    if !end.is_valid() {
        return Err(ApiError::InvalidCoordinate("end"));
    }

    let graph = state.graph().await?;

    let from = graph.nearest_node(start).ok_or(ApiError::NoNearbyRoad)?;
    let to = graph.nearest_node(end).ok_or(ApiError::NoNearbyRoad)?;

    log::debug!("routing {} -> {} via {}", from, to, request.algorithm);
    let route = plan_route(&graph, &from, &to, request.algorithm).ok_or(ApiError::NoRoute)?;

    Ok(Json(RouteResponse {
        path: route.path,
        visited_nodes: route.visited,
        distance_km: route.distance_km,
        duration_ms: route.search_time.as_millis() as u64,
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let graph = state.graph.get();
    Json(HealthResponse {
        status: "ok",
        graph_ready: graph.is_some(),
        nodes: graph.map(|g| g.len()),
    })
}
