// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use vejrute::osm::{BoundingBox, FetchOptions, DEFAULT_BBOX, DEFAULT_OVERPASS_URL};
use vejrute::server::{self, AppState, ServerConfig};

/// Route-planning service over OpenStreetMap road data.
#[derive(Parser)]
struct Cli {
    /// The address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// The path of the road graph snapshot
    #[arg(long, default_value = "road_graph.json")]
    graph_file: PathBuf,

    /// The bounding box of the road network, as south,west,north,east degrees
    #[arg(long, default_value_t = DEFAULT_BBOX)]
    bbox: BoundingBox,

    /// The Overpass API endpoint to fetch road data from
    #[arg(long, default_value = DEFAULT_OVERPASS_URL)]
    overpass_url: String,

    /// The Overpass query timeout, in seconds
    #[arg(long, default_value_t = 180)]
    fetch_timeout: u64,

    /// The highway classes to include, comma separated
    #[arg(long, value_delimiter = ',', default_value = "primary,secondary,tertiary,residential")]
    road_classes: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let state = Arc::new(AppState::new(ServerConfig {
        snapshot_path: cli.graph_file,
        fetch: FetchOptions {
            url: cli.overpass_url,
            bbox: cli.bbox,
            road_classes: cli.road_classes,
            timeout: Duration::from_secs(cli.fetch_timeout),
        },
    }));

    // Start building the graph right away; requests arriving before it
    // finishes wait for this build instead of starting their own.
    let warmup = state.clone();
    tokio::spawn(async move {
        if let Err(e) = warmup.graph().await {
            log::warn!("graph warmup failed, the next request retries: {}", e);
        }
    });

    let app = server::router(state);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    log::info!("listening on {}", cli.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl-c");
}
