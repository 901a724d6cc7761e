// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use super::{BoundingBox, Error, DEFAULT_BBOX};
use crate::{Coordinate, RoadSegment};

/// The public Overpass API interpreter.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Highway classes included in the road graph by default.
pub const DEFAULT_ROAD_CLASSES: &[&str] = &["primary", "secondary", "tertiary", "residential"];

/// Steers [fetch_road_segments].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Overpass interpreter endpoint.
    pub url: String,
    /// Area to query.
    pub bbox: BoundingBox,
    /// `highway=` classes to include, combined into a regex filter.
    pub road_classes: Vec<String>,
    /// Applied both as the server-side query timeout and as the HTTP
    /// request timeout.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_OVERPASS_URL.to_string(),
            bbox: DEFAULT_BBOX,
            road_classes: DEFAULT_ROAD_CLASSES
                .iter()
                .map(|class| class.to_string())
                .collect(),
            timeout: Duration::from_secs(180),
        }
    }
}

/// The relevant parts of an Overpass `out:json` response.
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// One response element. With `out geom`, way elements carry their node
/// geometry inline, so no separate node lookup is needed.
#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    element_type: String,
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<Coordinate>,
}

/// Fetches all matching road segments within the configured bounding box
/// from the Overpass API.
///
/// Any transport, status or decode failure aborts the whole fetch; a partial
/// road network is never returned.
pub async fn fetch_road_segments(options: &FetchOptions) -> Result<Vec<RoadSegment>, Error> {
    let query = overpass_query(options);
    log::info!("querying overpass at {}", options.url);
    log::debug!("overpass query: {}", query);

    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(options.timeout)
        .user_agent(concat!("vejrute/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client
        .get(&options.url)
        .query(&[("data", query.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }

    let decoded: OverpassResponse = response.json().await?;
    let segments = into_segments(decoded);
    log::info!("overpass returned {} road segments", segments.len());
    Ok(segments)
}

/// Builds the Overpass QL query selecting ways of the configured highway
/// classes, with geometry inlined in the response.
fn overpass_query(options: &FetchOptions) -> String {
    format!(
        "[out:json][timeout:{}];way[\"highway\"][\"highway\"~\"{}\"]({});out geom;",
        options.timeout.as_secs(),
        options.road_classes.join("|"),
        options.bbox,
    )
}

fn into_segments(response: OverpassResponse) -> Vec<RoadSegment> {
    response
        .elements
        .into_iter()
        .filter(|element| element.element_type == "way" && !element.geometry.is_empty())
        .map(|element| RoadSegment {
            class: element
                .tags
                .get("highway")
                .cloned()
                .unwrap_or_default(),
            geometry: element.geometry,
        })
        .collect()
}
