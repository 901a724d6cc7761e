// (c) Copyright 2025 The vejrute authors
// SPDX-License-Identifier: MIT

use crate::Coordinate;

/// Mean radius of Earth, in meters.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two positions on Earth using
/// the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in meters.
pub fn earth_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let sin_dlat_half = ((b.lat - a.lat).to_radians() * 0.5).sin();
    let sin_dlon_half = ((b.lon - a.lon).to_radians() * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    // Rounding may push h past 1 for near-antipodal points; the clamp keeps
    // the square root defined.
    2.0 * EARTH_RADIUS * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

/// Calculates the initial compass bearing of the great-circle from `a` to `b`.
/// Returns degrees in `[0, 360)`: 0 is north, 90 east.
pub fn initial_bearing(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Calculates the signed change of heading between two compass bearings,
/// wrapped into `(-180, 180]`. Positive is clockwise (a right turn),
/// negative counter-clockwise (a left turn).
pub fn turn_angle(incoming: f64, outgoing: f64) -> f64 {
    let mut turn = (outgoing - incoming) % 360.0;
    if turn > 180.0 {
        turn -= 360.0;
    } else if turn <= -180.0 {
        turn += 360.0;
    }
    turn
}
