// ABOUTME: GPS geometry helpers for track displacement and position spread
// ABOUTME: Haversine distance, maximum displacement from origin and planar position variance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::EARTH_RADIUS_M;
use serde::{Deserialize, Serialize};

/// A single GPS fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Fix time (ms since epoch)
    pub timestamp_ms: u64,
}

impl GeoPoint {
    /// Create a new fix
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, timestamp_ms: u64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_ms,
        }
    }

    /// Great-circle distance to another fix in meters
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance_m(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Great-circle distance between two coordinates in meters
#[must_use]
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Largest distance of any fix from the first fix of the track
#[must_use]
pub fn max_displacement_m(track: &[GeoPoint]) -> f64 {
    let Some(origin) = track.first() else {
        return 0.0;
    };
    track
        .iter()
        .skip(1)
        .map(|point| origin.distance_to(point))
        .fold(0.0, f64::max)
}

/// Sum of consecutive fix distances
#[must_use]
pub fn path_length_m(track: &[GeoPoint]) -> f64 {
    track
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}

/// Variance of fix positions around their centroid, in square meters
///
/// Positions are projected onto a local equirectangular plane centered on the
/// centroid, which is accurate at the scale of a few hundred meters.
/// Returns `None` for an empty track.
#[must_use]
pub fn position_variance_m2(track: &[GeoPoint]) -> Option<f64> {
    if track.is_empty() {
        return None;
    }
    let n = track.len() as f64;
    let mean_lat = track.iter().map(|p| p.latitude).sum::<f64>() / n;
    let mean_lon = track.iter().map(|p| p.longitude).sum::<f64>() / n;
    let lon_scale = mean_lat.to_radians().cos();

    let variance = track
        .iter()
        .map(|p| {
            let dy = (p.latitude - mean_lat).to_radians() * EARTH_RADIUS_M;
            let dx = (p.longitude - mean_lon).to_radians() * EARTH_RADIUS_M * lon_scale;
            dx.mul_add(dx, dy * dy)
        })
        .sum::<f64>()
        / n;
    Some(variance)
}
