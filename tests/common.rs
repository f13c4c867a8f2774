// ABOUTME: Shared builders for stepguard integration tests
// ABOUTME: Creates validation inputs, sessions, GPS tracks and sensor samples with sane defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code, clippy::unwrap_used)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use stepguard::models::{
    ActivityType, GeoPoint, MovementState, StepValidationInput, WalkingSession,
};
use stepguard::tracking::SensorSample;

/// Fixed session start so tests are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

/// Valid walking sample: walking on both classifiers, 2 m moved, 3 steps
pub fn walking_input() -> StepValidationInput {
    StepValidationInput {
        activity_type: ActivityType::Walking,
        movement_state: MovementState::Walking,
        gps_distance: 2.0,
        gps_speed: 1.0,
        acceleration: 1.0,
        step_delta: 3,
        locations: Vec::new(),
    }
}

/// Straight track heading east from a fixed origin, `spacing_m` apart
pub fn track_east(fixes: usize, spacing_m: f64) -> Vec<GeoPoint> {
    let origin_lat: f64 = 48.8566;
    let origin_lon: f64 = 2.3522;
    // meters per degree of longitude at this latitude
    let m_per_deg_lon = 111_320.0 * origin_lat.to_radians().cos();
    (0..fixes)
        .map(|i| {
            let offset = spacing_m * i as f64 / m_per_deg_lon;
            GeoPoint::new(origin_lat, origin_lon + offset, 1_000 * i as u64)
        })
        .collect()
}

/// Track of fixes that never leave the origin
pub fn stationary_track(fixes: usize) -> Vec<GeoPoint> {
    (0..fixes)
        .map(|i| GeoPoint::new(48.8566, 2.3522, 1_000 * i as u64))
        .collect()
}

/// Session of the given length with no GPS track
pub fn session(step_count: u32, total_distance: f64, duration_secs: i64) -> WalkingSession {
    let start = base_time();
    WalkingSession::new(
        start,
        start + Duration::seconds(duration_secs),
        step_count,
        total_distance,
    )
}

/// Sensor sample with walking classifications and modest motion
pub fn walking_sample(timestamp_ms: u64, hardware_step_count: u32) -> SensorSample {
    SensorSample {
        timestamp_ms,
        detected_state: MovementState::Walking,
        activity_type: ActivityType::Walking,
        hardware_step_count,
        acceleration: 1.8,
        gps_distance: 1.6,
        gps_speed: 1.4,
        location: None,
    }
}
