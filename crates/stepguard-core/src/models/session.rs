// ABOUTME: Walking session aggregate with step, distance, timing and GPS track statistics
// ABOUTME: Derived metrics (speed, stride, GPS displacement) used by session-level validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::{MPS_TO_KMH, MS_PER_SECOND};
use crate::geo::{self, GeoPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One continuous walking-tracking interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkingSession {
    /// Session identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// When tracking started
    pub start_time: DateTime<Utc>,
    /// When tracking ended (or the checkpoint time)
    pub end_time: DateTime<Utc>,
    /// Counted steps
    pub step_count: u32,
    /// Distance covered in meters
    pub total_distance: f64,
    /// GPS track, oldest first
    #[serde(default)]
    pub locations: Vec<GeoPoint>,
}

impl WalkingSession {
    /// Create a session without a GPS track
    #[must_use]
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        step_count: u32,
        total_distance: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            step_count,
            total_distance,
            locations: Vec::new(),
        }
    }

    /// Attach a GPS track
    #[must_use]
    pub fn with_locations(mut self, locations: Vec<GeoPoint>) -> Self {
        self.locations = locations;
        self
    }

    /// Session length in seconds (zero when the end precedes the start)
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        let millis = (self.end_time - self.start_time).num_milliseconds();
        if millis > 0 {
            millis as f64 / MS_PER_SECOND
        } else {
            0.0
        }
    }

    /// Distance with non-finite or negative values treated as zero
    #[must_use]
    pub fn effective_distance(&self) -> f64 {
        if self.total_distance.is_finite() && self.total_distance > 0.0 {
            self.total_distance
        } else {
            0.0
        }
    }

    /// Average speed over the whole session in km/h
    #[must_use]
    pub fn average_speed_kmh(&self) -> f64 {
        let duration = self.duration_seconds();
        if duration <= 0.0 {
            return 0.0;
        }
        self.effective_distance() / duration * MPS_TO_KMH
    }

    /// Average distance per step in meters (zero without steps)
    #[must_use]
    pub fn average_stride(&self) -> f64 {
        if self.step_count == 0 {
            return 0.0;
        }
        self.effective_distance() / f64::from(self.step_count)
    }

    /// Whether the GPS track moves beyond the noise floor
    ///
    /// Requires at least two fixes and one fix farther than `noise_floor_m`
    /// from the first.
    #[must_use]
    pub fn has_meaningful_gps_movement(&self, noise_floor_m: f64) -> bool {
        self.locations.len() >= 2 && geo::max_displacement_m(&self.locations) > noise_floor_m
    }

    /// Length of the GPS track in meters
    #[must_use]
    pub fn track_length_m(&self) -> f64 {
        geo::path_length_m(&self.locations)
    }
}
