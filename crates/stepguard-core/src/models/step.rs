// ABOUTME: Input and result types for the real-time per-sample step gate
// ABOUTME: StepValidationInput bundles one sample's signals, StepValidationResult is accept or reject
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::movement::{ActivityType, MovementState};
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signals for one validation call, built fresh per sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepValidationInput {
    /// Coarse activity from the recognizer
    pub activity_type: ActivityType,
    /// Stabilized movement state
    pub movement_state: MovementState,
    /// Meters moved since the previous sample
    pub gps_distance: f64,
    /// Current GPS speed (m/s)
    pub gps_speed: f64,
    /// Acceleration magnitude (m/s²)
    pub acceleration: f64,
    /// Hardware step ticks since the previous sample
    pub step_delta: u32,
    /// Recent GPS fixes, oldest first
    #[serde(default)]
    pub locations: Vec<GeoPoint>,
}

impl StepValidationInput {
    /// Copy of this input with every numeric signal made finite and non-negative
    ///
    /// NaN, infinities and negative values become `0.0`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            gps_distance: non_negative(self.gps_distance),
            gps_speed: non_negative(self.gps_speed),
            acceleration: non_negative(self.acceleration),
            ..self.clone()
        }
    }

    /// Whether any numeric signal would be altered by [`Self::sanitized`]
    #[must_use]
    pub fn needs_sanitizing(&self) -> bool {
        [self.gps_distance, self.gps_speed, self.acceleration]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Why a step delta was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// Activity recognizer reports something other than walking or running
    InvalidActivityType,
    /// Stabilized movement state is not walking or running
    InvalidMovementState,
    /// Strong acceleration without real displacement
    PhoneShake,
    /// Fast displacement without steps
    VehicleMovement,
    /// Steps with short stride and no position spread
    StationaryWalking,
}

impl RejectionReason {
    /// All reasons in rule order
    pub const ALL: [Self; 5] = [
        Self::InvalidActivityType,
        Self::InvalidMovementState,
        Self::PhoneShake,
        Self::VehicleMovement,
        Self::StationaryWalking,
    ];

    /// Stable string form used in logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidActivityType => "INVALID_ACTIVITY_TYPE",
            Self::InvalidMovementState => "INVALID_MOVEMENT_STATE",
            Self::PhoneShake => "PHONE_SHAKE",
            Self::VehicleMovement => "VEHICLE_MOVEMENT",
            Self::StationaryWalking => "STATIONARY_WALKING",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of gating one step delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepValidationResult {
    /// Count these steps
    Accepted {
        /// Steps to add to the session total
        step_delta: u32,
    },
    /// Drop this delta
    Rejected {
        /// Rule that refused it
        reason: RejectionReason,
    },
}

impl StepValidationResult {
    /// Steps this result contributes to the counted total
    #[must_use]
    pub const fn accepted_steps(&self) -> u32 {
        match self {
            Self::Accepted { step_delta } => *step_delta,
            Self::Rejected { .. } => 0,
        }
    }

    /// Whether the delta was accepted
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Rejection reason, if rejected
    #[must_use]
    pub const fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected { reason } => Some(*reason),
            Self::Accepted { .. } => None,
        }
    }
}
