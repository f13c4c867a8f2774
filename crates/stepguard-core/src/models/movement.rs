// ABOUTME: Movement state and coarse activity type classifications from sensor collaborators
// ABOUTME: MovementState is sampled every tick, ActivityType comes from the activity recognizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fine-grained, frequently sampled classification of the user's motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementState {
    /// Not moving
    Still,
    /// Walking pace
    Walking,
    /// Running pace
    Running,
    /// Classifier could not decide
    #[default]
    Unknown,
}

impl MovementState {
    /// Whether this state produces steps (walking or running)
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self, Self::Walking | Self::Running)
    }

    /// Stable string form used in logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Still => "STILL",
            Self::Walking => "WALKING",
            Self::Running => "RUNNING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for MovementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification from the platform activity recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// Walking
    Walking,
    /// Running
    Running,
    /// Motorized transport
    Vehicle,
    /// Riding a bicycle
    Bicycle,
    /// Not moving
    Still,
    /// Device angle changed significantly without locomotion
    Tilting,
    /// Recognizer could not decide
    #[default]
    Unknown,
}

impl ActivityType {
    /// Whether steps may be counted while this activity is reported
    #[must_use]
    pub const fn counts_steps(&self) -> bool {
        matches!(self, Self::Walking | Self::Running)
    }

    /// Stable string form used in logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "WALKING",
            Self::Running => "RUNNING",
            Self::Vehicle => "VEHICLE",
            Self::Bicycle => "BICYCLE",
            Self::Still => "STILL",
            Self::Tilting => "TILTING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
