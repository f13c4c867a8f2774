// ABOUTME: Main library entry point for the stepguard walking-activity validation pipeline
// ABOUTME: Movement stabilization, live step estimation, real-time step gating and session verdicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stepguard
//!
//! Turns noisy, bursty walking signals (hardware step-counter ticks,
//! accelerometer magnitude, GPS fixes, an activity classifier) into a live,
//! anti-cheat-gated step count and a plausibility verdict per session.
//!
//! ## Components
//!
//! - [`tracking::MovementStateStabilizer`]: debounces the movement classifier
//! - [`tracking::StepEstimator`]: interpolates the count between hardware ticks
//! - [`validation::DefaultStepCountValidator`]: per-sample gate behind the
//!   [`validation::StepCountValidator`] trait
//! - [`validation::WalkingSessionValidator`]: session-level suspicion flags
//! - [`tracking::SessionTracker`]: wires the above into one sensor loop
//!
//! ## Example
//!
//! ```rust
//! use stepguard::tracking::{SensorSample, SessionTracker};
//! use stepguard::models::{ActivityType, MovementState};
//!
//! let mut tracker = SessionTracker::new();
//! tracker.start(0);
//! let update = tracker
//!     .process(&SensorSample {
//!         timestamp_ms: 1_000,
//!         detected_state: MovementState::Walking,
//!         activity_type: ActivityType::Walking,
//!         hardware_step_count: 0,
//!         acceleration: 1.2,
//!         gps_distance: 1.4,
//!         gps_speed: 1.3,
//!         location: None,
//!     })
//!     .unwrap();
//! assert_eq!(update.counted_steps, 0);
//! ```

/// Threshold configuration with environment overrides
pub mod config;

/// Logging setup and structured pipeline events
pub mod logging;

/// Recorded data loading and replay
pub mod replay;

/// Stateful per-session components
pub mod tracking;

/// Step gate and session verdict components
pub mod validation;

/// Core data models re-exported from `stepguard-core`
pub mod models {
    pub use stepguard_core::models::*;
    pub use stepguard_core::GeoPoint;
}

/// Error types re-exported from `stepguard-core`
pub mod errors {
    pub use stepguard_core::errors::*;
}

pub use stepguard_core::constants;
pub use stepguard_core::geo;
