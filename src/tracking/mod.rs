// ABOUTME: Stateful per-session components driven by the sensor-processing loop
// ABOUTME: Movement state stabilizer, live step estimator and the session tracker wiring them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Live step-count interpolation
pub mod estimator;

/// Per-session sensor-fusion loop
pub mod session_tracker;

/// Movement state debouncing
pub mod stabilizer;

pub use estimator::StepEstimator;
pub use session_tracker::{
    RejectionTally, SensorSample, SessionOutcome, SessionTracker, TrackerUpdate,
};
pub use stabilizer::MovementStateStabilizer;
