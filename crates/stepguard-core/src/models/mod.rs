// ABOUTME: Core data models for the walking validation pipeline
// ABOUTME: Re-exports movement classifications, step gate types, sessions and verdicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Movement state and activity type classifications
pub mod movement;

/// Walking session aggregate
pub mod session;

/// Real-time step gate input and result types
pub mod step;

/// Session-level suspicion flags and verdicts
pub mod verdict;

pub use movement::{ActivityType, MovementState};
pub use session::WalkingSession;
pub use step::{RejectionReason, StepValidationInput, StepValidationResult};
pub use verdict::{DecisionAction, FlagEffect, Severity, SuspicionFlag, ValidationResult};
