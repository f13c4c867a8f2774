// ABOUTME: Step gating and session verdict components
// ABOUTME: Real-time per-sample step validator and the session-level suspicion classifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session-level suspicion classifier
pub mod session_validator;

/// Real-time per-sample step gate
pub mod step_validator;

pub use session_validator::WalkingSessionValidator;
pub use step_validator::{DefaultStepCountValidator, StepCountValidator};
