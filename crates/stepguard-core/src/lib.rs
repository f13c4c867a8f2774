// ABOUTME: Core types and constants for the stepguard walking validation pipeline
// ABOUTME: Foundation crate with domain models, thresholds, GPS geometry and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stepguard Core
//!
//! Foundation crate providing the shared data model for the walking-activity
//! validation pipeline. It is designed to change infrequently so the
//! algorithm crate on top of it recompiles quickly.
//!
//! ## Modules
//!
//! - **models**: Movement/activity classifications, step validation input and
//!   result types, walking sessions and session verdicts
//! - **constants**: Default thresholds used by the stabilizer, estimator and validators
//! - **geo**: GPS geometry helpers (haversine distance, track displacement)
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`

/// Unified error handling system with standard error codes
pub mod errors;

/// Default thresholds organized by component
pub mod constants;

/// GPS geometry helpers
pub mod geo;

/// Core data models (`MovementState`, `WalkingSession`, `SuspicionFlag`, etc.)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
pub use geo::GeoPoint;
pub use models::{
    ActivityType, DecisionAction, FlagEffect, MovementState, RejectionReason, Severity,
    StepValidationInput, StepValidationResult, SuspicionFlag, ValidationResult, WalkingSession,
};
