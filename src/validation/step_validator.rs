// ABOUTME: Real-time, stateless gate deciding whether a raw step delta is counted
// ABOUTME: Rejects invalid activity, non-moving state, phone shaking and vehicle movement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Step Count Validation
//!
//! Every step delta passes through a [`StepCountValidator`] before it is added
//! to a session's counted total. Rules are evaluated in order and the first
//! match wins:
//!
//! 1. Activity type is not walking or running → `InvalidActivityType`
//! 2. Movement state is not walking or running → `InvalidMovementState`
//! 3. Negligible GPS displacement with strong acceleration → `PhoneShake`
//! 4. Fast GPS speed without any steps → `VehicleMovement`
//! 5. (only when `stationary_rule_enabled`) short stride with no position
//!    spread → `StationaryWalking`
//!
//! Rule 5 overlaps the session-level `STATIONARY_WALKING` check and is off by
//! default so a session is not penalized twice for the same pattern.

use crate::config::StepGateConfig;
use crate::logging::SessionLogger;
use stepguard_core::geo;
use stepguard_core::{RejectionReason, StepValidationInput, StepValidationResult};

/// Policy deciding whether a step delta counts
pub trait StepCountValidator: Send + Sync {
    /// Validate one sample's step delta
    fn validate(&self, input: &StepValidationInput) -> StepValidationResult;
}

impl<T: StepCountValidator + ?Sized> StepCountValidator for Box<T> {
    fn validate(&self, input: &StepValidationInput) -> StepValidationResult {
        (**self).validate(input)
    }
}

/// Standard anti-cheat gate
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStepCountValidator {
    config: StepGateConfig,
}

impl DefaultStepCountValidator {
    /// Create a validator with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with explicit thresholds
    #[must_use]
    pub const fn with_config(config: StepGateConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &StepGateConfig {
        &self.config
    }

    fn is_phone_shake(&self, input: &StepValidationInput) -> bool {
        input.gps_distance < self.config.shake_max_gps_distance_m
            && input.acceleration > self.config.shake_min_acceleration
    }

    fn is_vehicle_movement(&self, input: &StepValidationInput) -> bool {
        input.gps_speed > self.config.vehicle_min_speed_mps && input.step_delta == 0
    }

    /// Steps whose stride is implausibly short while recent fixes stay clustered
    fn is_walking_in_place(&self, input: &StepValidationInput) -> bool {
        if input.step_delta == 0 || input.locations.len() < self.config.stationary_min_fixes {
            return false;
        }
        let stride = input.gps_distance / f64::from(input.step_delta);
        if stride >= self.config.stationary_max_stride_m {
            return false;
        }
        geo::position_variance_m2(&input.locations)
            .is_some_and(|variance| variance < self.config.stationary_max_position_variance_m2)
    }

    fn first_violation(&self, input: &StepValidationInput) -> Option<RejectionReason> {
        if !input.activity_type.counts_steps() {
            return Some(RejectionReason::InvalidActivityType);
        }
        if !input.movement_state.is_moving() {
            return Some(RejectionReason::InvalidMovementState);
        }
        if self.is_phone_shake(input) {
            return Some(RejectionReason::PhoneShake);
        }
        if self.is_vehicle_movement(input) {
            return Some(RejectionReason::VehicleMovement);
        }
        if self.config.stationary_rule_enabled && self.is_walking_in_place(input) {
            return Some(RejectionReason::StationaryWalking);
        }
        None
    }
}

impl StepCountValidator for DefaultStepCountValidator {
    fn validate(&self, input: &StepValidationInput) -> StepValidationResult {
        let sanitized;
        let input = if input.needs_sanitizing() {
            SessionLogger::log_input_sanitized(
                input.gps_distance,
                input.gps_speed,
                input.acceleration,
            );
            sanitized = input.sanitized();
            &sanitized
        } else {
            input
        };

        match self.first_violation(input) {
            Some(reason) => StepValidationResult::Rejected { reason },
            None => StepValidationResult::Accepted {
                step_delta: input.step_delta,
            },
        }
    }
}
