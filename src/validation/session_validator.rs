// ABOUTME: Session-level suspicion classifier over a finished walking session's aggregates
// ABOUTME: Physical plausibility and movement pattern checks producing a multi-flag verdict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Walking Session Validation
//!
//! Re-examines the aggregate statistics of a finished (or checkpointed)
//! session, independently of the real-time gate. This catches patterns only
//! visible in aggregate, such as slow sustained shaking that passes each
//! per-sample check.
//!
//! Checks are independent and flags accumulate in evaluation order:
//!
//! - **Physical plausibility**: stride outside `[min_stride_m, max_stride_m]`,
//!   average speed above `max_speed_kmh`, more than `max_steps` steps.
//! - **Movement patterns** (only when the GPS track never leaves the noise
//!   floor): walking in place and shaking.
//!
//! Aggregate vehicle detection is not attempted here; the real-time gate
//! handles it per sample.

use crate::config::SessionRulesConfig;
use rayon::prelude::*;
use stepguard_core::{SuspicionFlag, ValidationResult, WalkingSession};
use tracing::trace;

/// Stateless session classifier, safe to share across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkingSessionValidator {
    config: SessionRulesConfig,
}

impl WalkingSessionValidator {
    /// Create a validator with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with explicit thresholds
    #[must_use]
    pub const fn with_config(config: SessionRulesConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &SessionRulesConfig {
        &self.config
    }

    /// Produce the verdict for one session
    #[must_use]
    pub fn validate(&self, session: &WalkingSession) -> ValidationResult {
        let mut flags = Vec::new();
        self.validate_physical(session, &mut flags);
        self.validate_movement_patterns(session, &mut flags);

        trace!(
            session.id = %session.id,
            flag_count = flags.len(),
            "Session validation complete"
        );
        ValidationResult::from_flags(flags)
    }

    /// Validate many sessions in parallel, preserving input order
    #[must_use]
    pub fn validate_batch(&self, sessions: &[WalkingSession]) -> Vec<ValidationResult> {
        sessions
            .par_iter()
            .map(|session| self.validate(session))
            .collect()
    }

    /// Stride, speed and step-total limits
    fn validate_physical(&self, session: &WalkingSession, flags: &mut Vec<SuspicionFlag>) {
        let distance = session.effective_distance();
        if session.step_count > 0 && distance > 0.0 {
            let stride = distance / f64::from(session.step_count);
            if stride < self.config.min_stride_m || stride > self.config.max_stride_m {
                flags.push(SuspicionFlag::ImpossibleStride);
            }
        }

        if session.average_speed_kmh() > self.config.max_speed_kmh {
            flags.push(SuspicionFlag::ImpossibleSpeed);
        }

        if session.step_count > self.config.max_steps {
            flags.push(SuspicionFlag::ExcessiveSteps);
        }
    }

    /// Walking in place and shaking, both require a GPS track that never moved
    fn validate_movement_patterns(&self, session: &WalkingSession, flags: &mut Vec<SuspicionFlag>) {
        if session.has_meaningful_gps_movement(self.config.gps_noise_floor_m) {
            return;
        }
        let stride = session.average_stride();

        if (0.0..=self.config.stationary_max_stride_m).contains(&stride)
            && session.step_count > self.config.stationary_min_steps
        {
            flags.push(SuspicionFlag::StationaryWalking);
        }

        if session.average_speed_kmh() < self.config.shaking_max_speed_kmh
            && stride < self.config.shaking_max_stride_m
        {
            flags.push(SuspicionFlag::ShakingPattern);
        }
    }
}
