// ABOUTME: Interpolates a live step count between discrete hardware step-counter ticks
// ABOUTME: Cadence from movement state and acceleration, bounded lead, gradual convergence to real counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Step Estimator
//!
//! Hardware step counters report in bursts, which makes a live counter jump.
//! The estimator fills the gaps:
//!
//! - While walking or running, the count advances from the last real count at
//!   a cadence derived from acceleration magnitude, never more than
//!   `max_lead_steps` ahead of it.
//! - When a new real count arrives, the estimate closes a fixed fraction of
//!   the residual per update and snaps once the residual is small.
//! - When still or unknown, the estimate falls back to the last real count.

use crate::config::EstimatorConfig;
use stepguard_core::constants::units::MS_PER_SECOND;
use stepguard_core::MovementState;
use tracing::trace;

/// Live step-count interpolator
///
/// Not thread-safe; one instance belongs to one tracking session.
#[derive(Debug, Clone, Default)]
pub struct StepEstimator {
    config: EstimatorConfig,
    last_real_step_count: u32,
    last_real_step_count_time: u64,
    interpolated_step_count: u32,
    estimated_steps_per_second: f64,
    movement_start_time: Option<u64>,
}

impl StepEstimator {
    /// Create an estimator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with explicit settings
    #[must_use]
    pub fn with_config(config: EstimatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Record a new cumulative count from the hardware sensor
    ///
    /// The interpolated value moves toward `real_step_count` by
    /// `convergence_factor` of the residual (at least one step), and snaps to
    /// it once the residual is below `snap_threshold`.
    pub fn on_real_step_updated(&mut self, real_step_count: u32, timestamp_ms: u64) {
        if real_step_count != self.last_real_step_count {
            self.last_real_step_count = real_step_count;
            self.last_real_step_count_time = timestamp_ms;
        }

        if self.interpolated_step_count == real_step_count {
            return;
        }

        let residual = i64::from(real_step_count) - i64::from(self.interpolated_step_count);
        if residual.unsigned_abs() < u64::from(self.config.snap_threshold) {
            self.interpolated_step_count = real_step_count;
            return;
        }

        let mut step = (residual as f64 * self.config.convergence_factor).trunc() as i64;
        if step == 0 {
            step = residual.signum();
        }
        let next = i64::from(self.interpolated_step_count) + step;
        self.interpolated_step_count = u32::try_from(next.max(0)).unwrap_or(u32::MAX);

        trace!(
            real = real_step_count,
            interpolated = self.interpolated_step_count,
            residual,
            "Converging step estimate"
        );
    }

    /// Current live estimate for the given sensor readings
    pub fn estimate(
        &mut self,
        movement_state: MovementState,
        acceleration: f64,
        timestamp_ms: u64,
    ) -> u32 {
        let acceleration = if acceleration.is_finite() {
            acceleration
        } else {
            0.0
        };

        let candidate = match movement_state {
            MovementState::Walking => map_range(
                acceleration,
                self.config.walking_accel_range,
                self.config.walking_cadence_range,
            ),
            MovementState::Running => map_range(
                acceleration,
                self.config.running_accel_range,
                self.config.running_cadence_range,
            ),
            MovementState::Still => 0.0,
            MovementState::Unknown => self.estimated_steps_per_second * self.config.unknown_decay,
        };

        if movement_state.is_moving() {
            self.movement_start_time.get_or_insert(timestamp_ms);
            self.estimated_steps_per_second = candidate;
        } else {
            // Still and Unknown both end the movement
            self.movement_start_time = None;
            self.estimated_steps_per_second = 0.0;
        }

        if self.estimated_steps_per_second > 0.0 && self.movement_start_time.is_some() {
            let elapsed_sec =
                timestamp_ms.saturating_sub(self.last_real_step_count_time) as f64 / MS_PER_SECOND;
            let lead = (elapsed_sec * self.estimated_steps_per_second)
                .floor()
                .min(f64::from(self.config.max_lead_steps));
            self.interpolated_step_count = self.last_real_step_count.saturating_add(lead as u32);
        } else {
            self.interpolated_step_count = self.last_real_step_count;
        }

        self.interpolated_step_count
    }

    /// Cadence used by the last estimate (steps/s)
    #[must_use]
    pub const fn estimated_steps_per_second(&self) -> f64 {
        self.estimated_steps_per_second
    }

    /// Last value returned or converged to
    #[must_use]
    pub const fn interpolated_step_count(&self) -> u32 {
        self.interpolated_step_count
    }

    /// Last cumulative count reported by the hardware
    #[must_use]
    pub const fn last_real_step_count(&self) -> u32 {
        self.last_real_step_count
    }

    /// Whether a walking or running phase is in progress
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.movement_start_time.is_some()
    }

    /// Zero all state (call at session boundaries)
    pub fn reset(&mut self) {
        self.last_real_step_count = 0;
        self.last_real_step_count_time = 0;
        self.interpolated_step_count = 0;
        self.estimated_steps_per_second = 0.0;
        self.movement_start_time = None;
    }
}

/// Clamp `value` into `from` and map it linearly onto `to`
fn map_range(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span <= 0.0 {
        return to.0;
    }
    let clamped = value.max(from.0).min(from.1);
    ((clamped - from.0) / span).mul_add(to.1 - to.0, to.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_clamps_both_ends() {
        assert!((map_range(0.0, (1.5, 3.0), (1.5, 2.5)) - 1.5).abs() < 1e-9);
        assert!((map_range(10.0, (1.5, 3.0), (1.5, 2.5)) - 2.5).abs() < 1e-9);
        assert!((map_range(4.0, (3.0, 5.0), (2.5, 4.0)) - 3.25).abs() < 1e-9);
    }
}
