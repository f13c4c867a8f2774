// ABOUTME: Integration tests for the live step estimator
// ABOUTME: Validates cadence mapping, bounded lead, convergence to real counts and reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use stepguard::models::MovementState;
use stepguard::tracking::StepEstimator;

/// Estimator whose interpolated count sits at 40 with a real count of 30
fn estimator_leading_at_40() -> StepEstimator {
    let mut estimator = StepEstimator::new();
    estimator.on_real_step_updated(30, 0);
    let estimate = estimator.estimate(MovementState::Walking, 3.0, 10_000);
    assert_eq!(estimate, 40);
    estimator
}

#[test]
fn test_walking_cadence_interpolates_between_ticks() {
    let mut estimator = StepEstimator::new();
    estimator.on_real_step_updated(100, 0);

    // acceleration 2.25 sits midway in [1.5, 3.0] -> 2.0 steps/s
    let estimate = estimator.estimate(MovementState::Walking, 2.25, 2_000);
    assert!((estimator.estimated_steps_per_second() - 2.0).abs() < 1e-9);
    assert_eq!(estimate, 104);
}

#[test]
fn test_running_cadence_mapping_is_clamped() {
    let mut estimator = StepEstimator::new();
    estimator.estimate(MovementState::Running, 9.0, 0);
    assert!((estimator.estimated_steps_per_second() - 4.0).abs() < 1e-9);

    estimator.estimate(MovementState::Running, 0.0, 100);
    assert!((estimator.estimated_steps_per_second() - 2.5).abs() < 1e-9);
}

#[test]
fn test_lead_never_exceeds_ten_steps() {
    let mut estimator = StepEstimator::new();
    estimator.on_real_step_updated(500, 0);

    for t in (0..120_000).step_by(250) {
        let state = if t % 2_000 < 1_000 {
            MovementState::Running
        } else {
            MovementState::Walking
        };
        let estimate = estimator.estimate(state, 5.0, t);
        assert!(estimate <= estimator.last_real_step_count() + 10);
    }
    assert_eq!(estimator.interpolated_step_count(), 510);
}

#[test]
fn test_convergence_closes_thirty_percent_of_residual() {
    let mut estimator = estimator_leading_at_40();
    estimator.on_real_step_updated(100, 10_000);
    assert_eq!(estimator.interpolated_step_count(), 58);
    assert_eq!(estimator.last_real_step_count(), 100);
}

#[test]
fn test_repeated_updates_snap_exactly_to_real_count() {
    let mut estimator = estimator_leading_at_40();
    let mut previous = estimator.interpolated_step_count();
    for _ in 0..30 {
        estimator.on_real_step_updated(100, 10_000);
        let current = estimator.interpolated_step_count();
        assert!(current >= previous && current <= 100);
        previous = current;
    }
    assert_eq!(estimator.interpolated_step_count(), 100);
}

#[test]
fn test_small_residual_snaps_immediately() {
    let mut estimator = StepEstimator::new();
    estimator.on_real_step_updated(1, 0);
    assert_eq!(estimator.interpolated_step_count(), 1);
}

#[test]
fn test_convergence_downward_when_estimate_ran_ahead() {
    let mut estimator = estimator_leading_at_40();
    estimator.on_real_step_updated(20, 10_000);
    // residual -20 -> step -6
    assert_eq!(estimator.interpolated_step_count(), 34);
}

#[test]
fn test_still_snaps_back_to_real_count() {
    let mut estimator = estimator_leading_at_40();
    assert_eq!(estimator.estimate(MovementState::Still, 3.0, 11_000), 30);
    assert!(!estimator.is_moving());
    assert!(estimator.estimated_steps_per_second().abs() < f64::EPSILON);
}

#[test]
fn test_unknown_state_ends_movement() {
    let mut estimator = StepEstimator::new();
    estimator.on_real_step_updated(100, 0);
    assert_eq!(estimator.estimate(MovementState::Walking, 3.0, 1_000), 102);
    assert!(estimator.is_moving());

    assert_eq!(estimator.estimate(MovementState::Unknown, 3.0, 4_000), 100);
    assert!(!estimator.is_moving());
    assert!(estimator.estimated_steps_per_second().abs() < f64::EPSILON);
}

#[test]
fn test_unknown_without_movement_stays_idle() {
    let mut estimator = StepEstimator::new();
    estimator.on_real_step_updated(12, 0);
    assert_eq!(estimator.estimate(MovementState::Unknown, 2.0, 5_000), 12);
    assert!(!estimator.is_moving());
}

#[test]
fn test_nan_acceleration_uses_lowest_cadence() {
    let mut estimator = StepEstimator::new();
    estimator.estimate(MovementState::Walking, f64::NAN, 0);
    assert!((estimator.estimated_steps_per_second() - 1.5).abs() < 1e-9);
}

#[test]
fn test_reset_zeroes_everything() {
    let mut estimator = estimator_leading_at_40();
    estimator.reset();
    assert_eq!(estimator.interpolated_step_count(), 0);
    assert_eq!(estimator.last_real_step_count(), 0);
    assert!(!estimator.is_moving());
    assert_eq!(estimator.estimate(MovementState::Still, 0.0, 0), 0);
}
