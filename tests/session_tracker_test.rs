// ABOUTME: Integration tests for the per-session sensor-fusion loop
// ABOUTME: Covers gated counting, rejection tallies, counter reboots, live display bounds and session lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{track_east, walking_sample};
use stepguard::config::GuardConfig;
use stepguard::errors::ErrorCode;
use stepguard::models::{
    DecisionAction, MovementState, RejectionReason, StepValidationInput, StepValidationResult,
};
use stepguard::tracking::{SensorSample, SessionTracker};
use stepguard::validation::StepCountValidator;

fn shake_sample(timestamp_ms: u64, hardware_step_count: u32) -> SensorSample {
    SensorSample {
        acceleration: 3.0,
        gps_distance: 0.5,
        gps_speed: 0.1,
        ..walking_sample(timestamp_ms, hardware_step_count)
    }
}

fn vehicle_sample(timestamp_ms: u64, hardware_step_count: u32) -> SensorSample {
    SensorSample {
        acceleration: 0.5,
        gps_distance: 50.0,
        gps_speed: 5.0,
        ..walking_sample(timestamp_ms, hardware_step_count)
    }
}

#[test]
fn test_counts_accepted_walking_steps() {
    let mut tracker = SessionTracker::new();
    let first = tracker.process(&walking_sample(0, 100)).unwrap();
    assert_eq!(first.step_delta, 0);
    assert_eq!(first.counted_steps, 0);
    assert!(tracker.is_active());

    for i in 1..=10_u32 {
        let update = tracker
            .process(&walking_sample(u64::from(i) * 1_000, 100 + 2 * i))
            .unwrap();
        assert_eq!(update.step_delta, 2);
        assert_eq!(update.result, StepValidationResult::Accepted { step_delta: 2 });
        assert_eq!(update.stable_state, MovementState::Walking);
    }
    assert_eq!(tracker.counted_steps(), 20);

    let outcome = tracker.finish(10_000).unwrap();
    assert_eq!(outcome.session.step_count, 20);
    assert_eq!(outcome.raw_steps, 20);
    assert!((outcome.session.total_distance - 17.6).abs() < 1e-9);
    assert!((outcome.session.duration_seconds() - 10.0).abs() < 1e-9);
    assert_eq!(outcome.verdict.action, DecisionAction::Accept);
    assert_eq!(outcome.rejections.total(), 0);
}

#[test]
fn test_rejected_deltas_are_tallied_not_counted() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(0, 0)).unwrap();
    tracker.process(&walking_sample(1_000, 5)).unwrap();

    let shaken = tracker.process(&shake_sample(2_000, 10)).unwrap();
    assert_eq!(
        shaken.result,
        StepValidationResult::Rejected {
            reason: RejectionReason::PhoneShake
        }
    );
    assert_eq!(shaken.counted_steps, 5);

    let driven = tracker.process(&vehicle_sample(3_000, 10)).unwrap();
    assert_eq!(driven.result.rejection_reason(), Some(RejectionReason::VehicleMovement));

    tracker.process(&walking_sample(4_000, 12)).unwrap();
    assert_eq!(tracker.counted_steps(), 7);
    assert_eq!(tracker.rejections().count(RejectionReason::PhoneShake), 1);
    assert_eq!(tracker.rejections().count(RejectionReason::VehicleMovement), 1);

    let outcome = tracker.finish(4_000).unwrap();
    assert_eq!(outcome.raw_steps, 12);
    assert_eq!(outcome.session.step_count, 7);
    assert_eq!(outcome.rejections.total(), 2);
    let reasons: Vec<_> = outcome.rejections.iter().collect();
    assert_eq!(
        reasons,
        vec![
            (RejectionReason::PhoneShake, 1),
            (RejectionReason::VehicleMovement, 1)
        ]
    );
}

#[test]
fn test_brief_still_classification_keeps_counting() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(0, 0)).unwrap();

    let blip = SensorSample {
        detected_state: MovementState::Still,
        ..walking_sample(1_000, 3)
    };
    let update = tracker.process(&blip).unwrap();
    assert_eq!(update.stable_state, MovementState::Walking);
    assert!(update.result.is_accepted());
}

#[test]
fn test_sustained_still_stops_counting() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(0, 0)).unwrap();

    let mut last = None;
    for i in 1..=4_u32 {
        let sample = SensorSample {
            detected_state: MovementState::Still,
            ..walking_sample(u64::from(i) * 1_000, i)
        };
        last = Some(tracker.process(&sample).unwrap());
    }
    // Still pending since 1000 and committed at 4000, the first three deltas count
    let last = last.unwrap();
    assert_eq!(last.stable_state, MovementState::Still);
    assert_eq!(
        last.result.rejection_reason(),
        Some(RejectionReason::InvalidMovementState)
    );
    assert_eq!(tracker.counted_steps(), 3);
}

#[test]
fn test_hardware_counter_reboot_rebases() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(0, 500)).unwrap();
    tracker.process(&walking_sample(1_000, 510)).unwrap();

    let rebooted = tracker.process(&walking_sample(2_000, 3)).unwrap();
    assert_eq!(rebooted.step_delta, 0);

    tracker.process(&walking_sample(3_000, 8)).unwrap();
    assert_eq!(tracker.counted_steps(), 15);
}

#[test]
fn test_out_of_order_sample_is_an_error() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(5_000, 10)).unwrap();

    let err = tracker.process(&walking_sample(4_000, 12)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // same timestamp is fine
    assert!(tracker.process(&walking_sample(5_000, 12)).is_ok());
    assert_eq!(tracker.counted_steps(), 2);
}

#[test]
fn test_sample_before_session_start_is_an_error() {
    let mut tracker = SessionTracker::new();
    tracker.start(5_000);

    let err = tracker.process(&walking_sample(1_000, 0)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(tracker.counted_steps(), 0);

    tracker.process(&walking_sample(5_000, 0)).unwrap();
    tracker.process(&walking_sample(6_000, 3)).unwrap();
    let outcome = tracker.finish(6_000).unwrap();
    assert_eq!(outcome.session.step_count, 3);
}

#[test]
fn test_display_steps_stay_within_lead_of_counted() {
    let config = GuardConfig::default();
    let max_lead = config.estimator.max_lead_steps;
    let mut tracker = SessionTracker::from_config(&config);

    // hardware reports in bursts every 5 s while samples arrive every 500 ms
    for i in 0..40_u32 {
        let hardware = (i / 10) * 9;
        let sample = SensorSample {
            acceleration: 2.4,
            ..walking_sample(u64::from(i) * 500, hardware)
        };
        let update = tracker.process(&sample).unwrap();
        assert!(update.display_steps >= update.counted_steps);
        assert!(update.display_steps <= update.counted_steps + max_lead);
    }
}

#[test]
fn test_display_steps_lead_between_hardware_updates() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(0, 0)).unwrap();
    let update = tracker.process(&walking_sample(2_000, 0)).unwrap();
    // cadence 1.7 steps/s for 2 s
    assert_eq!(update.counted_steps, 0);
    assert_eq!(update.display_steps, 3);
}

#[test]
fn test_gps_fixes_build_the_track() {
    let fixes = track_east(12, 10.0);
    let mut tracker = SessionTracker::new();
    for (i, fix) in fixes.iter().enumerate() {
        let sample = SensorSample {
            location: Some(*fix),
            ..walking_sample(i as u64 * 1_000, i as u32 * 12)
        };
        tracker.process(&sample).unwrap();
    }

    let session = tracker.snapshot(11_000).unwrap();
    assert_eq!(session.locations.len(), 12);
    assert!(session.has_meaningful_gps_movement(20.0));
    assert!((session.track_length_m() - 110.0).abs() < 1.0);
}

#[test]
fn test_checkpoint_does_not_end_session() {
    let mut tracker = SessionTracker::new();
    tracker.start(0);
    tracker.process(&walking_sample(1_000, 0)).unwrap();
    tracker.process(&walking_sample(2_000, 2)).unwrap();

    let verdict = tracker.checkpoint(2_000).unwrap();
    assert_eq!(verdict.action, DecisionAction::Accept);
    assert!(tracker.is_active());
    assert_eq!(tracker.counted_steps(), 2);

    let snapshot = tracker.snapshot(2_000).unwrap();
    assert_eq!(snapshot.id, tracker.session_id());
    assert!((snapshot.duration_seconds() - 2.0).abs() < 1e-9);
}

#[test]
fn test_finish_resets_for_next_session() {
    let mut tracker = SessionTracker::new();
    tracker.process(&walking_sample(0, 0)).unwrap();
    tracker.process(&shake_sample(1_000, 4)).unwrap();
    let first_id = tracker.session_id();

    let outcome = tracker.finish(1_000).unwrap();
    assert_eq!(outcome.session.id, first_id);
    assert!(!tracker.is_active());
    assert_eq!(tracker.counted_steps(), 0);
    assert_eq!(tracker.rejections().total(), 0);
    assert_ne!(tracker.session_id(), first_id);

    // next session starts from a fresh baseline
    let update = tracker.process(&walking_sample(500, 1_000)).unwrap();
    assert_eq!(update.step_delta, 0);
    assert_eq!(update.stable_state, MovementState::Walking);
}

#[test]
fn test_finish_errors_keep_state() {
    let mut tracker = SessionTracker::new();
    assert_eq!(
        tracker.snapshot(1_000).unwrap_err().code,
        ErrorCode::InvalidInput
    );

    tracker.start(5_000);
    tracker.process(&walking_sample(5_000, 0)).unwrap();
    tracker.process(&walking_sample(6_000, 3)).unwrap();

    let err = tracker.finish(4_000).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(tracker.is_active());
    assert_eq!(tracker.counted_steps(), 3);
}

struct RunningOnly;

impl StepCountValidator for RunningOnly {
    fn validate(&self, input: &StepValidationInput) -> StepValidationResult {
        if input.movement_state == MovementState::Running {
            StepValidationResult::Accepted {
                step_delta: input.step_delta,
            }
        } else {
            StepValidationResult::Rejected {
                reason: RejectionReason::InvalidMovementState,
            }
        }
    }
}

#[test]
fn test_custom_gate_policy() {
    let policy: Box<dyn StepCountValidator> = Box::new(RunningOnly);
    let mut tracker = SessionTracker::with_validator(&GuardConfig::default(), policy);

    tracker.process(&walking_sample(0, 0)).unwrap();
    tracker.process(&walking_sample(1_000, 4)).unwrap();
    assert_eq!(tracker.counted_steps(), 0);
    assert_eq!(
        tracker.rejections().count(RejectionReason::InvalidMovementState),
        2
    );
}
