// ABOUTME: Per-session sensor-fusion loop wiring stabilizer, estimator and step gate together
// ABOUTME: Accumulates the gated step total, distance and GPS track, then validates the session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Tracker
//!
//! Owns one instance of every stateful component for a single tracking
//! session. Each [`SensorSample`] is processed synchronously:
//!
//! 1. the raw movement classification is stabilized
//! 2. the hardware counter is turned into a step delta
//! 3. the delta is gated by the [`StepCountValidator`]
//! 4. the estimator converges to the counted total and produces the live value
//!
//! [`SessionTracker::finish`] runs the session-level validator once and resets
//! every component so nothing leaks into the next session.

use crate::config::GuardConfig;
use crate::logging::SessionLogger;
use crate::tracking::{MovementStateStabilizer, StepEstimator};
use crate::validation::{DefaultStepCountValidator, StepCountValidator, WalkingSessionValidator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use stepguard_core::constants::tracking::RECENT_FIX_BUFFER;
use stepguard_core::{
    ActivityType, AppError, AppResult, GeoPoint, MovementState, RejectionReason,
    StepValidationInput, StepValidationResult, ValidationResult, WalkingSession,
};
use tracing::{debug, info};
use uuid::Uuid;

/// One tick of fused sensor readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Sample time (ms since epoch)
    pub timestamp_ms: u64,
    /// Raw movement classification for this tick
    pub detected_state: MovementState,
    /// Latest activity recognizer output
    #[serde(default)]
    pub activity_type: ActivityType,
    /// Cumulative hardware step counter
    pub hardware_step_count: u32,
    /// Acceleration magnitude (m/s²)
    #[serde(default)]
    pub acceleration: f64,
    /// Meters moved since the previous sample
    #[serde(default)]
    pub gps_distance: f64,
    /// GPS speed (m/s)
    #[serde(default)]
    pub gps_speed: f64,
    /// New GPS fix, if one arrived with this sample
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

/// What one processed sample produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackerUpdate {
    /// Sample time (ms since epoch)
    pub timestamp_ms: u64,
    /// Stabilized movement state
    pub stable_state: MovementState,
    /// Raw hardware delta for this sample
    pub step_delta: u32,
    /// Gate decision for the delta
    pub result: StepValidationResult,
    /// Gated running total
    pub counted_steps: u32,
    /// Interpolated value for live display
    pub display_steps: u32,
}

/// Rejected sample counts per reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionTally {
    counts: BTreeMap<RejectionReason, u32>,
}

impl RejectionTally {
    /// Count one rejection
    pub fn record(&mut self, reason: RejectionReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    /// Rejections for one reason
    #[must_use]
    pub fn count(&self, reason: RejectionReason) -> u32 {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    /// All rejections
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Iterate `(reason, count)` pairs in rule order
    pub fn iter(&self) -> impl Iterator<Item = (RejectionReason, u32)> + '_ {
        self.counts.iter().map(|(reason, count)| (*reason, *count))
    }
}

/// Result of finishing a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    /// Final session aggregate
    pub session: WalkingSession,
    /// Session-level verdict
    pub verdict: ValidationResult,
    /// Hardware steps observed, before gating
    pub raw_steps: u32,
    /// Samples refused by the real-time gate
    pub rejections: RejectionTally,
}

/// Sensor-fusion loop for one walking session
///
/// Not thread-safe; drive it from a single sensor-processing context.
#[derive(Debug)]
pub struct SessionTracker<V = DefaultStepCountValidator> {
    stabilizer: MovementStateStabilizer,
    estimator: StepEstimator,
    validator: V,
    session_validator: WalkingSessionValidator,
    session_id: Uuid,
    start_ms: Option<u64>,
    last_timestamp_ms: Option<u64>,
    last_hardware_count: Option<u32>,
    counted_steps: u32,
    raw_steps: u32,
    total_distance: f64,
    track: Vec<GeoPoint>,
    recent_fixes: VecDeque<GeoPoint>,
    rejections: RejectionTally,
}

impl SessionTracker<DefaultStepCountValidator> {
    /// Tracker with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&GuardConfig::default())
    }

    /// Tracker using the standard gate with the given thresholds
    #[must_use]
    pub fn from_config(config: &GuardConfig) -> Self {
        Self::with_validator(
            config,
            DefaultStepCountValidator::with_config(config.step_gate),
        )
    }
}

impl Default for SessionTracker<DefaultStepCountValidator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: StepCountValidator> SessionTracker<V> {
    /// Tracker with a custom step gate policy
    #[must_use]
    pub fn with_validator(config: &GuardConfig, validator: V) -> Self {
        Self {
            stabilizer: MovementStateStabilizer::with_config(config.stabilizer),
            estimator: StepEstimator::with_config(config.estimator),
            validator,
            session_validator: WalkingSessionValidator::with_config(config.session),
            session_id: Uuid::new_v4(),
            start_ms: None,
            last_timestamp_ms: None,
            last_hardware_count: None,
            counted_steps: 0,
            raw_steps: 0,
            total_distance: 0.0,
            track: Vec::new(),
            recent_fixes: VecDeque::with_capacity(RECENT_FIX_BUFFER),
            rejections: RejectionTally::default(),
        }
    }

    /// Begin a new session, discarding any previous state
    pub fn start(&mut self, timestamp_ms: u64) {
        self.clear();
        self.start_ms = Some(timestamp_ms);
        info!(session.id = %self.session_id, session.start_ms = timestamp_ms, "Walking session started");
    }

    /// Whether a session is in progress
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.start_ms.is_some()
    }

    /// Current session identifier
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Gated step total so far
    #[must_use]
    pub const fn counted_steps(&self) -> u32 {
        self.counted_steps
    }

    /// Rejections so far
    #[must_use]
    pub const fn rejections(&self) -> &RejectionTally {
        &self.rejections
    }

    /// Process one sensor sample
    ///
    /// Starts the session at the sample's timestamp if [`Self::start`] was not
    /// called.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the sample is older than the previous one or
    /// than the session start
    pub fn process(&mut self, sample: &SensorSample) -> AppResult<TrackerUpdate> {
        if let Some(last) = self.last_timestamp_ms {
            if sample.timestamp_ms < last {
                return Err(AppError::invalid_input(format!(
                    "sample at {} ms precedes previous sample at {last} ms",
                    sample.timestamp_ms
                )));
            }
        }
        if let Some(start) = self.start_ms {
            if sample.timestamp_ms < start {
                return Err(AppError::invalid_input(format!(
                    "sample at {} ms precedes session start at {start} ms",
                    sample.timestamp_ms
                )));
            }
        }
        if self.start_ms.is_none() {
            self.start(sample.timestamp_ms);
        }
        self.last_timestamp_ms = Some(sample.timestamp_ms);

        let stable_state = self
            .stabilizer
            .update(sample.detected_state, sample.timestamp_ms);
        let step_delta = self.step_delta(sample.hardware_step_count);
        self.raw_steps = self.raw_steps.saturating_add(step_delta);

        if sample.gps_distance.is_finite() && sample.gps_distance > 0.0 {
            self.total_distance += sample.gps_distance;
        }
        if let Some(fix) = sample.location {
            self.record_fix(fix);
        }

        let input = StepValidationInput {
            activity_type: sample.activity_type,
            movement_state: stable_state,
            gps_distance: sample.gps_distance,
            gps_speed: sample.gps_speed,
            acceleration: sample.acceleration,
            step_delta,
            locations: self.recent_fixes.iter().copied().collect(),
        };
        let result = self.validator.validate(&input);
        match result {
            StepValidationResult::Accepted { step_delta } => {
                self.counted_steps = self.counted_steps.saturating_add(step_delta);
            }
            StepValidationResult::Rejected { reason } => {
                SessionLogger::log_step_rejected(reason, step_delta, sample.timestamp_ms);
                self.rejections.record(reason);
            }
        }

        self.estimator
            .on_real_step_updated(self.counted_steps, sample.timestamp_ms);
        let display_steps =
            self.estimator
                .estimate(stable_state, sample.acceleration, sample.timestamp_ms);

        Ok(TrackerUpdate {
            timestamp_ms: sample.timestamp_ms,
            stable_state,
            step_delta,
            result,
            counted_steps: self.counted_steps,
            display_steps,
        })
    }

    /// Current aggregate without ending the session
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if no session is active or `end_ms` precedes
    /// the start, and `ValueOutOfRange` for timestamps chrono cannot represent
    pub fn snapshot(&self, end_ms: u64) -> AppResult<WalkingSession> {
        let start_ms = self
            .start_ms
            .ok_or_else(|| AppError::invalid_input("no walking session is active"))?;
        if end_ms < start_ms {
            return Err(AppError::invalid_input(format!(
                "session end {end_ms} ms precedes start {start_ms} ms"
            )));
        }

        Ok(WalkingSession {
            id: self.session_id,
            start_time: to_datetime(start_ms)?,
            end_time: to_datetime(end_ms)?,
            step_count: self.counted_steps,
            total_distance: self.total_distance,
            locations: self.track.clone(),
        })
    }

    /// Verdict for the session so far, without ending it
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::snapshot`]
    pub fn checkpoint(&self, end_ms: u64) -> AppResult<ValidationResult> {
        let session = self.snapshot(end_ms)?;
        Ok(self.session_validator.validate(&session))
    }

    /// End the session, validate it and reset every component
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::snapshot`]; state is kept on error
    pub fn finish(&mut self, end_ms: u64) -> AppResult<SessionOutcome> {
        let session = self.snapshot(end_ms)?;
        let verdict = self.session_validator.validate(&session);
        SessionLogger::log_session_verdict(session.id, session.step_count, &verdict);

        let outcome = SessionOutcome {
            session,
            verdict,
            raw_steps: self.raw_steps,
            rejections: std::mem::take(&mut self.rejections),
        };
        self.clear();
        Ok(outcome)
    }

    /// Delta against the previous hardware reading
    ///
    /// The first reading and a counter that went backwards (sensor reboot)
    /// only establish a new baseline.
    fn step_delta(&mut self, hardware_count: u32) -> u32 {
        let delta = match self.last_hardware_count {
            Some(previous) if hardware_count >= previous => hardware_count - previous,
            Some(previous) => {
                debug!(
                    previous,
                    current = hardware_count,
                    "Hardware step counter went backwards, rebasing"
                );
                0
            }
            None => 0,
        };
        self.last_hardware_count = Some(hardware_count);
        delta
    }

    fn record_fix(&mut self, fix: GeoPoint) {
        if self.recent_fixes.len() == RECENT_FIX_BUFFER {
            self.recent_fixes.pop_front();
        }
        self.recent_fixes.push_back(fix);
        self.track.push(fix);
    }

    fn clear(&mut self) {
        self.stabilizer.reset();
        self.estimator.reset();
        self.session_id = Uuid::new_v4();
        self.start_ms = None;
        self.last_timestamp_ms = None;
        self.last_hardware_count = None;
        self.counted_steps = 0;
        self.raw_steps = 0;
        self.total_distance = 0.0;
        self.track.clear();
        self.recent_fixes.clear();
        self.rejections = RejectionTally::default();
    }
}

fn to_datetime(timestamp_ms: u64) -> AppResult<DateTime<Utc>> {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| AppError::out_of_range(format!("timestamp {timestamp_ms} ms")))
}
