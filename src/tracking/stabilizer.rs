// ABOUTME: Debounces the frame-by-frame movement classification into a stable state
// ABOUTME: A new state is committed only after persisting continuously for the stable duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::StabilizerConfig;
use crate::logging::SessionLogger;
use stepguard_core::MovementState;

/// Hysteresis filter over the raw movement classifier
///
/// Not thread-safe; one instance belongs to one tracking session.
#[derive(Debug, Clone, Default)]
pub struct MovementStateStabilizer {
    config: StabilizerConfig,
    pending_state: Option<MovementState>,
    last_change_time: Option<u64>,
    stable_state: Option<MovementState>,
}

impl MovementStateStabilizer {
    /// Create a stabilizer with the default 3 s stable duration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stabilizer with explicit settings
    #[must_use]
    pub fn with_config(config: StabilizerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Feed one classifier sample and get the stabilized state
    ///
    /// The first sample after construction or [`Self::reset`] seeds the
    /// stable state. A differing sample starts (or continues) a pending
    /// transition, and a sample matching the current state cancels it.
    pub fn update(&mut self, detected_state: MovementState, timestamp_ms: u64) -> MovementState {
        let current = *self.stable_state.get_or_insert(detected_state);

        if detected_state == current {
            self.pending_state = None;
            self.last_change_time = None;
            return current;
        }

        match (self.pending_state, self.last_change_time) {
            (Some(pending), Some(since)) if pending == detected_state => {
                if timestamp_ms.saturating_sub(since) >= self.config.stable_duration_ms {
                    SessionLogger::log_state_committed(
                        self.stable_state,
                        detected_state,
                        timestamp_ms,
                    );
                    self.stable_state = Some(detected_state);
                    self.pending_state = None;
                    self.last_change_time = None;
                }
            }
            _ => {
                self.pending_state = Some(detected_state);
                self.last_change_time = Some(timestamp_ms);
            }
        }

        self.stable_state.unwrap_or(detected_state)
    }

    /// Committed state, if any
    #[must_use]
    pub const fn stable_state(&self) -> Option<MovementState> {
        self.stable_state
    }

    /// State waiting to be committed, if any
    #[must_use]
    pub const fn pending_state(&self) -> Option<MovementState> {
        self.pending_state
    }

    /// Forget all state (call at session boundaries)
    pub fn reset(&mut self) {
        self.pending_state = None;
        self.last_change_time = None;
        self.stable_state = None;
    }
}
