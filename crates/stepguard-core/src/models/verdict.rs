// ABOUTME: Session-level suspicion flags with severity and effect, plus the synthesized verdict
// ABOUTME: ValidationResult derives action and step counting from the collected flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a suspicion flag is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational only
    Info,
    /// Suspicious, steps are excluded
    Warning,
    /// Physically impossible, session is rejected
    Critical,
}

/// What a suspicion flag does to the final decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagEffect {
    /// Recorded only
    None,
    /// Session is kept but its steps are not counted
    ExcludeSteps,
    /// Session is discarded
    RejectSession,
}

/// Named finding from session-level analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspicionFlag {
    /// Average stride outside human range
    ImpossibleStride,
    /// Average speed too high for walking or running
    ImpossibleSpeed,
    /// More steps than one session can hold
    ExcessiveSteps,
    /// Movement pattern matches motorized transport
    VehicleDetected,
    /// Steps counted without leaving the spot
    StationaryWalking,
    /// Steps produced by shaking the device
    ShakingPattern,
    /// GPS too weak to judge, probably indoors
    IndoorSuspected,
}

impl SuspicionFlag {
    /// Severity attached to this flag
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::ImpossibleStride | Self::ImpossibleSpeed | Self::ExcessiveSteps => {
                Severity::Critical
            }
            Self::VehicleDetected | Self::StationaryWalking | Self::ShakingPattern => {
                Severity::Warning
            }
            Self::IndoorSuspected => Severity::Info,
        }
    }

    /// Effect attached to this flag
    #[must_use]
    pub const fn effect(&self) -> FlagEffect {
        match self {
            Self::ImpossibleStride | Self::ImpossibleSpeed | Self::ExcessiveSteps => {
                FlagEffect::RejectSession
            }
            Self::VehicleDetected | Self::StationaryWalking | Self::ShakingPattern => {
                FlagEffect::ExcludeSteps
            }
            Self::IndoorSuspected => FlagEffect::None,
        }
    }

    /// Stable string form used in logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ImpossibleStride => "IMPOSSIBLE_STRIDE",
            Self::ImpossibleSpeed => "IMPOSSIBLE_SPEED",
            Self::ExcessiveSteps => "EXCESSIVE_STEPS",
            Self::VehicleDetected => "VEHICLE_DETECTED",
            Self::StationaryWalking => "STATIONARY_WALKING",
            Self::ShakingPattern => "SHAKING_PATTERN",
            Self::IndoorSuspected => "INDOOR_SUSPECTED",
        }
    }

    /// Human-readable description for warning banners
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ImpossibleStride => "Average stride length is outside the human range",
            Self::ImpossibleSpeed => "Average speed is too high for walking",
            Self::ExcessiveSteps => "Step count is too high for a single session",
            Self::VehicleDetected => "Movement looks like motorized transport",
            Self::StationaryWalking => "Steps were counted without changing location",
            Self::ShakingPattern => "Steps look like the device was being shaken",
            Self::IndoorSuspected => "GPS signal suggests the session was indoors",
        }
    }
}

impl fmt::Display for SuspicionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final decision for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionAction {
    /// Store normally
    Accept,
    /// Store with suspicion metadata
    AcceptFlagged,
    /// Do not record
    Reject,
}

impl DecisionAction {
    /// Stable string form used in logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::AcceptFlagged => "ACCEPT_FLAGGED",
            Self::Reject => "REJECT",
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of session-level validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Flags in the order they were raised (duplicates possible)
    pub flags: Vec<SuspicionFlag>,
    /// Decision synthesized from the flags
    pub action: DecisionAction,
    /// Whether the session's steps count toward the user's totals
    pub should_count_steps: bool,
}

impl ValidationResult {
    /// Synthesize the decision from collected flags
    ///
    /// Any `RejectSession` effect rejects; any other flag marks the session as
    /// flagged. Steps are counted unless some flag excludes them.
    #[must_use]
    pub fn from_flags(flags: Vec<SuspicionFlag>) -> Self {
        let should_count_steps = !flags
            .iter()
            .any(|flag| flag.effect() == FlagEffect::ExcludeSteps);

        let action = if flags
            .iter()
            .any(|flag| flag.effect() == FlagEffect::RejectSession)
        {
            DecisionAction::Reject
        } else if flags.is_empty() {
            DecisionAction::Accept
        } else {
            DecisionAction::AcceptFlagged
        };

        Self {
            flags,
            action,
            should_count_steps,
        }
    }

    /// Clean verdict with no flags
    #[must_use]
    pub fn accepted() -> Self {
        Self::from_flags(Vec::new())
    }

    /// Whether the session is discarded
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.action == DecisionAction::Reject
    }

    /// Whether any flag was raised
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Whether a specific flag was raised
    #[must_use]
    pub fn has_flag(&self, flag: SuspicionFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Most serious severity among the flags
    #[must_use]
    pub fn highest_severity(&self) -> Option<Severity> {
        self.flags.iter().map(SuspicionFlag::severity).max()
    }
}
