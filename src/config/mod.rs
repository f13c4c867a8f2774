// ABOUTME: Threshold configuration for the stabilizer, estimator and both validators
// ABOUTME: Defaults from stepguard-core constants with STEPGUARD_* environment overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Guard Configuration
//!
//! Every threshold used by the pipeline lives in a typed config struct whose
//! `Default` matches the constants in `stepguard_core::constants`.
//! [`GuardConfig::load`] applies `STEPGUARD_*` environment overrides on top of
//! the defaults and validates the result.
//!
//! | Variable | Field |
//! |---|---|
//! | `STEPGUARD_STABLE_DURATION_MS` | `stabilizer.stable_duration_ms` |
//! | `STEPGUARD_MAX_LEAD_STEPS` | `estimator.max_lead_steps` |
//! | `STEPGUARD_CONVERGENCE_FACTOR` | `estimator.convergence_factor` |
//! | `STEPGUARD_SHAKE_MAX_GPS_DISTANCE_M` | `step_gate.shake_max_gps_distance_m` |
//! | `STEPGUARD_SHAKE_MIN_ACCELERATION` | `step_gate.shake_min_acceleration` |
//! | `STEPGUARD_VEHICLE_MIN_SPEED_MPS` | `step_gate.vehicle_min_speed_mps` |
//! | `STEPGUARD_STATIONARY_RULE_ENABLED` | `step_gate.stationary_rule_enabled` |
//! | `STEPGUARD_SESSION_MIN_STRIDE_M` | `session.min_stride_m` |
//! | `STEPGUARD_SESSION_MAX_STRIDE_M` | `session.max_stride_m` |
//! | `STEPGUARD_SESSION_MAX_SPEED_KMH` | `session.max_speed_kmh` |
//! | `STEPGUARD_SESSION_MAX_STEPS` | `session.max_steps` |
//! | `STEPGUARD_GPS_NOISE_FLOOR_M` | `session.gps_noise_floor_m` |

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use stepguard_core::constants::{estimator, session, stabilizer, step_gate};

/// Movement state stabilizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilizerConfig {
    /// How long a new state must persist before it is committed (ms)
    pub stable_duration_ms: u64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            stable_duration_ms: stabilizer::STABLE_DURATION_MS,
        }
    }
}

/// Step estimator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Maximum lead of the estimate over the last real count
    pub max_lead_steps: u32,
    /// Fraction of the residual closed per real-count update
    pub convergence_factor: f64,
    /// Residuals below this snap to the real count
    pub snap_threshold: u32,
    /// Walking acceleration range (m/s²)
    pub walking_accel_range: (f64, f64),
    /// Walking cadence range (steps/s)
    pub walking_cadence_range: (f64, f64),
    /// Running acceleration range (m/s²)
    pub running_accel_range: (f64, f64),
    /// Running cadence range (steps/s)
    pub running_cadence_range: (f64, f64),
    /// Cadence multiplier per update while the state is unknown
    pub unknown_decay: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_lead_steps: estimator::MAX_LEAD_STEPS,
            convergence_factor: estimator::CONVERGENCE_FACTOR,
            snap_threshold: estimator::SNAP_THRESHOLD,
            walking_accel_range: estimator::WALKING_ACCEL_RANGE,
            walking_cadence_range: estimator::WALKING_CADENCE_RANGE,
            running_accel_range: estimator::RUNNING_ACCEL_RANGE,
            running_cadence_range: estimator::RUNNING_CADENCE_RANGE,
            unknown_decay: estimator::UNKNOWN_CADENCE_DECAY,
        }
    }
}

/// Real-time step gate settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepGateConfig {
    /// GPS displacement (m) below which strong acceleration is shaking
    pub shake_max_gps_distance_m: f64,
    /// Acceleration (m/s²) above which a stationary phone is shaking
    pub shake_min_acceleration: f64,
    /// Speed (m/s) above which step-less movement is a vehicle
    pub vehicle_min_speed_mps: f64,
    /// Evaluate the walking-in-place rule in real time
    pub stationary_rule_enabled: bool,
    /// Stride (m) below which steps count as walking in place
    pub stationary_max_stride_m: f64,
    /// Position variance (m²) below which the user has not moved
    pub stationary_max_position_variance_m2: f64,
    /// Fixes needed before position variance is considered
    pub stationary_min_fixes: usize,
}

impl Default for StepGateConfig {
    fn default() -> Self {
        Self {
            shake_max_gps_distance_m: step_gate::SHAKE_MAX_GPS_DISTANCE_M,
            shake_min_acceleration: step_gate::SHAKE_MIN_ACCELERATION,
            vehicle_min_speed_mps: step_gate::VEHICLE_MIN_SPEED_MPS,
            stationary_rule_enabled: false,
            stationary_max_stride_m: step_gate::STATIONARY_MAX_STRIDE_M,
            stationary_max_position_variance_m2: step_gate::STATIONARY_MAX_POSITION_VARIANCE_M2,
            stationary_min_fixes: step_gate::STATIONARY_MIN_FIXES,
        }
    }
}

/// Session-level suspicion thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRulesConfig {
    /// Shortest plausible stride (m)
    pub min_stride_m: f64,
    /// Longest plausible stride (m)
    pub max_stride_m: f64,
    /// Highest plausible average speed (km/h)
    pub max_speed_kmh: f64,
    /// Highest plausible step total
    pub max_steps: u32,
    /// Stride (m) at or below which a non-moving session is walking in place
    pub stationary_max_stride_m: f64,
    /// Steps above which walking in place is flagged
    pub stationary_min_steps: u32,
    /// Speed (km/h) below which a non-moving session may be shaking
    pub shaking_max_speed_kmh: f64,
    /// Stride (m) below which a non-moving session may be shaking
    pub shaking_max_stride_m: f64,
    /// Displacement (m) the GPS track must exceed to count as moving
    pub gps_noise_floor_m: f64,
}

impl Default for SessionRulesConfig {
    fn default() -> Self {
        Self {
            min_stride_m: session::MIN_STRIDE_M,
            max_stride_m: session::MAX_STRIDE_M,
            max_speed_kmh: session::MAX_SPEED_KMH,
            max_steps: session::MAX_STEPS,
            stationary_max_stride_m: session::STATIONARY_MAX_STRIDE_M,
            stationary_min_steps: session::STATIONARY_MIN_STEPS,
            shaking_max_speed_kmh: session::SHAKING_MAX_SPEED_KMH,
            shaking_max_stride_m: session::SHAKING_MAX_STRIDE_M,
            gps_noise_floor_m: session::GPS_NOISE_FLOOR_M,
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Movement state stabilizer
    pub stabilizer: StabilizerConfig,
    /// Step estimator
    pub estimator: EstimatorConfig,
    /// Real-time step gate
    pub step_gate: StepGateConfig,
    /// Session-level validator
    pub session: SessionRulesConfig,
}

impl GuardConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparsable value
    /// or the resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Check ordering and range invariants of every threshold
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_estimator()?;
        self.validate_step_gate()?;
        self.validate_session()
    }

    fn validate_estimator(&self) -> Result<(), ConfigError> {
        let est = &self.estimator;
        if !all_finite(&[
            est.convergence_factor,
            est.unknown_decay,
            est.walking_accel_range.0,
            est.walking_accel_range.1,
            est.walking_cadence_range.0,
            est.walking_cadence_range.1,
            est.running_accel_range.0,
            est.running_accel_range.1,
            est.running_cadence_range.0,
            est.running_cadence_range.1,
        ]) {
            return Err(ConfigError::ValueOutOfRange(
                "estimator settings must be finite",
            ));
        }
        if !(est.convergence_factor > 0.0 && est.convergence_factor <= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "convergence_factor must be in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&est.unknown_decay) {
            return Err(ConfigError::ValueOutOfRange(
                "unknown_decay must be in [0, 1]",
            ));
        }
        if est.walking_accel_range.0 >= est.walking_accel_range.1
            || est.running_accel_range.0 >= est.running_accel_range.1
        {
            return Err(ConfigError::InvalidRange(
                "acceleration ranges must be ascending",
            ));
        }
        if est.walking_cadence_range.0 > est.walking_cadence_range.1
            || est.running_cadence_range.0 > est.running_cadence_range.1
        {
            return Err(ConfigError::InvalidRange(
                "cadence ranges must be ascending",
            ));
        }
        if est.walking_cadence_range.0 < 0.0 {
            return Err(ConfigError::ValueOutOfRange("cadence must be non-negative"));
        }
        Ok(())
    }

    fn validate_step_gate(&self) -> Result<(), ConfigError> {
        let gate = &self.step_gate;
        if !all_finite(&[
            gate.shake_max_gps_distance_m,
            gate.shake_min_acceleration,
            gate.vehicle_min_speed_mps,
            gate.stationary_max_stride_m,
            gate.stationary_max_position_variance_m2,
        ]) {
            return Err(ConfigError::ValueOutOfRange(
                "step gate thresholds must be finite",
            ));
        }
        if gate.shake_max_gps_distance_m < 0.0
            || gate.shake_min_acceleration < 0.0
            || gate.vehicle_min_speed_mps < 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "step gate thresholds must be non-negative",
            ));
        }
        if gate.stationary_max_stride_m <= 0.0 || gate.stationary_max_position_variance_m2 < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "stationary stride must be positive and variance non-negative",
            ));
        }
        if gate.stationary_min_fixes < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "stationary_min_fixes must be at least 2",
            ));
        }
        Ok(())
    }

    fn validate_session(&self) -> Result<(), ConfigError> {
        let rules = &self.session;
        if !all_finite(&[
            rules.min_stride_m,
            rules.max_stride_m,
            rules.max_speed_kmh,
            rules.stationary_max_stride_m,
            rules.shaking_max_speed_kmh,
            rules.shaking_max_stride_m,
            rules.gps_noise_floor_m,
        ]) {
            return Err(ConfigError::ValueOutOfRange(
                "session thresholds must be finite",
            ));
        }
        if rules.min_stride_m < 0.0 || rules.min_stride_m >= rules.max_stride_m {
            return Err(ConfigError::InvalidRange(
                "min_stride_m must be >= 0 and < max_stride_m",
            ));
        }
        if rules.max_speed_kmh <= 0.0 || rules.max_steps == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_speed_kmh and max_steps must be positive",
            ));
        }
        if rules.gps_noise_floor_m < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "gps_noise_floor_m must be non-negative",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        let val = match env::var(env_var_name) {
            Ok(val) => val,
            Err(env::VarError::NotPresent) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "STEPGUARD_STABLE_DURATION_MS",
            &mut self.stabilizer.stable_duration_ms,
        )?;

        Self::apply_env_var("STEPGUARD_MAX_LEAD_STEPS", &mut self.estimator.max_lead_steps)?;
        Self::apply_env_var(
            "STEPGUARD_CONVERGENCE_FACTOR",
            &mut self.estimator.convergence_factor,
        )?;

        Self::apply_env_var(
            "STEPGUARD_SHAKE_MAX_GPS_DISTANCE_M",
            &mut self.step_gate.shake_max_gps_distance_m,
        )?;
        Self::apply_env_var(
            "STEPGUARD_SHAKE_MIN_ACCELERATION",
            &mut self.step_gate.shake_min_acceleration,
        )?;
        Self::apply_env_var(
            "STEPGUARD_VEHICLE_MIN_SPEED_MPS",
            &mut self.step_gate.vehicle_min_speed_mps,
        )?;
        Self::apply_env_var(
            "STEPGUARD_STATIONARY_RULE_ENABLED",
            &mut self.step_gate.stationary_rule_enabled,
        )?;

        Self::apply_env_var("STEPGUARD_SESSION_MIN_STRIDE_M", &mut self.session.min_stride_m)?;
        Self::apply_env_var("STEPGUARD_SESSION_MAX_STRIDE_M", &mut self.session.max_stride_m)?;
        Self::apply_env_var(
            "STEPGUARD_SESSION_MAX_SPEED_KMH",
            &mut self.session.max_speed_kmh,
        )?;
        Self::apply_env_var("STEPGUARD_SESSION_MAX_STEPS", &mut self.session.max_steps)?;
        Self::apply_env_var(
            "STEPGUARD_GPS_NOISE_FLOOR_M",
            &mut self.session.gps_noise_floor_m,
        )?;

        Ok(self)
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
