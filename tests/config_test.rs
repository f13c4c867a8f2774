// ABOUTME: Tests for threshold configuration defaults, environment overrides and validation
// ABOUTME: Environment-mutating tests run serially to avoid cross-test interference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use stepguard::config::{ConfigError, GuardConfig, SessionRulesConfig, StepGateConfig};
use stepguard::constants::{session, stabilizer, step_gate};
use stepguard::errors::{AppError, ErrorCode};
use stepguard::logging::{LogFormat, LoggingConfig};

const OVERRIDE_VARS: [&str; 7] = [
    "STEPGUARD_STABLE_DURATION_MS",
    "STEPGUARD_SHAKE_MIN_ACCELERATION",
    "STEPGUARD_MAX_LEAD_STEPS",
    "STEPGUARD_STATIONARY_RULE_ENABLED",
    "STEPGUARD_SESSION_MIN_STRIDE_M",
    "STEPGUARD_SESSION_MAX_STEPS",
    "STEPGUARD_GPS_NOISE_FLOOR_M",
];

fn clear_overrides() {
    for var in OVERRIDE_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_defaults_match_constants() {
    let config = GuardConfig::default();
    assert_eq!(
        config.stabilizer.stable_duration_ms,
        stabilizer::STABLE_DURATION_MS
    );
    assert!(
        (config.step_gate.shake_max_gps_distance_m - step_gate::SHAKE_MAX_GPS_DISTANCE_M).abs()
            < f64::EPSILON
    );
    assert!(!config.step_gate.stationary_rule_enabled);
    assert_eq!(config.session.max_steps, session::MAX_STEPS);
    assert!((config.session.max_speed_kmh - 20.0).abs() < f64::EPSILON);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_without_overrides_is_default() {
    clear_overrides();
    assert_eq!(GuardConfig::load().unwrap(), GuardConfig::default());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_overrides();
    env::set_var("STEPGUARD_STABLE_DURATION_MS", " 5000 ");
    env::set_var("STEPGUARD_STATIONARY_RULE_ENABLED", "true");
    env::set_var("STEPGUARD_SESSION_MAX_STEPS", "50000");
    env::set_var("STEPGUARD_GPS_NOISE_FLOOR_M", "35.5");

    let config = GuardConfig::load().unwrap();
    clear_overrides();

    assert_eq!(config.stabilizer.stable_duration_ms, 5_000);
    assert!(config.step_gate.stationary_rule_enabled);
    assert_eq!(config.session.max_steps, 50_000);
    assert!((config.session.gps_noise_floor_m - 35.5).abs() < f64::EPSILON);
    // untouched values keep their defaults
    assert_eq!(config.estimator.max_lead_steps, 10);
}

#[test]
#[serial]
fn test_unparsable_override_is_rejected() {
    clear_overrides();
    env::set_var("STEPGUARD_MAX_LEAD_STEPS", "ten");

    let result = GuardConfig::load();
    clear_overrides();

    match result {
        Err(ConfigError::Parse(message)) => {
            assert!(message.contains("STEPGUARD_MAX_LEAD_STEPS"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_override_failing_validation_is_rejected() {
    clear_overrides();
    env::set_var("STEPGUARD_SESSION_MIN_STRIDE_M", "3.0");

    let result = GuardConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
#[serial]
fn test_non_finite_override_is_rejected() {
    clear_overrides();
    env::set_var("STEPGUARD_SHAKE_MIN_ACCELERATION", "NaN");

    let result = GuardConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_override_is_rejected() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    clear_overrides();
    env::set_var(
        "STEPGUARD_STABLE_DURATION_MS",
        OsString::from_vec(vec![0x35, 0xff, 0x30]),
    );

    let result = GuardConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::EnvVar(_))));
}

#[test]
fn test_validate_estimator_bounds() {
    let mut config = GuardConfig::default();
    config.estimator.convergence_factor = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    config.estimator.convergence_factor = 1.0;
    assert!(config.validate().is_ok());

    config.estimator.walking_accel_range = (3.0, 1.5);
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_validate_gate_and_session_bounds() {
    let gate = GuardConfig {
        step_gate: StepGateConfig {
            vehicle_min_speed_mps: -1.0,
            ..StepGateConfig::default()
        },
        ..GuardConfig::default()
    };
    assert!(matches!(gate.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let session = GuardConfig {
        session: SessionRulesConfig {
            max_steps: 0,
            ..SessionRulesConfig::default()
        },
        ..GuardConfig::default()
    };
    assert!(matches!(
        session.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));
}

#[test]
fn test_validate_rejects_non_finite_thresholds() {
    let mut config = GuardConfig::default();
    config.session.gps_noise_floor_m = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    let mut config = GuardConfig::default();
    config.estimator.running_accel_range = (3.0, f64::INFINITY);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));
}

#[test]
fn test_config_error_converts_to_app_error() {
    let err: AppError = ConfigError::InvalidRange("min_stride_m must be >= 0 and < max_stride_m").into();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("min_stride_m"));
}

#[test]
fn test_config_serializes_by_section() {
    let value = serde_json::to_value(GuardConfig::default()).unwrap();
    assert_eq!(value["stabilizer"]["stable_duration_ms"], 3000);
    assert_eq!(value["step_gate"]["stationary_rule_enabled"], false);
    assert_eq!(value["session"]["max_steps"], 100_000);
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("json"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("COMPACT"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str_or_default("unknown"), LogFormat::Pretty); // Default fallback
}

#[test]
fn test_logging_level_override() {
    let config = LoggingConfig::default().with_level("debug");
    assert_eq!(config.level, "debug");
    assert_eq!(config.service_name, "stepguard");
}
