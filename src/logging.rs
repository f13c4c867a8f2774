// ABOUTME: Logging configuration and structured event helpers for the validation pipeline
// ABOUTME: Configures tracing-subscriber output and emits stable fields for rejections and verdicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup.
//!
//! The pipeline components only emit `tracing` events; installing a
//! subscriber is left to the embedding application (or the CLI) through
//! [`LoggingConfig::init`].

use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use stepguard_core::{
    DecisionAction, MovementState, RejectionReason, SuspicionFlag, ValidationResult,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uuid::Uuid;

/// Default service name in structured logs
pub const SERVICE_NAME: &str = "stepguard";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse from string, falling back to pretty output
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            service_name: SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map(|v| LogFormat::from_str_or_default(&v))
            .unwrap_or(LogFormat::Pretty);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Same configuration at a different level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let env_filter = EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(env_filter);

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
            }
        });
        debug!("Logging initialized: {}", summary);
    }
}

/// Structured events emitted by the tracking and validation components
pub struct SessionLogger;

impl SessionLogger {
    /// A step delta was refused by the real-time gate
    pub fn log_step_rejected(reason: RejectionReason, step_delta: u32, timestamp_ms: u64) {
        debug!(
            step.reason = %reason,
            step.delta = step_delta,
            sample.timestamp_ms = timestamp_ms,
            "Step delta rejected"
        );
    }

    /// Input signals were replaced because they were negative or not finite
    pub fn log_input_sanitized(gps_distance: f64, gps_speed: f64, acceleration: f64) {
        debug!(
            input.gps_distance = gps_distance,
            input.gps_speed = gps_speed,
            input.acceleration = acceleration,
            "Step validation input sanitized"
        );
    }

    /// The stabilizer committed a new movement state
    pub fn log_state_committed(from: Option<MovementState>, to: MovementState, timestamp_ms: u64) {
        debug!(
            movement.from = from.map_or("NONE", |s| s.as_str()),
            movement.to = %to,
            sample.timestamp_ms = timestamp_ms,
            "Movement state committed"
        );
    }

    /// Session-level verdict
    pub fn log_session_verdict(session_id: Uuid, step_count: u32, result: &ValidationResult) {
        let flags: Vec<&str> = result.flags.iter().map(SuspicionFlag::as_str).collect();
        match result.action {
            DecisionAction::Accept => info!(
                session.id = %session_id,
                session.steps = step_count,
                session.action = %result.action,
                "Walking session accepted"
            ),
            DecisionAction::AcceptFlagged => warn!(
                session.id = %session_id,
                session.steps = step_count,
                session.action = %result.action,
                session.flags = ?flags,
                session.count_steps = result.should_count_steps,
                "Walking session flagged"
            ),
            DecisionAction::Reject => warn!(
                session.id = %session_id,
                session.steps = step_count,
                session.action = %result.action,
                session.flags = ?flags,
                "Walking session rejected"
            ),
        }
    }
}
