// ABOUTME: Command implementations for the stepguard CLI
// ABOUTME: Session validation, sensor replay and configuration display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use stepguard::config::GuardConfig;
use stepguard::logging::SessionLogger;
use stepguard::models::{SuspicionFlag, ValidationResult};
use stepguard::replay;
use stepguard::tracking::SessionTracker;
use stepguard::validation::WalkingSessionValidator;
use uuid::Uuid;

#[derive(Serialize)]
struct SessionReport {
    session_id: Uuid,
    verdict: ValidationResult,
    warnings: Vec<&'static str>,
}

pub fn validate_session(file: &Path) -> Result<()> {
    let config = GuardConfig::load().context("invalid STEPGUARD_* configuration")?;
    let session = replay::load_session(file)
        .with_context(|| format!("failed to load session from {}", file.display()))?;

    let verdict = WalkingSessionValidator::with_config(config.session).validate(&session);
    SessionLogger::log_session_verdict(session.id, session.step_count, &verdict);

    let warnings = verdict
        .flags
        .iter()
        .map(SuspicionFlag::description)
        .collect();
    print_json(&SessionReport {
        session_id: session.id,
        verdict,
        warnings,
    })
}

pub fn replay_samples(file: &Path, start: Option<u64>, trace: bool) -> Result<()> {
    let config = GuardConfig::load().context("invalid STEPGUARD_* configuration")?;
    let samples = replay::load_samples(file)
        .with_context(|| format!("failed to load samples from {}", file.display()))?;

    let mut tracker = SessionTracker::from_config(&config);
    let mut stdout = io::stdout().lock();
    let mut write_error = None;
    let outcome = replay::replay(&mut tracker, &samples, start, |update| {
        if trace && write_error.is_none() {
            if let Err(e) = serde_json::to_writer(&mut stdout, update)
                .map_err(io::Error::from)
                .and_then(|()| writeln!(stdout))
            {
                write_error = Some(e);
            }
        }
    })
    .context("replay failed")?;
    drop(stdout);

    if let Some(e) = write_error {
        return Err(e).context("failed to write trace output");
    }
    print_json(&outcome)
}

pub fn show_config() -> Result<()> {
    let config = GuardConfig::load().context("invalid STEPGUARD_* configuration")?;
    print_json(&config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
