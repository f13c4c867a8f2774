// ABOUTME: Loads recorded sensor samples and sessions from JSON and replays them through a tracker
// ABOUTME: Used by the CLI and tests to drive the pipeline from captured data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::tracking::{SensorSample, SessionOutcome, SessionTracker, TrackerUpdate};
use crate::validation::StepCountValidator;
use std::fs;
use std::path::Path;
use stepguard_core::{AppError, AppResult, WalkingSession};
use tracing::debug;

/// Read a JSON array of sensor samples
///
/// # Errors
///
/// Returns `StorageError` if the file cannot be read and `InvalidFormat` if it
/// is not a valid sample array
pub fn load_samples(path: &Path) -> AppResult<Vec<SensorSample>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::storage(format!("{}: {e}", path.display())))?;
    let samples: Vec<SensorSample> = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), count = samples.len(), "Loaded sensor samples");
    Ok(samples)
}

/// Read a JSON walking session
///
/// # Errors
///
/// Returns `StorageError` if the file cannot be read and `InvalidFormat` if it
/// is not a valid session
pub fn load_session(path: &Path) -> AppResult<WalkingSession> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::storage(format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Drive a tracker through recorded samples and finish the session
///
/// The session starts at `start_ms` (or the first sample) and ends at the
/// last sample. `on_update` sees every per-sample result.
///
/// # Errors
///
/// Returns `InvalidInput` when there is nothing to replay or samples are out
/// of order
pub fn replay<V, F>(
    tracker: &mut SessionTracker<V>,
    samples: &[SensorSample],
    start_ms: Option<u64>,
    mut on_update: F,
) -> AppResult<SessionOutcome>
where
    V: StepCountValidator,
    F: FnMut(&TrackerUpdate),
{
    let first = samples
        .first()
        .ok_or_else(|| AppError::invalid_input("no sensor samples to replay"))?;
    let start = start_ms.unwrap_or(first.timestamp_ms);
    if start > first.timestamp_ms {
        return Err(AppError::invalid_input(format!(
            "start {start} ms is after the first sample at {} ms",
            first.timestamp_ms
        )));
    }
    tracker.start(start);

    let mut end = start;
    for sample in samples {
        let update = tracker.process(sample)?;
        on_update(&update);
        end = sample.timestamp_ms;
    }
    tracker.finish(end)
}
