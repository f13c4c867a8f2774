// ABOUTME: Default thresholds for movement stabilization, step estimation and validation
// ABOUTME: Organized by component so configuration defaults and tests share one source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Default thresholds used throughout the validation pipeline.
//!
//! Every value here is the default of a configuration field in the
//! `stepguard` crate and can be overridden at runtime.

/// Movement state stabilization
pub mod stabilizer {
    /// How long a newly detected state must persist before it is committed (ms)
    pub const STABLE_DURATION_MS: u64 = 3000;
}

/// Step count interpolation between hardware ticks
pub mod estimator {
    /// Maximum number of steps the estimate may run ahead of the last hardware count
    pub const MAX_LEAD_STEPS: u32 = 10;

    /// Fraction of the residual closed per real-count update
    pub const CONVERGENCE_FACTOR: f64 = 0.3;

    /// Residuals smaller than this snap straight to the real count
    pub const SNAP_THRESHOLD: u32 = 2;

    /// Walking acceleration range mapped onto the walking cadence range (m/s²)
    pub const WALKING_ACCEL_RANGE: (f64, f64) = (1.5, 3.0);

    /// Walking cadence range (steps/s)
    pub const WALKING_CADENCE_RANGE: (f64, f64) = (1.5, 2.5);

    /// Running acceleration range mapped onto the running cadence range (m/s²)
    pub const RUNNING_ACCEL_RANGE: (f64, f64) = (3.0, 5.0);

    /// Running cadence range (steps/s)
    pub const RUNNING_CADENCE_RANGE: (f64, f64) = (2.5, 4.0);

    /// Per-update cadence decay while the classifier reports an unknown state
    pub const UNKNOWN_CADENCE_DECAY: f64 = 0.9;
}

/// Real-time per-sample step gate
pub mod step_gate {
    /// Below this GPS displacement (m) a strong acceleration counts as shaking
    pub const SHAKE_MAX_GPS_DISTANCE_M: f64 = 1.5;

    /// Acceleration magnitude (m/s²) above which a stationary phone is shaking
    pub const SHAKE_MIN_ACCELERATION: f64 = 2.5;

    /// GPS speed (m/s) above which zero-step movement is treated as a vehicle
    pub const VEHICLE_MIN_SPEED_MPS: f64 = 3.5;

    /// Stride (m) below which steps with no displacement count as walking in place
    pub const STATIONARY_MAX_STRIDE_M: f64 = 0.3;

    /// Position variance (m²) of recent fixes below which the user is stationary
    pub const STATIONARY_MAX_POSITION_VARIANCE_M2: f64 = 4.0;

    /// Fixes required before the position variance is meaningful
    pub const STATIONARY_MIN_FIXES: usize = 3;
}

/// Session-level suspicion analysis
///
/// Stride bounds follow adult gait ranges; the speed ceiling sits well above
/// a brisk run and below cycling.
pub mod session {
    /// Shortest plausible average stride (m)
    pub const MIN_STRIDE_M: f64 = 0.2;

    /// Longest plausible average stride (m)
    pub const MAX_STRIDE_M: f64 = 2.0;

    /// Highest plausible average speed for a walking session (km/h)
    pub const MAX_SPEED_KMH: f64 = 20.0;

    /// Highest plausible step total for one session
    pub const MAX_STEPS: u32 = 100_000;

    /// Upper stride bound (m) for walking-in-place detection
    pub const STATIONARY_MAX_STRIDE_M: f64 = 0.3;

    /// Steps required before walking in place is flagged
    pub const STATIONARY_MIN_STEPS: u32 = 300;

    /// Average speed (km/h) below which a stationary session may be shaking
    pub const SHAKING_MAX_SPEED_KMH: f64 = 1.0;

    /// Stride (m) below which a stationary session may be shaking
    pub const SHAKING_MAX_STRIDE_M: f64 = 0.25;

    /// GPS displacement (m) that must be exceeded to count as real movement
    pub const GPS_NOISE_FLOOR_M: f64 = 20.0;
}

/// Session tracking loop
pub mod tracking {
    /// Recent fixes handed to the real-time gate
    pub const RECENT_FIX_BUFFER: usize = 10;
}

/// Unit conversions
pub mod units {
    /// Meters per second to kilometers per hour
    pub const MPS_TO_KMH: f64 = 3.6;

    /// Milliseconds per second
    pub const MS_PER_SECOND: f64 = 1000.0;

    /// Mean Earth radius (m)
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
}
