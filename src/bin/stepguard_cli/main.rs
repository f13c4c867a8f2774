// ABOUTME: Stepguard CLI - validate recorded walking sessions and replay sensor captures
// ABOUTME: Prints verdicts and effective configuration as JSON for diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Validate a finished session
//! stepguard-cli validate-session session.json
//!
//! # Replay a sensor capture, printing every per-sample decision
//! stepguard-cli replay samples.json --trace
//!
//! # Show the effective thresholds (after STEPGUARD_* overrides)
//! stepguard-cli config
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stepguard::logging::LoggingConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "stepguard-cli",
    about = "Walking session validation CLI",
    long_about = "Validate recorded walking sessions and replay sensor captures through the step validation pipeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Validate a JSON walking session and print the verdict
    ValidateSession {
        /// Path to the session JSON file
        file: PathBuf,
    },

    /// Replay a JSON array of sensor samples through a session tracker
    Replay {
        /// Path to the samples JSON file
        file: PathBuf,

        /// Session start (ms since epoch), defaults to the first sample
        #[arg(long)]
        start: Option<u64>,

        /// Print every per-sample update
        #[arg(long)]
        trace: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;
    debug!("stepguard-cli starting");

    match cli.command {
        Command::ValidateSession { file } => commands::validate_session(&file),
        Command::Replay { file, start, trace } => commands::replay_samples(&file, start, trace),
        Command::Config => commands::show_config(),
    }
}
