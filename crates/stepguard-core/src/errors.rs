// ABOUTME: Unified error types for stepguard input loading, configuration and tracking
// ABOUTME: Defines ErrorCode, AppError and the conversion from serde_json errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The validation components themselves are total functions and never fail.
//! Errors only arise around them: loading recorded sessions, rejecting
//! out-of-order sensor samples, and invalid configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout stepguard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input violates a documented precondition
    InvalidInput,
    /// Input could not be decoded
    InvalidFormat,
    /// Numeric value outside its acceptable range
    ValueOutOfRange,
    /// Configuration is inconsistent
    ConfigInvalid,
    /// JSON encoding or decoding failed
    SerializationError,
    /// File system access failed
    StorageError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ConfigInvalid => "The configuration is invalid",
            Self::SerializationError => "Failed to encode or decode data",
            Self::StorageError => "Failed to read or write data",
        }
    }

    /// Stable string form used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error carrying a code and a human readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Machine readable error code
    pub code: ErrorCode,
    /// Human readable detail
    pub message: String,
}

/// Result alias used across stepguard
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Input violates a precondition
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Input could not be decoded
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Numeric value outside its range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Configuration is inconsistent
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// JSON encoding or decoding failed
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// File system access failed
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            Self::invalid_format(err.to_string())
        } else {
            Self::serialization(err.to_string())
        }
    }
}
