//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`CleanupError`] which covers every failure that can stop a
//! git-cleanup run. Failures of individual `git` invocations are deliberately not
//! part of this enum: they are collected by the command runner and logged, never
//! propagated (see [`crate::core::runner::CommandOutput`]).
//!
//! # Public API
//! - [`CleanupError`]: Main error enum covering all fatal failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, CleanupError>`
//!
//! # Error Categories
//! - **Configuration**: Missing config directory, unreadable or invalid config files
//! - **Rules**: Patterns that do not compile as regular expressions
//! - **Log sink**: The append-only log file could not be written
//! - **Ref lines**: Lines that cannot yield a bare ref name

use crate::core::area::Area;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-cleanup
#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Area {area} is not configured")]
    AreaNotConfigured { area: Area },

    // Rule errors
    #[error("Invalid pattern '{pattern}' for area {area}: {source}")]
    InvalidPattern {
        area: Area,
        pattern: String,
        source: regex::Error,
    },

    // Log sink errors
    #[error("Failed to write log file '{path}': {source}")]
    LogWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Ref line errors
    #[error("Malformed ref line (expected prefix '{prefix}'): {line}")]
    MalformedRefLine { line: String, prefix: &'static str },
}

/// Convenience type alias for Results using CleanupError
pub type Result<T> = std::result::Result<T, CleanupError>;

impl CleanupError {
    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config write failed error
    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(area: Area, pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            area,
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a log write failed error
    pub fn log_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed ref line error
    pub fn malformed_ref_line(line: impl Into<String>, prefix: &'static str) -> Self {
        Self::MalformedRefLine {
            line: line.into(),
            prefix,
        }
    }
}
