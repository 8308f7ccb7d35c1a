//! Error types for configuration handling.
//!
//! The simulation itself never fails; only settings coming from outside do.

use thiserror::Error;

/// Settings rejected by strict validation or parsing.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Target count outside the supported range.
    #[error("target count {got} outside [{min}, {max}]")]
    TargetCount {
        /// Requested count
        got: u32,
        min: u32,
        max: u32,
    },

    /// Target size outside the supported range.
    #[error("target size {got} outside [{min}, {max}]")]
    TargetSize {
        /// Requested visual radius
        got: f64,
        min: f64,
        max: f64,
    },

    /// Session duration must be a positive number of seconds.
    #[error("session duration must be at least {min}s, got {got}s")]
    Duration {
        got: u32,
        min: u32,
    },

    /// Sensitivity must be finite and inside the supported range.
    #[error("sensitivity {got} outside [{min}, {max}]")]
    Sensitivity {
        got: f64,
        min: f64,
        max: f64,
    },

    /// Settings document could not be parsed.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}
