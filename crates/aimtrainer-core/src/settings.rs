//! Session configuration.
//!
//! Settings reach the simulation already clamped into range. `validate` is
//! available for callers that prefer to reject bad input outright.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CrosshairStyle, Language};
use crate::error::SettingsError;

/// Player-facing configuration, immutable for the duration of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Number of simultaneously live targets.
    pub target_count: u32,
    /// Visual target radius (meters).
    pub target_size: f64,
    /// Session length (seconds).
    pub duration: u32,
    pub crosshair_style: CrosshairStyle,
    /// Mouse sensitivity multiplier, consumed by the input layer.
    pub sensitivity: f64,
    pub language: Language,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            target_count: 5,
            target_size: 0.5,
            duration: 60,
            crosshair_style: CrosshairStyle::default(),
            sensitivity: 1.0,
            language: Language::default(),
        }
    }
}

impl GameSettings {
    /// Parse a JSON settings document. Missing fields take their defaults and
    /// out-of-range values are clamped.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let raw: GameSettings = serde_json::from_str(json)?;
        Ok(raw.clamped())
    }

    /// Strict range check.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(TARGET_COUNT_MIN..=TARGET_COUNT_MAX).contains(&self.target_count) {
            return Err(SettingsError::TargetCount {
                got: self.target_count,
                min: TARGET_COUNT_MIN,
                max: TARGET_COUNT_MAX,
            });
        }
        if !(TARGET_SIZE_MIN..=TARGET_SIZE_MAX).contains(&self.target_size) {
            return Err(SettingsError::TargetSize {
                got: self.target_size,
                min: TARGET_SIZE_MIN,
                max: TARGET_SIZE_MAX,
            });
        }
        if self.duration < DURATION_MIN_SECS {
            return Err(SettingsError::Duration {
                got: self.duration,
                min: DURATION_MIN_SECS,
            });
        }
        if !(SENSITIVITY_MIN..=SENSITIVITY_MAX).contains(&self.sensitivity) {
            return Err(SettingsError::Sensitivity {
                got: self.sensitivity,
                min: SENSITIVITY_MIN,
                max: SENSITIVITY_MAX,
            });
        }
        Ok(())
    }

    /// Copy with every numeric field forced into range.
    /// Non-finite floats fall back to their defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        Self {
            target_count: self.target_count.clamp(TARGET_COUNT_MIN, TARGET_COUNT_MAX),
            target_size: finite_or(self.target_size, defaults.target_size)
                .clamp(TARGET_SIZE_MIN, TARGET_SIZE_MAX),
            duration: self.duration.max(DURATION_MIN_SECS),
            crosshair_style: self.crosshair_style,
            sensitivity: finite_or(self.sensitivity, defaults.sensitivity)
                .clamp(SENSITIVITY_MIN, SENSITIVITY_MAX),
            language: self.language,
        }
    }
}
