//! Player commands sent from the input layer to the simulation.
//!
//! Commands are timestamped by the driver and queued for processing at the
//! next tick boundary.

use serde::{Deserialize, Serialize};

use crate::settings::GameSettings;
use crate::types::Ray;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Begin a session from the menu.
    Start,
    /// Pause a running session, or resume a paused one.
    TogglePause,
    /// Start over from a paused or finished session.
    Restart,
    /// Abandon whatever is happening and go back to the menu.
    ReturnToMenu,

    // --- Gameplay ---
    /// One discrete trigger pull along the given ray.
    Fire { ray: Ray },

    // --- Configuration ---
    /// Replace the settings. Only honored in the menu.
    UpdateSettings { settings: GameSettings },
}

/// A command stamped with the driver's monotonic clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEvent {
    /// Milliseconds on the driver's monotonic clock.
    pub timestamp_ms: f64,
    pub command: PlayerCommand,
}

impl InputEvent {
    pub fn new(timestamp_ms: f64, command: PlayerCommand) -> Self {
        Self {
            timestamp_ms,
            command,
        }
    }
}
