//! Simulation engine for the aim trainer.
//!
//! Owns the live target set, resolves shots, keeps score, runs the session
//! countdown, and produces `SessionSnapshot`s for the rendering/UI layers.

pub mod engine;
pub mod state_machine;
pub mod systems;

pub use aimtrainer_core as core;
pub use engine::{SessionEngine, SimConfig};
pub use systems::clock::{ClockTick, ClockToken};
