//! Headless driver for the aim-training simulator.
//!
//! Wires the simulation to a real-time game loop thread and provides a
//! scripted bot player for running whole sessions from the command line.

pub mod bot;
pub mod game_loop;
pub mod state;

pub use aimtrainer_core as core;
