//! Core types and definitions for the aim-training simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, settings, commands, snapshots, events, and constants.
//! It has no dependency on a renderer or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod settings;
pub mod state;
pub mod types;
