//! Systems that operate on the session each tick.
//!
//! Each system owns exactly one piece of session data (or none, for the pure
//! ones). Cross-system communication goes through plain values.

pub mod clock;
pub mod hit_resolver;
pub mod scoring;
pub mod snapshot;
pub mod targets;
