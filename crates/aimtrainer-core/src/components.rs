//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::types::TargetId;

/// Identity and spawn bookkeeping for a live target entity.
/// Paired with a `Position` component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetInfo {
    pub id: TargetId,
    /// Driver timestamp (ms) at which the target appeared.
    pub spawn_ms: f64,
}
