//! Target lifecycle: spawning, lookup, and hit replacement.
//!
//! Targets live as entities in a private hecs world. Removal and replacement
//! happen inside one call so the live count never dips below the configured
//! target count.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aimtrainer_core::components::TargetInfo;
use aimtrainer_core::constants::*;
use aimtrainer_core::types::{Position, Target, TargetId};

/// Owner of the live target set.
#[derive(Default)]
pub struct TargetManager {
    world: World,
    /// Next id to hand out. Never reset, so ids stay unique across sessions.
    next_id: u64,
}

impl TargetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every live target and spawn `count` fresh ones.
    pub fn initialize(&mut self, count: u32, rng: &mut ChaCha8Rng, now_ms: f64) {
        self.world.clear();
        for _ in 0..count {
            self.spawn(rng, now_ms);
        }
    }

    /// Remove the target with `id` and spawn its replacement.
    ///
    /// Returns the replacement, or `None` if `id` is not live (already
    /// consumed or from an earlier session), in which case nothing changes.
    pub fn on_hit(&mut self, id: TargetId, rng: &mut ChaCha8Rng, now_ms: f64) -> Option<Target> {
        let entity = self
            .world
            .query::<&TargetInfo>()
            .iter()
            .find(|(_, info)| info.id == id)
            .map(|(entity, _)| entity)?;

        let _ = self.world.despawn(entity);
        Some(self.spawn(rng, now_ms))
    }

    /// Remove all targets.
    pub fn clear(&mut self) {
        self.world.clear();
    }

    /// Look up a live target by id.
    pub fn get(&self, id: TargetId) -> Option<Target> {
        self.world
            .query::<(&TargetInfo, &Position)>()
            .iter()
            .find(|(_, (info, _))| info.id == id)
            .map(|(_, (info, pos))| to_target(info, pos))
    }

    /// All live targets ordered by id.
    pub fn targets(&self) -> Vec<Target> {
        let mut targets: Vec<Target> = self
            .world
            .query::<(&TargetInfo, &Position)>()
            .iter()
            .map(|(_, (info, pos))| to_target(info, pos))
            .collect();

        targets.sort_by_key(|t| t.id);
        targets
    }

    fn spawn(&mut self, rng: &mut ChaCha8Rng, now_ms: f64) -> Target {
        let info = TargetInfo {
            id: TargetId(self.next_id),
            spawn_ms: now_ms,
        };
        self.next_id += 1;

        let position = random_spawn_position(rng);
        self.world.spawn((info, position));
        to_target(&info, &position)
    }
}

/// Uniform lateral offset within the spawn band, uniform height within the
/// eye-level band, fixed depth. Overlap with other targets is allowed.
pub fn random_spawn_position(rng: &mut ChaCha8Rng) -> Position {
    let x = rng.gen_range(-SPAWN_HALF_WIDTH..=SPAWN_HALF_WIDTH);
    let y = rng.gen_range(SPAWN_HEIGHT_MIN..=SPAWN_HEIGHT_MAX);
    Position::new(x, y, SPAWN_DEPTH)
}

fn to_target(info: &TargetInfo, pos: &Position) -> Target {
    Target {
        id: info.id,
        position: *pos,
        spawn_ms: info.spawn_ms,
    }
}
