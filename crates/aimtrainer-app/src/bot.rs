//! Scripted player for exercising full sessions without a human.
//!
//! The bot fires at a steady cadence. A configurable share of its shots go at
//! the target nearest the eye (always a clean hit); the rest go into the sky.

use std::io;
use std::time::Duration;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use aimtrainer_core::commands::{InputEvent, PlayerCommand};
use aimtrainer_core::constants::{EYE_HEIGHT, FRAME_DT, FRAME_RATE};
use aimtrainer_core::enums::GameState;
use aimtrainer_core::state::SessionReport;
use aimtrainer_core::types::{Position, Ray};
use aimtrainer_sim::{SessionEngine, SimConfig};

use crate::game_loop;

/// How the bot plays.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Share of shots aimed at a target, in [0, 1].
    pub hit_rate: f64,
    /// Time between trigger pulls.
    pub shot_interval_ms: f64,
    /// Seed for the bot's own decisions, separate from the engine's.
    pub seed: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            hit_rate: 0.8,
            shot_interval_ms: 450.0,
            seed: 7,
        }
    }
}

impl BotConfig {
    /// Hit rate clamped to [0, 1]. NaN or infinite falls back to the default.
    pub fn effective_hit_rate(&self) -> f64 {
        if self.hit_rate.is_finite() {
            self.hit_rate.clamp(0.0, 1.0)
        } else {
            Self::default().hit_rate
        }
    }

    /// Shot interval of at least 1 ms. NaN or infinite falls back to the default.
    pub fn effective_shot_interval_ms(&self) -> f64 {
        if self.shot_interval_ms.is_finite() {
            self.shot_interval_ms.max(1.0)
        } else {
            Self::default().shot_interval_ms
        }
    }
}

/// The bot's eye, where every shot starts.
pub fn eye() -> DVec3 {
    DVec3::new(0.0, EYE_HEIGHT, 0.0)
}

/// Ray at the target nearest the eye. That target can never be shadowed by
/// another one, so the ray always resolves to it.
pub fn aim_at_nearest(positions: impl IntoIterator<Item = Position>) -> Option<Ray> {
    let eye = Position::from(eye());
    positions
        .into_iter()
        .min_by(|a, b| eye.range_to(a).total_cmp(&eye.range_to(b)))
        .map(|center| Ray::toward(eye.into(), center.into()))
}

fn sky_shot() -> Ray {
    Ray::new(eye(), DVec3::Y)
}

fn choose_shot(rng: &mut ChaCha8Rng, hit_rate: f64, aimed: Option<Ray>) -> Ray {
    if rng.gen_bool(hit_rate) {
        aimed.unwrap_or_else(sky_shot)
    } else {
        sky_shot()
    }
}

/// Play one complete session in simulated time, as fast as the CPU allows.
/// Returns the report, or `None` if the session somehow never finished.
pub fn run_simulated_session(config: SimConfig, bot: &BotConfig) -> Option<SessionReport> {
    let duration = config.settings.clamped().duration;
    let mut engine = SessionEngine::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(bot.seed);
    let hit_rate = bot.effective_hit_rate();
    let shot_interval_ms = bot.effective_shot_interval_ms();

    let frame_ms = FRAME_DT * 1000.0;
    let mut now_ms = 0.0;
    let mut next_shot_ms = shot_interval_ms;
    let mut next_clock_ms = 1000.0;

    engine.push_input(InputEvent::new(now_ms, PlayerCommand::Start));
    engine.tick(FRAME_DT);

    // Twice the nominal frame count as a guard against a stuck clock.
    let max_frames = u64::from(duration) * u64::from(FRAME_RATE) * 2;
    for _ in 0..max_frames {
        now_ms += frame_ms;

        if now_ms >= next_shot_ms {
            next_shot_ms += shot_interval_ms;
            let aimed = aim_at_nearest(engine.live_targets().into_iter().map(|t| t.position));
            let ray = choose_shot(&mut rng, hit_rate, aimed);
            engine.push_input(InputEvent::new(now_ms, PlayerCommand::Fire { ray }));
        }

        if now_ms >= next_clock_ms {
            next_clock_ms += 1000.0;
            if let Some(token) = engine.clock_token() {
                engine.clock_tick(token);
            }
        }

        let snapshot = engine.tick(FRAME_DT);
        if snapshot.state == GameState::Finished {
            return snapshot.report;
        }
    }

    warn!(duration, "simulated session did not finish");
    None
}

/// Play one session against the real-time game loop thread.
pub fn run_realtime_session(config: SimConfig, bot: &BotConfig) -> io::Result<Option<SessionReport>> {
    let hit_rate = bot.effective_hit_rate();
    let interval = Duration::try_from_secs_f64(bot.effective_shot_interval_ms() / 1000.0)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let handle = game_loop::spawn_game_loop(config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(bot.seed);

    handle.send(PlayerCommand::Start);

    let report = loop {
        std::thread::sleep(interval);
        let Some(snapshot) = handle.latest() else {
            continue;
        };

        match snapshot.state {
            GameState::Finished => break snapshot.report,
            GameState::Playing => {
                let aimed = aim_at_nearest(snapshot.targets.iter().map(|t| t.position));
                let ray = choose_shot(&mut rng, hit_rate, aimed);
                debug!(time_left = snapshot.time_left, "bot fires");
                if !handle.send(PlayerCommand::Fire { ray }) {
                    break None;
                }
            }
            GameState::Menu | GameState::Paused => {}
        }
    };

    handle.shutdown();
    Ok(report)
}
