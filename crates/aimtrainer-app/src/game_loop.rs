//! Game loop thread: drives the engine at 60Hz and runs the session clock.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel and are stamped with the loop's monotonic
//! clock. Snapshots are stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use aimtrainer_core::commands::InputEvent;
use aimtrainer_core::constants::{CLOCK_PERIOD_SECS, FRAME_RATE};
use aimtrainer_core::enums::GameState;
use aimtrainer_core::state::SessionSnapshot;
use aimtrainer_sim::{ClockToken, SessionEngine, SimConfig};

use crate::state::{GameLoopCommand, LoopHandle, SharedSnapshot};

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Delivers the one-second clock tick on wall time.
///
/// The deadline is re-armed whenever the engine hands out a new token, so a
/// pause never eats into the second that was in progress.
#[derive(Debug, Default)]
pub struct ClockPacer {
    armed: Option<(ClockToken, Instant)>,
}

impl ClockPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to tick with now, if a second has elapsed for the live token.
    pub fn due(&mut self, live: Option<ClockToken>, now: Instant) -> Option<ClockToken> {
        let period = Duration::from_secs_f64(CLOCK_PERIOD_SECS);
        let Some(token) = live else {
            self.armed = None;
            return None;
        };

        match self.armed {
            Some((armed, deadline)) if armed == token => {
                if now >= deadline {
                    self.armed = Some((token, deadline + period));
                    Some(token)
                } else {
                    None
                }
            }
            _ => {
                self.armed = Some((token, now + period));
                None
            }
        }
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig) -> std::io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("aimtrainer-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &shared);
        })?;

    Ok(LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
) {
    let mut engine = SessionEngine::new(config);
    let mut pacer = ClockPacer::new();
    let epoch = Instant::now();
    let mut last_frame = epoch;
    let mut next_frame_time = epoch;
    let mut last_state = engine.state();

    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(command)) => {
                    let stamp = epoch.elapsed().as_secs_f64() * 1000.0;
                    engine.push_input(InputEvent::new(stamp, command));
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Session clock, on wall time
        let now = Instant::now();
        if let Some(token) = pacer.due(engine.clock_token(), now) {
            let tick = engine.clock_tick(token);
            debug!(?tick, "clock tick");
        }

        // 3. Frame tick
        let delta = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.tick(delta);

        if snapshot.state != last_state {
            debug!(from = ?last_state, to = ?snapshot.state, "loop observed state change");
            last_state = snapshot.state;
            if snapshot.state == GameState::Finished {
                if let Some(report) = &snapshot.report {
                    info!(score = report.score, grade = %report.grade, "session complete");
                }
            }
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aimtrainer_core::commands::PlayerCommand;
    use aimtrainer_core::settings::GameSettings;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Input(PlayerCommand::Start)).unwrap();
        tx.send(GameLoopCommand::Input(PlayerCommand::TogglePause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Input(PlayerCommand::Start)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Input(PlayerCommand::TogglePause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_pacer_ticks_once_per_second() {
        let mut engine = SessionEngine::new(SimConfig::default());
        engine.push_input(InputEvent::new(0.0, PlayerCommand::Start));
        engine.tick(0.0);
        let token = engine.clock_token();

        let t0 = Instant::now();
        let mut pacer = ClockPacer::new();
        assert_eq!(pacer.due(token, t0), None, "arming never ticks");
        assert_eq!(pacer.due(token, t0 + Duration::from_millis(999)), None);
        assert_eq!(pacer.due(token, t0 + Duration::from_millis(1000)), token);
        assert_eq!(pacer.due(token, t0 + Duration::from_millis(1500)), None);
        assert_eq!(pacer.due(token, t0 + Duration::from_millis(2001)), token);
    }

    #[test]
    fn test_pacer_rearms_after_pause() {
        let mut engine = SessionEngine::new(SimConfig::default());
        engine.push_input(InputEvent::new(0.0, PlayerCommand::Start));
        engine.tick(0.0);
        let first = engine.clock_token();

        let t0 = Instant::now();
        let mut pacer = ClockPacer::new();
        pacer.due(first, t0);

        // Paused: no token, nothing due however long we wait.
        assert_eq!(pacer.due(None, t0 + Duration::from_secs(10)), None);

        engine.push_input(InputEvent::new(1.0, PlayerCommand::TogglePause));
        engine.push_input(InputEvent::new(2.0, PlayerCommand::TogglePause));
        engine.tick(0.0);
        let resumed = engine.clock_token();
        assert_ne!(first, resumed);

        let t1 = t0 + Duration::from_secs(10);
        assert_eq!(pacer.due(resumed, t1), None);
        assert_eq!(pacer.due(resumed, t1 + Duration::from_millis(1000)), resumed);
    }

    /// Poll the published snapshot until `state` shows up or two seconds pass.
    fn wait_for_state(handle: &LoopHandle, state: GameState) -> SessionSnapshot {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(snap) = handle.latest() {
                if snap.state == state {
                    return snap;
                }
            }
            assert!(Instant::now() < deadline, "loop never reached {state:?}");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_loop_runs_and_pauses() {
        let handle = spawn_game_loop(SimConfig {
            seed: 1,
            settings: GameSettings {
                target_count: 3,
                ..Default::default()
            },
        })
        .unwrap();

        assert!(handle.send(PlayerCommand::Start));
        let snap = wait_for_state(&handle, GameState::Playing);
        assert_eq!(snap.targets.len(), 3);

        assert!(handle.send(PlayerCommand::TogglePause));
        let snap = wait_for_state(&handle, GameState::Paused);
        assert_eq!(snap.targets.len(), 3);
        assert!(snap.time_left >= 58, "time left {}", snap.time_left);

        handle.shutdown();
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }
}
