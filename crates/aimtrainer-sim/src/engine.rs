//! Session engine: the core of the simulator.
//!
//! `SessionEngine` is the explicit session context: it owns the target
//! manager, scoring engine, clock, and current state, applies timestamped
//! player input, and produces `SessionSnapshot`s. Completely headless,
//! enabling deterministic testing.
//!
//! Every input is applied in full before the next one is looked at and
//! before any snapshot is built, so readers only ever see complete
//! pre-shot or post-shot state.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use aimtrainer_core::commands::{InputEvent, PlayerCommand};
use aimtrainer_core::enums::GameState;
use aimtrainer_core::events::FeedbackEvent;
use aimtrainer_core::settings::GameSettings;
use aimtrainer_core::state::{ScoreStats, SessionReport, SessionSnapshot};
use aimtrainer_core::types::{Ray, SimTime, Target};

use crate::state_machine::{self, Control, Effect};
use crate::systems;
use crate::systems::clock::{ClockTick, ClockToken, SessionClock};
use crate::systems::scoring::{ScoringEngine, ShotOutcome};
use crate::systems::targets::TargetManager;

/// Configuration for creating an engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same session.
    pub seed: u64,
    /// Initial settings. Clamped on construction.
    pub settings: GameSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            settings: GameSettings::default(),
        }
    }
}

/// The session engine. Owns all session state.
pub struct SessionEngine {
    state: GameState,
    settings: GameSettings,
    time: SimTime,
    rng: ChaCha8Rng,
    targets: TargetManager,
    scoring: ScoringEngine,
    clock: SessionClock,
    report: Option<SessionReport>,
    input_queue: VecDeque<InputEvent>,
    events: Vec<FeedbackEvent>,
}

impl SessionEngine {
    /// Create a new engine in the menu.
    pub fn new(config: SimConfig) -> Self {
        let settings = config.settings.clamped();
        let mut clock = SessionClock::new();
        clock.reset(settings.duration);

        Self {
            state: GameState::default(),
            settings,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            targets: TargetManager::new(),
            scoring: ScoringEngine::new(),
            clock,
            report: None,
            input_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue an input for processing at the next tick boundary.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input_queue.push_back(event);
    }

    /// Queue multiple inputs.
    pub fn push_inputs(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.input_queue.extend(events);
    }

    /// Frame tick: apply queued input in arrival order, advance frame time,
    /// and return the resulting snapshot.
    pub fn tick(&mut self, delta_secs: f64) -> SessionSnapshot {
        while let Some(event) = self.input_queue.pop_front() {
            self.handle_input(event);
        }

        self.time.advance(delta_secs, self.state.is_live());
        self.snapshot()
    }

    /// Token the driver must present with each one-second clock tick.
    /// `None` whenever the session is not running.
    pub fn clock_token(&self) -> Option<ClockToken> {
        self.clock.token()
    }

    /// Deliver one second of countdown. Stale tokens are ignored.
    pub fn clock_tick(&mut self, token: ClockToken) -> ClockTick {
        let tick = self.clock.tick(token);
        if tick == ClockTick::Expired {
            self.apply_control(Control::TimerExpired, None);
        }
        tick
    }

    /// Build a snapshot of the current state, draining pending feedback events.
    pub fn snapshot(&mut self) -> SessionSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.time,
            self.state,
            &self.settings,
            self.clock.time_left(),
            &self.targets,
            self.scoring.stats(),
            self.report.as_ref(),
            events,
        )
    }

    /// Get the current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Whole seconds left on the countdown.
    pub fn time_left(&self) -> u32 {
        self.clock.time_left()
    }

    pub fn stats(&self) -> &ScoreStats {
        self.scoring.stats()
    }

    /// End-of-session report, present only in FINISHED.
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    /// Live targets ordered by id.
    pub fn live_targets(&self) -> Vec<Target> {
        self.targets.targets()
    }

    /// Handle a single timestamped input.
    fn handle_input(&mut self, event: InputEvent) {
        let now_ms = event.timestamp_ms;
        match event.command {
            PlayerCommand::Start => self.apply_control(Control::Start, Some(now_ms)),
            PlayerCommand::TogglePause => self.apply_control(Control::TogglePause, Some(now_ms)),
            PlayerCommand::Restart => self.apply_control(Control::Restart, Some(now_ms)),
            PlayerCommand::ReturnToMenu => self.apply_control(Control::ReturnToMenu, Some(now_ms)),
            PlayerCommand::Fire { ray } => {
                // Shots outside PLAYING are dropped silently.
                if self.state.is_live() {
                    self.handle_fire(&ray, now_ms);
                }
            }
            PlayerCommand::UpdateSettings { settings } => {
                if self.state == GameState::Menu {
                    self.settings = settings.clamped();
                    self.clock.reset(self.settings.duration);
                    info!(settings = ?self.settings, "settings updated");
                } else {
                    warn!(state = ?self.state, "settings change rejected outside the menu");
                }
            }
        }
    }

    /// Run a control signal through the state machine and apply its effect.
    /// `now_ms` is the triggering input's timestamp; clock expiry has none.
    fn apply_control(&mut self, control: Control, now_ms: Option<f64>) {
        let Some(transition) = state_machine::transition(self.state, control) else {
            debug!(state = ?self.state, ?control, "control ignored");
            return;
        };

        let from = self.state;
        match transition.effect {
            Effect::BeginSession => self.begin_session(now_ms.unwrap_or_default()),
            Effect::Suspend => {
                self.clock.stop();
                self.events.push(FeedbackEvent::SessionPaused);
            }
            Effect::Resume => {
                self.clock.start();
                self.events.push(FeedbackEvent::SessionResumed);
            }
            Effect::Finish => self.finish(),
            Effect::ExitToMenu => {
                self.clock.reset(self.settings.duration);
                self.targets.clear();
                self.report = None;
                self.events.push(FeedbackEvent::ReturnedToMenu);
            }
        }
        self.state = transition.to;

        info!(?from, to = ?self.state, ?control, "state transition");
    }

    /// Fresh stats, fresh countdown, fresh targets.
    fn begin_session(&mut self, now_ms: f64) {
        self.scoring.reset();
        self.report = None;
        self.time.reset_session();
        self.clock.reset(self.settings.duration);
        self.targets
            .initialize(self.settings.target_count, &mut self.rng, now_ms);
        self.clock.start();
        self.events.push(FeedbackEvent::SessionStarted);
    }

    fn finish(&mut self) {
        self.clock.stop();
        self.targets.clear();
        let report = self.scoring.report(self.settings.duration);
        info!(
            score = report.score,
            accuracy = report.accuracy,
            avg_reaction_ms = report.avg_reaction_time,
            grade = %report.grade,
            "session finished"
        );
        self.events.push(FeedbackEvent::SessionFinished {
            grade: report.grade,
        });
        self.report = Some(report);
    }

    /// Resolve, replace, and score one shot as a single step.
    fn handle_fire(&mut self, ray: &Ray, now_ms: f64) {
        let live = self.targets.targets();
        let hit = systems::hit_resolver::resolve(ray, &live, self.settings.target_size);

        let struck = hit.and_then(|hit| {
            live.iter()
                .find(|t| t.id == hit.target_id)
                .map(|t| (*t, hit.distance))
        });

        let outcome = match struck {
            Some((target, distance)) => {
                self.targets.on_hit(target.id, &mut self.rng, now_ms);
                ShotOutcome::Hit { target, distance }
            }
            None => ShotOutcome::Miss,
        };

        let record = self
            .scoring
            .on_shot(outcome, now_ms, self.time.session_secs);

        match (outcome, record) {
            (ShotOutcome::Hit { target, distance }, Some(record)) => {
                debug!(
                    target_id = %target.id,
                    distance,
                    reaction_ms = record.reaction_time,
                    "target hit"
                );
                self.events.push(FeedbackEvent::TargetHit {
                    target_id: target.id,
                    distance,
                    reaction_ms: record.reaction_time,
                });
            }
            _ => {
                debug!("shot missed");
                self.events.push(FeedbackEvent::ShotMissed);
            }
        }
    }
}
