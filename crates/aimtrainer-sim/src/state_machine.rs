//! Session state machine.
//!
//! A pure transition table: given the current state and a control signal,
//! decide the next state and what the engine must do to get there. The
//! engine applies the effect; this module holds no session data.

use aimtrainer_core::enums::GameState;

/// Signals that can move the session between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    TogglePause,
    Restart,
    ReturnToMenu,
    /// Raised by the session clock, never by the player.
    TimerExpired,
}

/// Work the engine performs when a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Zero stats, reload the clock, respawn all targets, arm the clock.
    BeginSession,
    /// Stop the clock, keep everything else.
    Suspend,
    /// Re-arm the clock with the preserved time.
    Resume,
    /// Stop the clock, freeze stats, compute the report.
    Finish,
    /// Stop the clock and drop the session.
    ExitToMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: GameState,
    pub effect: Effect,
}

/// Look up the transition for `control` in state `from`.
/// `None` means the signal is not legal there and must be ignored.
pub fn transition(from: GameState, control: Control) -> Option<Transition> {
    use Control as C;
    use GameState as S;

    let (to, effect) = match (from, control) {
        (_, C::ReturnToMenu) => (S::Menu, Effect::ExitToMenu),
        (S::Menu, C::Start) => (S::Playing, Effect::BeginSession),
        (S::Paused | S::Finished, C::Restart) => (S::Playing, Effect::BeginSession),
        (S::Playing, C::TogglePause) => (S::Paused, Effect::Suspend),
        (S::Paused, C::TogglePause) => (S::Playing, Effect::Resume),
        (S::Playing, C::TimerExpired) => (S::Finished, Effect::Finish),
        _ => return None,
    };

    Some(Transition { to, effect })
}
