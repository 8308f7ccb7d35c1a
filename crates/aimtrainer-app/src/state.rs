//! Handle to a running game loop, shared between the loop thread and its owner.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use aimtrainer_core::commands::PlayerCommand;
use aimtrainer_core::state::SessionSnapshot;

/// Commands sent from the owner to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Player input to stamp and forward to the engine.
    Input(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot published by the loop, for synchronous polling.
pub type SharedSnapshot = Arc<Mutex<Option<SessionSnapshot>>>;

/// Owner-side view of a running game loop.
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
    pub thread: JoinHandle<()>,
}

impl LoopHandle {
    /// Forward player input. Returns false once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::Input(command))
            .is_ok()
    }

    /// Clone of the most recent snapshot, if one has been published.
    pub fn latest(&self) -> Option<SessionSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        let _ = self.thread.join();
    }
}
