use tokio::sync::mpsc::{self, Receiver, UnboundedReceiver};

use crate::settings::GameSettings;

use super::{
    countdown::{CountdownEvent, TokioScheduler},
    display::GameObserver,
    saved::SavedGameState,
    session::GameSession,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Tap,
    Shutdown,
}

/// Drives a [`GameSession`] from host input and its own countdown, one event
/// at a time.
pub struct GameController<O> {
    session: GameSession<TokioScheduler, O>,
    countdown_rx: UnboundedReceiver<CountdownEvent>,
}

impl<O: GameObserver> GameController<O> {
    pub fn new(settings: GameSettings, observer: O) -> Self {
        let (countdown_tx, countdown_rx) = mpsc::unbounded_channel();
        Self {
            session: GameSession::new(settings, TokioScheduler::new(countdown_tx), observer),
            countdown_rx,
        }
    }

    pub fn session(&self) -> &GameSession<TokioScheduler, O> {
        &self.session
    }

    /// Picks up a round saved by a previous run. A saved state the session
    /// rejects is dropped and the game stays on a fresh round.
    ///
    /// Must be called from within a tokio runtime.
    pub fn resume(&mut self, saved: Option<SavedGameState>) {
        let Some(saved) = saved else {
            return;
        };

        if let Err(err) = self.session.restore(saved) {
            log_warn!("Discarding saved state: {:#}", err);
        }
    }

    /// Runs until the host asks to shut down or drops its input sender, then
    /// returns the state to hand back to the host.
    pub async fn run(mut self, mut inputs: Receiver<GameInput>) -> SavedGameState {
        loop {
            tokio::select! {
                biased;
                Some(event) = self.countdown_rx.recv() => self.session.handle_countdown(event),
                input = inputs.recv() => match input {
                    Some(GameInput::Tap) => self.session.tap(),
                    Some(GameInput::Shutdown) | None => break,
                },
            }
        }

        log_info!("Game loop shutting down");
        self.session.capture_state()
    }
}
