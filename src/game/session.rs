use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::settings::GameSettings;

use super::{
    countdown::{CountdownEvent, CountdownHandle, CountdownKind, CountdownScheduler},
    display::{ButtonLabel, DisplayUpdate, GameObserver},
    saved::SavedGameState,
    state::{GameSnapshot, GameState, RoundSummary},
};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Score and countdown for the tap game.
///
/// The session never renders anything itself: every visible change is pushed
/// to the observer. It owns at most one countdown at a time and cancels it on
/// reset, round end and capture.
pub struct GameSession<S, O> {
    settings: GameSettings,
    state: GameState,
    scheduler: S,
    observer: O,
    countdown: Option<CountdownHandle>,
}

impl<S, O> GameSession<S, O>
where
    S: CountdownScheduler,
    O: GameObserver,
{
    pub fn new(settings: GameSettings, scheduler: S, observer: O) -> Self {
        let mut session = Self {
            state: GameState::new(settings.initial_duration_ms),
            settings,
            scheduler,
            observer,
            countdown: None,
        };
        session.reset();
        session
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&self.state)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn remaining_ms(&self) -> u64 {
        self.state.remaining_ms
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    /// Back to a fresh, idle round. Does not start the countdown.
    pub fn reset(&mut self) {
        self.cancel_countdown();
        self.state.reset(self.settings.initial_duration_ms);

        self.emit(DisplayUpdate::Score { score: 0 });
        self.emit(DisplayUpdate::TimeLeft {
            seconds: self.state.seconds_left(),
        });
        self.emit(DisplayUpdate::Button {
            label: ButtonLabel::Start,
        });
    }

    /// Resumes a captured round and starts its countdown right away.
    ///
    /// Rejects a remaining time longer than the configured round; the session
    /// is left untouched in that case.
    pub fn restore(&mut self, saved: SavedGameState) -> Result<()> {
        if saved.remaining_time_ms > self.settings.initial_duration_ms {
            bail!(
                "remainingTimeMs {} exceeds the round duration of {} ms",
                saved.remaining_time_ms,
                self.settings.initial_duration_ms
            );
        }

        self.cancel_countdown();
        self.state.reset(self.settings.initial_duration_ms);
        self.state.score = saved.score;
        self.state.remaining_ms = saved.remaining_time_ms;
        log_info!(
            "Restored round with score {} and {} ms left",
            saved.score,
            saved.remaining_time_ms
        );

        self.emit(DisplayUpdate::TimeLeft {
            seconds: self.state.seconds_left(),
        });
        self.emit(DisplayUpdate::Score {
            score: self.state.score,
        });
        self.start();
        Ok(())
    }

    /// Starts the countdown from the current remaining time. No-op while running.
    pub fn start(&mut self) {
        if self.state.is_started() {
            return;
        }

        let round_id = Uuid::new_v4();
        self.state.begin_round(round_id, Utc::now());
        self.countdown = Some(self.scheduler.schedule(
            round_id,
            Duration::from_millis(self.state.remaining_ms),
            self.settings.tick_interval(),
        ));
        log_info!(
            "Round {} started with {} ms left",
            round_id,
            self.state.remaining_ms
        );

        self.emit(DisplayUpdate::Button {
            label: ButtonLabel::Active,
        });
    }

    pub fn tap(&mut self) {
        if !self.state.is_started() {
            self.start();
        }
        self.state.score = self.state.score.saturating_add(1);
        self.emit(DisplayUpdate::Score {
            score: self.state.score,
        });
    }

    /// Applies a message from the countdown. Messages from any countdown other
    /// than the one currently held are dropped.
    pub fn handle_countdown(&mut self, event: CountdownEvent) {
        let current = self.countdown.as_ref().map(CountdownHandle::round_id);
        if current != Some(event.round_id) {
            log_debug!("Ignoring countdown message for stale round {}", event.round_id);
            return;
        }

        match event.kind {
            CountdownKind::Tick { remaining_ms } => self.on_tick(remaining_ms),
            CountdownKind::Finished => self.on_timer_finish(),
        }
    }

    /// Snapshot for the host to keep across teardown. Releases the countdown,
    /// so nothing it already queued is applied afterwards.
    pub fn capture_state(&mut self) -> SavedGameState {
        self.cancel_countdown();
        let saved = SavedGameState {
            score: self.state.score,
            remaining_time_ms: self.state.remaining_ms,
        };
        log_info!(
            "Captured state: score {} with {} ms left",
            saved.score,
            saved.remaining_time_ms
        );
        saved
    }

    fn on_tick(&mut self, remaining_ms: u64) {
        self.state.remaining_ms = remaining_ms.min(self.settings.initial_duration_ms);
        self.emit(DisplayUpdate::TimeLeft {
            seconds: self.state.seconds_left(),
        });
    }

    fn on_timer_finish(&mut self) {
        self.countdown = None;
        self.state.remaining_ms = 0;

        let finished_at = Utc::now();
        let summary = RoundSummary {
            round_id: self.state.round_id.unwrap_or_default(),
            score: self.state.score,
            started_at: self.state.started_at.unwrap_or(finished_at),
            finished_at,
        };
        log_info!(
            "Round {} finished with score {}",
            summary.round_id,
            summary.score
        );

        self.emit(DisplayUpdate::RoundFinished { summary });
        self.reset();
    }

    fn cancel_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.cancel();
        }
    }

    fn emit(&mut self, update: DisplayUpdate) {
        self.observer.on_display(update);
    }
}
