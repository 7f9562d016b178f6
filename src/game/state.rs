use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: GameStatus,
    pub score: u32,
    pub remaining_ms: u64,
    /// Set while a countdown is running; countdown messages for any other
    /// round are ignored.
    pub round_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
}

impl GameState {
    pub fn new(initial_duration_ms: u64) -> Self {
        Self {
            status: GameStatus::Idle,
            score: 0,
            remaining_ms: initial_duration_ms,
            round_id: None,
            started_at: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Whole seconds left, truncated.
    pub fn seconds_left(&self) -> u64 {
        self.remaining_ms / 1000
    }

    pub fn begin_round(&mut self, round_id: Uuid, started_at: DateTime<Utc>) {
        self.status = GameStatus::Running;
        self.round_id = Some(round_id);
        self.started_at = Some(started_at);
    }

    pub fn reset(&mut self, initial_duration_ms: u64) {
        *self = Self::new(initial_duration_ms);
    }
}

/// Read-only view handed to the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub state: GameState,
    pub seconds_left: u64,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            seconds_left: state.seconds_left(),
            state: state.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_id: Uuid,
    pub score: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
