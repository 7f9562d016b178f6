pub mod controller;
pub mod countdown;
pub mod display;
pub mod saved;
pub mod session;
pub mod state;

pub use controller::{GameController, GameInput};
pub use countdown::{CountdownEvent, CountdownHandle, CountdownKind, CountdownScheduler, TokioScheduler};
pub use display::{ButtonLabel, DisplayUpdate, GameObserver};
pub use saved::{SavedGameState, SavedStateStore};
pub use session::GameSession;
pub use state::{GameSnapshot, GameState, GameStatus, RoundSummary};
