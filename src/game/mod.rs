pub mod action;
pub mod chains;
pub mod game;
pub mod players;
pub mod rotation;
pub mod state;

pub use action::{Drawing, GameMove, Move, MovePayload};
pub use chains::{Chain, ChainTable};
pub use game::{Game, GameId};
pub use players::Roster;
pub use rotation::{Assignment, phase_for_round, should_rotate};
pub use state::{ConfigError, GameConfig, GameError, GameEvent, GameState, StepOutcome};
