#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod area;
pub mod cli;
pub mod env;
pub mod game;
pub mod players;
pub mod types;

pub use area::{AreaCommand, AreaError, AreaEvent, AreaObserver, CommandResponse, GameArea, GameArena};
pub use env::{Observation, PlayerView, observation_from_state};
pub use game::{Game, GameConfig, GameError, GameId, GameState, Move};
pub use types::{GamePhase, GameStatus, PlayerId};
