pub mod players;
pub mod stats;

pub use players::{BOT_PLAYERS, BotCode, PlayerInstance, create_player, print_player_help};
pub use stats::{SimulationStats, StatisticsAccumulator};
