use rand::RngCore;

use crate::env::PlayerView;
use crate::game::action::Move;
use crate::players::{BasePlayer, EchoPlayer, RandomPlayer};

pub struct BotCode {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const BOT_PLAYERS: &[BotCode] = &[
    BotCode {
        code: "R",
        name: "RandomPlayer",
        description: "Picks and guesses random words, draws noise.",
    },
    BotCode {
        code: "E",
        name: "EchoPlayer",
        description: "Draws exactly the word it was shown and guesses it back.",
    },
];

#[derive(Debug, Clone, Copy)]
pub enum PlayerInstance {
    Random(RandomPlayer),
    Echo(EchoPlayer),
}

impl PlayerInstance {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerInstance::Random(_) => "Random",
            PlayerInstance::Echo(_) => "Echo",
        }
    }
}

impl BasePlayer for PlayerInstance {
    fn decide(&self, view: &PlayerView, rng: &mut dyn RngCore) -> Option<Move> {
        match self {
            PlayerInstance::Random(p) => p.decide(view, rng),
            PlayerInstance::Echo(p) => p.decide(view, rng),
        }
    }
}

pub fn create_player(code: &str) -> Option<PlayerInstance> {
    match code.trim().to_uppercase().as_str() {
        "R" => Some(PlayerInstance::Random(RandomPlayer)),
        "E" => Some(PlayerInstance::Echo(EchoPlayer)),
        _ => None,
    }
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<15} {}", "CODE", "PLAYER", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for player in BOT_PLAYERS {
        println!("{:<5} {:<15} {}", player.code, player.name, player.description);
    }
}
