use rand::RngCore;
use rand::seq::SliceRandom;

use crate::env::PlayerView;
use crate::game::action::Move;
use crate::players::BasePlayer;
use crate::types::GamePhase;

pub const WORDS: &[&str] = &[
    "lighthouse", "giraffe", "teapot", "volcano", "bicycle", "octopus", "castle", "umbrella",
    "rocket", "cactus", "penguin", "waterfall",
];

/// Picks and guesses words at random and scribbles noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayer;

impl BasePlayer for RandomPlayer {
    fn decide(&self, view: &PlayerView, rng: &mut dyn RngCore) -> Option<Move> {
        match view.phase? {
            GamePhase::PickWord | GamePhase::Guess => {
                WORDS.choose(rng).map(|word| Move::word(*word))
            }
            GamePhase::Draw => {
                let data = format!("{:016x}", rng.next_u64());
                let id = format!("{}-r{}", view.player, view.round);
                Some(Move::drawing(id, view.player.clone(), data))
            }
        }
    }
}
