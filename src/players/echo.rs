use rand::RngCore;
use rand::seq::SliceRandom;

use crate::env::PlayerView;
use crate::game::action::Move;
use crate::players::BasePlayer;
use crate::players::random::WORDS;
use crate::types::GamePhase;

/// A perfect relay link: draws the word it is shown into the image data and
/// reads it straight back when guessing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoPlayer;

impl BasePlayer for EchoPlayer {
    fn decide(&self, view: &PlayerView, rng: &mut dyn RngCore) -> Option<Move> {
        match view.phase? {
            GamePhase::PickWord => WORDS.choose(rng).map(|word| Move::word(*word)),
            GamePhase::Draw => {
                let word = view.word_to_draw.clone()?;
                let id = format!("{}-r{}", view.player, view.round);
                Some(Move::drawing(id, view.player.clone(), word))
            }
            GamePhase::Guess => view
                .image_to_guess
                .as_ref()
                .map(|drawing| Move::word(drawing.data.clone())),
        }
    }
}
