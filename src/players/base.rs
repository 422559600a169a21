use rand::RngCore;

use crate::env::PlayerView;
use crate::game::action::Move;

/// A seat filled by code instead of a person.
pub trait BasePlayer {
    /// Contribution for the prompt in `view`, or `None` to sit the round out.
    fn decide(&self, view: &PlayerView, rng: &mut dyn RngCore) -> Option<Move>;
}
