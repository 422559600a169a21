use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::env::PlayerView;
use crate::game::action::GameMove;
use crate::game::{GameConfig, GameError, GameState};
use crate::players::BasePlayer;
use crate::types::{GameStatus, PlayerId};

pub type GameId = Uuid;

/// A relay instance: the state plus the id the hosting area knows it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_id(Uuid::new_v4(), config)
    }

    pub fn with_id(id: GameId, config: GameConfig) -> Self {
        Self {
            id,
            state: GameState::new(config),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_over(&self) -> bool {
        self.status() == GameStatus::Over
    }

    /// Seats every bot, readies them and drives rounds until the relay ends
    /// or a bot has nothing to say.
    pub fn play<P: BasePlayer, R: Rng>(
        &mut self,
        seats: &[(PlayerId, P)],
        rng: &mut R,
    ) -> Result<GameStatus, GameError> {
        for (id, _) in seats {
            self.state.join(id.clone())?;
        }
        for (id, _) in seats {
            self.state.mark_ready(id)?;
        }
        while self.status() == GameStatus::InProgress {
            if self.play_tick(seats, rng)?.is_empty() {
                debug!(game = %self.id, round = self.state.round(), "bots stalled");
                break;
            }
        }
        Ok(self.status())
    }

    /// Lets every seat that still owes a move this round contribute once.
    pub fn play_tick<P: BasePlayer, R: Rng>(
        &mut self,
        seats: &[(PlayerId, P)],
        rng: &mut R,
    ) -> Result<Vec<GameMove>, GameError> {
        let mut applied = Vec::new();
        for (id, player) in seats {
            if !self.state.awaiting(id) {
                continue;
            }
            let Some(view) = PlayerView::for_player(&self.state, id) else {
                continue;
            };
            if let Some(contribution) = player.decide(&view, rng) {
                let game_move = GameMove::new(id.clone(), contribution);
                self.state.apply_move(game_move.clone())?;
                applied.push(game_move);
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::players::{EchoPlayer, RandomPlayer};

    fn seats<P: Clone>(n: usize, player: P) -> Vec<(PlayerId, P)> {
        (1..=n)
            .map(|i| (PlayerId::new(format!("p{i}")), player.clone()))
            .collect()
    }

    #[test]
    fn random_bots_finish_a_relay() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game = Game::new(GameConfig::default());
        let status = game.play(&seats(5, RandomPlayer), &mut rng).unwrap();
        assert_eq!(status, GameStatus::Over);
        assert!(game.state.chains().all_len(5));
    }

    #[test]
    fn echo_bots_carry_the_opening_word() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::new(GameConfig::default());
        game.play(&seats(3, EchoPlayer), &mut rng).unwrap();
        for chain in game.state.chains().iter() {
            let opening = chain[0].as_word();
            assert!(opening.is_some());
            assert_eq!(chain[2].as_word(), opening);
        }
    }

    #[test]
    fn ids_are_unique_per_instance() {
        let a = Game::new(GameConfig::default());
        let b = Game::new(GameConfig::default());
        assert_ne!(a.id, b.id);
    }
}
