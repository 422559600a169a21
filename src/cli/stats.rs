use std::time::Duration;

use crate::game::game::Game;
use crate::types::GameStatus;

#[derive(Debug, Default, Clone)]
pub struct SimulationStats {
    pub games: u32,
    pub completed: u32,
    pub total_rounds: u64,
    pub chains: u64,
    pub total_chain_len: u64,
    /// Chains whose last word matches the opening word.
    pub intact_chains: u64,
    pub total_duration: Duration,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_rounds += u64::from(game.state.round());
        if game.status() == GameStatus::Over && game.state.chains().all_len(game.state.starting_players()) {
            self.completed += 1;
        }

        for chain in game.state.chains().iter() {
            self.chains += 1;
            self.total_chain_len += chain.len() as u64;
            let opening = chain.first().and_then(|m| m.as_word());
            let closing = chain.iter().rev().find_map(|m| m.as_word());
            if chain.len() > 1 && opening.is_some() && opening == closing {
                self.intact_chains += 1;
            }
        }
    }

    pub fn get_avg_rounds(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games as f64
    }

    pub fn get_avg_chain_len(&self) -> f64 {
        if self.chains == 0 {
            return 0.0;
        }
        self.total_chain_len as f64 / self.chains as f64
    }

    pub fn get_intact_rate(&self) -> f64 {
        if self.chains == 0 {
            return 0.0;
        }
        self.intact_chains as f64 / self.chains as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: SimulationStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(&mut self, game: &Game, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}
