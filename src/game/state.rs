use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{GameOverReason, GamePhase, GameStatus, MIN_PLAYERS, PlayerId};

use super::{
    action::GameMove,
    chains::ChainTable,
    players::Roster,
    rotation::{Assignment, phase_for_round},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Roster size that moves the lobby to WAITING_TO_START.
    pub min_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(self.min_players));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("min_players must be at least {min}, got {0}", min = MIN_PLAYERS)]
    TooFewPlayers(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerJoined {
        player: PlayerId,
    },
    PlayerLeft {
        player: PlayerId,
    },
    PlayerReady {
        player: PlayerId,
    },
    GameStarted {
        players: usize,
    },
    MoveApplied {
        player: PlayerId,
        slot: usize,
        round: u32,
    },
    RoundCompleted {
        round: u32,
        rotated: bool,
    },
    GameOver {
        reason: GameOverReason,
    },
}

/// Events produced by one accepted command. Empty for accepted no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub events: Vec<GameEvent>,
    pub done: bool,
}

impl StepOutcome {
    fn push(&mut self, event: GameEvent) {
        if matches!(event, GameEvent::GameOver { .. }) {
            self.done = true;
        }
        self.events.push(event);
    }

    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("player is already in this game")]
    AlreadyInGame,
    #[error("player is not in this game")]
    NotInGame,
    #[error("game is not in progress")]
    GameNotInProgress,
    #[error("already made a move this round")]
    DuplicateMove,
    #[error("move does not match the {0} phase")]
    InvalidMove(GamePhase),
    #[error("game has already started")]
    GameAlreadyStarted,
}

/// State of one relay instance. Mutated only through the command methods;
/// a rejected command leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,
    roster: Roster,
    status: GameStatus,
    round: u32,
    chains: ChainTable,
    assignment: Assignment,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            roster: Roster::new(),
            status: GameStatus::WaitingForPlayers,
            round: 0,
            chains: ChainTable::default(),
            assignment: Assignment::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn players(&self) -> &[PlayerId] {
        self.roster.players()
    }

    pub fn ready(&self) -> &[PlayerId] {
        self.roster.ready()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> GamePhase {
        phase_for_round(self.round)
    }

    pub fn chains(&self) -> &ChainTable {
        &self.chains
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Roster size when the relay started; zero before that.
    pub fn starting_players(&self) -> usize {
        self.chains.slots()
    }

    fn min_players(&self) -> usize {
        self.config.min_players.max(MIN_PLAYERS)
    }

    /// Slot `player` feeds this round, once the relay is running.
    pub fn slot_of(&self, player: &PlayerId) -> Option<usize> {
        self.roster
            .position(player)
            .and_then(|position| self.assignment.slot_for(position))
    }

    /// Whether `player` still owes a contribution this round.
    pub fn awaiting(&self, player: &PlayerId) -> bool {
        self.status == GameStatus::InProgress
            && self
                .slot_of(player)
                .is_some_and(|slot| !self.chains.has_entry_for(slot, self.round))
    }

    pub fn join(&mut self, player: PlayerId) -> Result<StepOutcome, GameError> {
        if self.roster.contains(&player) {
            return Err(GameError::AlreadyInGame);
        }
        if !self.status.is_waiting() {
            return Err(GameError::GameAlreadyStarted);
        }

        let mut outcome = StepOutcome::default();
        self.roster.push(player.clone());
        debug!(player = %player, roster = self.roster.len(), "player joined");
        outcome.push(GameEvent::PlayerJoined { player });

        if self.status == GameStatus::WaitingForPlayers && self.roster.len() >= self.min_players() {
            self.status = GameStatus::WaitingToStart;
        }
        Ok(outcome)
    }

    pub fn leave(&mut self, player: &PlayerId) -> Result<StepOutcome, GameError> {
        if !self.roster.contains(player) {
            return Err(GameError::NotInGame);
        }

        let mut outcome = StepOutcome::default();
        match self.status {
            GameStatus::WaitingForPlayers | GameStatus::WaitingToStart => {
                self.roster.remove(player);
                debug!(player = %player, roster = self.roster.len(), "player left lobby");
                outcome.push(GameEvent::PlayerLeft {
                    player: player.clone(),
                });
                if self.roster.len() < self.min_players() {
                    self.status = GameStatus::WaitingForPlayers;
                } else {
                    // The departed player may have been the last one not ready.
                    self.try_start(&mut outcome);
                }
            }
            GameStatus::InProgress => {
                info!(player = %player, round = self.round, "player left mid-relay, ending game");
                self.status = GameStatus::Over;
                outcome.push(GameEvent::PlayerLeft {
                    player: player.clone(),
                });
                outcome.push(GameEvent::GameOver {
                    reason: GameOverReason::PlayerLeft,
                });
            }
            GameStatus::Over => {}
        }
        Ok(outcome)
    }

    pub fn mark_ready(&mut self, player: &PlayerId) -> Result<StepOutcome, GameError> {
        if !self.roster.contains(player) {
            return Err(GameError::NotInGame);
        }

        let mut outcome = StepOutcome::default();
        if self.roster.mark_ready(player) {
            debug!(player = %player, "player ready");
            outcome.push(GameEvent::PlayerReady {
                player: player.clone(),
            });
        }
        self.try_start(&mut outcome);
        Ok(outcome)
    }

    /// Slot `player` may write to right now, or why they may not.
    /// Does not look at the move itself.
    pub fn check_turn(&self, player: &PlayerId) -> Result<usize, GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::GameNotInProgress);
        }
        let slot = self.slot_of(player).ok_or(GameError::NotInGame)?;
        if self.chains.has_entry_for(slot, self.round) {
            return Err(GameError::DuplicateMove);
        }
        Ok(slot)
    }

    pub fn apply_move(&mut self, game_move: GameMove) -> Result<StepOutcome, GameError> {
        let slot = self.check_turn(&game_move.player)?;
        let phase = self.phase();
        if !game_move.contribution.fits(phase) {
            return Err(GameError::InvalidMove(phase));
        }

        let mut outcome = StepOutcome::default();
        self.chains.append(slot, game_move.contribution);
        debug!(player = %game_move.player, slot, round = self.round, "move applied");
        outcome.push(GameEvent::MoveApplied {
            player: game_move.player,
            slot,
            round: self.round,
        });

        if self.chains.all_len(self.round as usize + 1) {
            self.complete_round(&mut outcome);
        }
        Ok(outcome)
    }

    fn complete_round(&mut self, outcome: &mut StepOutcome) {
        let completed = self.round;
        self.round += 1;
        let rotated = self.assignment.advance(completed);
        info!(round = completed, rotated, "round completed");
        outcome.push(GameEvent::RoundCompleted {
            round: completed,
            rotated,
        });

        if self.chains.all_len(self.chains.slots()) {
            info!(rounds = self.round, "every chain complete, game over");
            self.status = GameStatus::Over;
            outcome.push(GameEvent::GameOver {
                reason: GameOverReason::Completed,
            });
        }
    }

    fn can_start(&self) -> bool {
        self.status == GameStatus::WaitingToStart
            && self.roster.len() >= self.min_players()
            && self.roster.all_ready()
    }

    fn try_start(&mut self, outcome: &mut StepOutcome) {
        if !self.can_start() {
            return;
        }
        let players = self.roster.len();
        self.chains = ChainTable::with_slots(players);
        self.assignment = Assignment::identity(players);
        self.round = 0;
        self.status = GameStatus::InProgress;
        info!(players, "game started");
        outcome.push(GameEvent::GameStarted { players });
    }
}
