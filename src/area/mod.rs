//! Command dispatch for one hosting area and the instances it has run.
//!
//! The area owns an arena of relay instances keyed by id. At most one of
//! them is current; `Join` opens a fresh instance whenever the current one
//! is missing or over. Every accepted command is followed by exactly one
//! `StateChanged` notification. Rejected commands notify nobody and leave
//! every instance untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::env::{Observation, observation_from_state};
use crate::game::action::{GameMove, MovePayload};
use crate::game::game::GameId;
use crate::game::{Game, GameConfig, GameError, StepOutcome};
use crate::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaCommand {
    Join,
    Ready { game_id: GameId },
    Leave { game_id: GameId },
    Move { game_id: GameId, payload: MovePayload },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandResponse {
    Joined { game_id: GameId },
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaEvent {
    StateChanged {
        area_id: String,
        game_id: GameId,
        observation: Observation,
    },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AreaError {
    #[error("no game in progress")]
    NoGameInProgress,
    #[error("game id does not match the current game")]
    GameIdMismatch,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Receives broadcasts from a [`GameArea`].
pub trait AreaObserver {
    fn notify(&mut self, event: &AreaEvent);
}

/// Records notifications in order.
impl AreaObserver for Vec<AreaEvent> {
    fn notify(&mut self, event: &AreaEvent) {
        self.push(event.clone());
    }
}

/// Relay instances keyed by id.
#[derive(Debug, Clone, Default)]
pub struct GameArena {
    games: HashMap<GameId, Game>,
}

impl GameArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, game: Game) -> GameId {
        let id = game.id;
        self.games.insert(id, game);
        id
    }

    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.games.get(id)
    }

    pub fn get_mut(&mut self, id: &GameId) -> Option<&mut Game> {
        self.games.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn finished(&self) -> impl Iterator<Item = &Game> {
        self.games.values().filter(|game| game.is_over())
    }

    /// Drops every finished instance, returning how many went.
    pub fn prune_finished(&mut self) -> usize {
        let before = self.games.len();
        self.games.retain(|_, game| !game.is_over());
        before - self.games.len()
    }
}

pub struct GameArea<O: AreaObserver> {
    id: String,
    config: GameConfig,
    arena: GameArena,
    current: Option<GameId>,
    observer: O,
}

impl<O: AreaObserver> GameArea<O> {
    pub fn new(id: impl Into<String>, config: GameConfig, observer: O) -> Self {
        Self {
            id: id.into(),
            config,
            arena: GameArena::new(),
            current: None,
            observer,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn arena(&self) -> &GameArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut GameArena {
        &mut self.arena
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.current.as_ref().and_then(|id| self.arena.get(id))
    }

    pub fn handle_command(
        &mut self,
        player: &PlayerId,
        command: AreaCommand,
    ) -> Result<CommandResponse, AreaError> {
        let result = self.dispatch(player, command);
        match &result {
            Ok(_) => self.broadcast(),
            Err(err) => debug!(area = %self.id, player = %player, error = %err, "command rejected"),
        }
        result
    }

    fn dispatch(
        &mut self,
        player: &PlayerId,
        command: AreaCommand,
    ) -> Result<CommandResponse, AreaError> {
        match command {
            AreaCommand::Join => self.join(player),
            AreaCommand::Ready { game_id } => {
                self.current_mut(game_id)?.state.mark_ready(player)?;
                Ok(CommandResponse::Accepted)
            }
            AreaCommand::Leave { game_id } => {
                self.current_mut(game_id)?.state.leave(player)?;
                Ok(CommandResponse::Accepted)
            }
            AreaCommand::Move { game_id, payload } => {
                let game = self.current_mut(game_id)?;
                apply_payload(game, player, payload)?;
                Ok(CommandResponse::Accepted)
            }
        }
    }

    fn join(&mut self, player: &PlayerId) -> Result<CommandResponse, AreaError> {
        let reusable = self
            .current
            .as_ref()
            .and_then(|id| self.arena.get_mut(id))
            .filter(|game| !game.is_over());

        let game_id = match reusable {
            Some(game) => {
                game.state.join(player.clone())?;
                game.id
            }
            None => {
                let mut game = Game::new(self.config.clone());
                game.state.join(player.clone())?;
                let id = self.arena.insert(game);
                info!(area = %self.id, game = %id, "opened new game instance");
                self.current = Some(id);
                id
            }
        };
        Ok(CommandResponse::Joined { game_id })
    }

    fn current_mut(&mut self, game_id: GameId) -> Result<&mut Game, AreaError> {
        let current = self.current.ok_or(AreaError::NoGameInProgress)?;
        if current != game_id {
            return Err(AreaError::GameIdMismatch);
        }
        self.arena
            .get_mut(&current)
            .ok_or(AreaError::NoGameInProgress)
    }

    fn broadcast(&mut self) {
        let Some(game) = self.current_game() else {
            return;
        };
        let event = AreaEvent::StateChanged {
            area_id: self.id.clone(),
            game_id: game.id,
            observation: observation_from_state(&game.state),
        };
        self.observer.notify(&event);
    }
}

fn apply_payload(
    game: &mut Game,
    player: &PlayerId,
    payload: MovePayload,
) -> Result<StepOutcome, GameError> {
    game.state.check_turn(player)?;
    let phase = game.state.phase();
    let contribution = payload
        .into_move(phase)
        .ok_or(GameError::InvalidMove(phase))?
        .authored_by(player);
    game.state
        .apply_move(GameMove::new(player.clone(), contribution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Drawing;
    use crate::types::{GamePhase, GameStatus};

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    fn area() -> GameArea<Vec<AreaEvent>> {
        GameArea::new("area-1", GameConfig::default(), Vec::new())
    }

    fn joined(area: &mut GameArea<Vec<AreaEvent>>, name: &str) -> GameId {
        match area.handle_command(&id(name), AreaCommand::Join).unwrap() {
            CommandResponse::Joined { game_id } => game_id,
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn join_creates_instance_and_broadcasts() {
        let mut area = area();
        assert!(area.current_game().is_none());
        let game_id = joined(&mut area, "p1");
        assert_eq!(area.current_game().map(|g| g.id), Some(game_id));
        assert_eq!(area.observer().len(), 1);
        let AreaEvent::StateChanged { observation, .. } = &area.observer()[0];
        assert_eq!(observation.players, vec![id("p1")]);
    }

    #[test]
    fn second_join_attaches_to_same_instance() {
        let mut area = area();
        let first = joined(&mut area, "p1");
        let second = joined(&mut area, "p2");
        assert_eq!(first, second);
        assert_eq!(area.arena().len(), 1);
    }

    #[test]
    fn commands_without_game_are_rejected_silently() {
        let mut area = area();
        let err = area
            .handle_command(&id("p1"), AreaCommand::Ready { game_id: GameId::nil() })
            .unwrap_err();
        assert_eq!(err, AreaError::NoGameInProgress);
        assert!(area.observer().is_empty());
    }

    #[test]
    fn mismatched_game_id_is_rejected() {
        let mut area = area();
        joined(&mut area, "p1");
        let err = area
            .handle_command(&id("p1"), AreaCommand::Leave { game_id: GameId::nil() })
            .unwrap_err();
        assert_eq!(err, AreaError::GameIdMismatch);
        assert_eq!(area.observer().len(), 1);
    }

    #[test]
    fn engine_errors_surface_verbatim() {
        let mut area = area();
        joined(&mut area, "p1");
        let err = area.handle_command(&id("p1"), AreaCommand::Join).unwrap_err();
        assert_eq!(err, AreaError::Game(GameError::AlreadyInGame));
        assert_eq!(err.to_string(), "player is already in this game");
    }

    #[test]
    fn payload_is_read_according_to_phase() {
        let mut area = area();
        let game_id = joined(&mut area, "p1");
        joined(&mut area, "p2");
        for name in ["p1", "p2"] {
            area.handle_command(&id(name), AreaCommand::Ready { game_id })
                .unwrap();
        }
        let sketch = Drawing {
            id: "d".into(),
            author_id: id("p1"),
            data: ":3".into(),
        };
        let before = area.current_game().cloned();
        let err = area
            .handle_command(
                &id("p1"),
                AreaCommand::Move {
                    game_id,
                    payload: MovePayload::image(sketch),
                },
            )
            .unwrap_err();
        assert_eq!(err, AreaError::Game(GameError::InvalidMove(GamePhase::PickWord)));
        assert_eq!(area.current_game().cloned(), before);

        area.handle_command(
            &id("p1"),
            AreaCommand::Move {
                game_id,
                payload: MovePayload::text("cat"),
            },
        )
        .unwrap();
        let err = area
            .handle_command(
                &id("p1"),
                AreaCommand::Move {
                    game_id,
                    payload: MovePayload::default(),
                },
            )
            .unwrap_err();
        assert_eq!(err, AreaError::Game(GameError::DuplicateMove));
    }

    #[test]
    fn drawings_are_credited_to_the_sender() {
        let mut area = area();
        let game_id = joined(&mut area, "p1");
        for name in ["p2", "p3"] {
            joined(&mut area, name);
        }
        for name in ["p1", "p2", "p3"] {
            area.handle_command(&id(name), AreaCommand::Ready { game_id })
                .unwrap();
        }
        for name in ["p1", "p2", "p3"] {
            area.handle_command(
                &id(name),
                AreaCommand::Move {
                    game_id,
                    payload: MovePayload::text(name),
                },
            )
            .unwrap();
        }

        let forged = Drawing {
            id: "d".into(),
            author_id: id("p2"),
            data: ":3".into(),
        };
        area.handle_command(
            &id("p1"),
            AreaCommand::Move {
                game_id,
                payload: MovePayload::image(forged),
            },
        )
        .unwrap();

        // p1 feeds slot 1 after the first rotation.
        let game = area.current_game().unwrap();
        let stored = game.state.chains().get(1).and_then(|chain| chain.get(1));
        let author = stored.and_then(|entry| entry.as_drawing()).map(|d| d.author_id.clone());
        assert_eq!(author, Some(id("p1")));
    }

    #[test]
    fn join_after_game_over_opens_new_instance() {
        let mut area = area();
        let first = joined(&mut area, "p1");
        joined(&mut area, "p2");
        for name in ["p1", "p2"] {
            area.handle_command(&id(name), AreaCommand::Ready { game_id: first })
                .unwrap();
        }
        area.handle_command(&id("p2"), AreaCommand::Leave { game_id: first })
            .unwrap();
        assert_eq!(area.current_game().map(|g| g.status()), Some(GameStatus::Over));

        let second = joined(&mut area, "p1");
        assert_ne!(first, second);
        assert_eq!(area.arena().len(), 2);
        assert_eq!(area.arena().finished().count(), 1);
        assert_eq!(area.arena_mut().prune_finished(), 1);
        assert!(area.arena().get(&first).is_none());
    }

    #[test]
    fn commands_round_trip_through_json() {
        let command: AreaCommand = serde_json::from_str(
            r#"{"type":"MOVE","game_id":"00000000-0000-0000-0000-000000000000","payload":{"text":"cat"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            AreaCommand::Move {
                game_id: GameId::nil(),
                payload: MovePayload::text("cat"),
            }
        );
    }
}
