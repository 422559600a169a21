//! What observers get to see after each accepted command.

use serde::{Deserialize, Serialize};

use crate::game::GameState;
use crate::game::action::{Drawing, Move};
use crate::game::chains::Chain;
use crate::types::{GamePhase, GameStatus, PlayerId};

/// Full engine state, enough for a client to render any seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub status: GameStatus,
    pub players: Vec<PlayerId>,
    pub ready: Vec<PlayerId>,
    pub round: u32,
    /// Only set while the relay is running.
    pub phase: Option<GamePhase>,
    pub chains: Vec<Chain>,
    pub assignment: Vec<usize>,
}

/// One participant's slice of an [`Observation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: PlayerId,
    pub position: usize,
    pub slot: Option<usize>,
    pub status: GameStatus,
    pub round: u32,
    pub phase: Option<GamePhase>,
    pub your_turn: bool,
    pub word_to_draw: Option<String>,
    pub image_to_guess: Option<Drawing>,
    /// The chain this participant opened, once chains exist.
    pub our_chain: Option<Chain>,
}

impl PlayerView {
    /// `None` when `player` is not on the roster.
    pub fn for_player(state: &GameState, player: &PlayerId) -> Option<Self> {
        let position = state.roster().position(player)?;
        let running = state.status() == GameStatus::InProgress;
        let slot = state.slot_of(player);
        let chain = slot.and_then(|slot| state.chains().get(slot));

        let (word_to_draw, image_to_guess) = match (running, state.phase(), chain) {
            (true, GamePhase::Draw, Some(chain)) => (latest_word(chain), None),
            (true, GamePhase::Guess, Some(chain)) => (None, latest_drawing(chain)),
            _ => (None, None),
        };

        Some(Self {
            player: player.clone(),
            position,
            slot,
            status: state.status(),
            round: state.round(),
            phase: running.then(|| state.phase()),
            your_turn: state.awaiting(player),
            word_to_draw,
            image_to_guess,
            our_chain: state.chains().get(position).cloned(),
        })
    }
}

fn latest_word(chain: &Chain) -> Option<String> {
    chain.iter().rev().find_map(Move::as_word).map(str::to_owned)
}

fn latest_drawing(chain: &Chain) -> Option<Drawing> {
    chain.iter().rev().find_map(Move::as_drawing).cloned()
}

pub fn observation_from_state(state: &GameState) -> Observation {
    Observation {
        status: state.status(),
        players: state.players().to_vec(),
        ready: state.ready().to_vec(),
        round: state.round(),
        phase: (state.status() == GameStatus::InProgress).then(|| state.phase()),
        chains: state.chains().as_slice().to_vec(),
        assignment: state.assignment().as_slice().to_vec(),
    }
}

impl Observation {
    /// Participants who still owe a move this round.
    pub fn awaiting(&self) -> Vec<&PlayerId> {
        if self.status != GameStatus::InProgress {
            return Vec::new();
        }
        self.players
            .iter()
            .zip(&self.assignment)
            .filter(|&(_, &slot)| {
                self.chains
                    .get(slot)
                    .is_some_and(|chain| chain.len() <= self.round as usize)
            })
            .map(|(player, _)| player)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::GameMove;

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    fn started(names: &[&str]) -> GameState {
        let mut state = GameState::default();
        for name in names {
            state.join(id(name)).unwrap();
        }
        for name in names {
            state.mark_ready(&id(name)).unwrap();
        }
        state
    }

    #[test]
    fn lobby_view_has_no_prompt() {
        let mut state = GameState::default();
        state.join(id("p1")).unwrap();
        let view = PlayerView::for_player(&state, &id("p1")).unwrap();
        assert_eq!(view.phase, None);
        assert!(!view.your_turn);
        assert_eq!(view.slot, None);
        assert_eq!(view.our_chain, None);
        assert!(PlayerView::for_player(&state, &id("ghost")).is_none());
    }

    #[test]
    fn drawer_sees_the_word_of_the_chain_they_feed() {
        let mut state = started(&["p1", "p2", "p3"]);
        for name in ["p1", "p2", "p3"] {
            state
                .apply_move(GameMove::new(name, Move::word(format!("{name}-word"))))
                .unwrap();
        }
        // p1 now feeds slot 1, which p2 opened.
        let view = PlayerView::for_player(&state, &id("p1")).unwrap();
        assert_eq!(view.phase, Some(GamePhase::Draw));
        assert_eq!(view.slot, Some(1));
        assert_eq!(view.word_to_draw.as_deref(), Some("p2-word"));
        assert!(view.your_turn);
    }

    #[test]
    fn guesser_sees_the_latest_drawing() {
        let names = ["p1", "p2", "p3", "p4"];
        let mut state = started(&names);
        for name in names {
            state.apply_move(GameMove::new(name, Move::word(name))).unwrap();
        }
        // Even roster: the first hand-off keeps everyone on their own chain.
        for name in names {
            let sketch = Move::drawing(format!("{name}-d"), id(name), name);
            state.apply_move(GameMove::new(name, sketch)).unwrap();
        }
        let view = PlayerView::for_player(&state, &id("p1")).unwrap();
        assert_eq!(view.phase, Some(GamePhase::Guess));
        let drawing = view.image_to_guess.unwrap();
        assert_eq!(drawing.author_id, id("p2"));
        assert!(view.word_to_draw.is_none());
    }

    #[test]
    fn finished_game_shows_the_chain_each_player_opened() {
        let names = ["p1", "p2", "p3"];
        let mut state = started(&names);
        while state.status() == GameStatus::InProgress {
            let contribution = |name: &str| match state.phase() {
                GamePhase::Draw => Move::drawing(format!("{name}-d"), id(name), name),
                _ => Move::word(format!("{name}-{}", state.round())),
            };
            let moves: Vec<_> = names
                .iter()
                .map(|name| GameMove::new(*name, contribution(name)))
                .collect();
            for mv in moves {
                state.apply_move(mv).unwrap();
            }
        }
        assert_eq!(state.status(), GameStatus::Over);

        let view = PlayerView::for_player(&state, &id("p1")).unwrap();
        let chain = view.our_chain.unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0], Move::word("p1-0"));
        assert_eq!(view.phase, None);
    }

    #[test]
    fn observation_lists_outstanding_players() {
        let mut state = started(&["p1", "p2", "p3"]);
        state.apply_move(GameMove::new("p2", Move::word("cat"))).unwrap();
        let observation = observation_from_state(&state);
        assert_eq!(observation.awaiting(), vec![&id("p1"), &id("p3")]);
        assert_eq!(observation.phase, Some(GamePhase::PickWord));
        assert_eq!(observation.assignment, vec![0, 1, 2]);
    }

    #[test]
    fn observation_serializes_for_broadcast() {
        let state = started(&["p1", "p2"]);
        let json = serde_json::to_value(observation_from_state(&state)).unwrap();
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["phase"], "PICK_WORD");
        assert_eq!(json["players"][1], "p2");
    }
}
