//! Which chain each roster position feeds, round by round.
//!
//! Round 0 is the identity: everyone writes the opening word of their own
//! chain. After every completed round the assignment is left-rotated by one,
//! so `[0, 1, 2]` becomes `[1, 2, 0]`: position 0 now feeds slot 1 and the
//! last position inherits what the first one had.
//!
//! The single exception lives in [`should_rotate`]: with an even player
//! count the hand-off after round 0 does not rotate, so every first drawer
//! illustrates their own word. Odd counts always rotate. This mirrors the
//! long-standing house behaviour and awaits product confirmation before
//! anyone changes it.

use serde::{Deserialize, Serialize};

use crate::types::GamePhase;

/// Phase asked for by `round`: 0 picks a word, odd rounds draw, even rounds guess.
pub fn phase_for_round(round: u32) -> GamePhase {
    if round == 0 {
        GamePhase::PickWord
    } else if round % 2 == 1 {
        GamePhase::Draw
    } else {
        GamePhase::Guess
    }
}

/// Whether the hand-off after `completed_round` rotates.
pub fn should_rotate(players: usize, completed_round: u32) -> bool {
    !(players % 2 == 0 && completed_round == 0)
}

/// Position-to-slot mapping. Always a permutation of `0..n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn identity(players: usize) -> Self {
        Self((0..players).collect())
    }

    pub fn slot_for(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rotate(&mut self) {
        if !self.0.is_empty() {
            self.0.rotate_left(1);
        }
    }

    /// Applies the hand-off that follows `completed_round`.
    pub fn advance(&mut self, completed_round: u32) -> bool {
        let rotated = should_rotate(self.0.len(), completed_round);
        if rotated {
            self.rotate();
        }
        rotated
    }

    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.0.len()];
        for &slot in &self.0 {
            match seen.get_mut(slot) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }
}
