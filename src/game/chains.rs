use serde::{Deserialize, Serialize};

use crate::game::action::Move;

/// Append-only relay thread. Entry `i` was written in round `i`.
pub type Chain = Vec<Move>;

/// One chain per slot, sized when the relay starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainTable {
    chains: Vec<Chain>,
}

impl ChainTable {
    pub fn with_slots(slots: usize) -> Self {
        Self {
            chains: vec![Vec::new(); slots],
        }
    }

    pub fn slots(&self) -> usize {
        self.chains.len()
    }

    pub fn get(&self, slot: usize) -> Option<&Chain> {
        self.chains.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter()
    }

    pub fn as_slice(&self) -> &[Chain] {
        &self.chains
    }

    /// Whether `slot` already holds its entry for `round`.
    pub fn has_entry_for(&self, slot: usize, round: u32) -> bool {
        self.chains
            .get(slot)
            .is_some_and(|chain| chain.len() > round as usize)
    }

    /// Caller guarantees `slot` is in range.
    pub(crate) fn append(&mut self, slot: usize, contribution: Move) {
        self.chains[slot].push(contribution);
    }

    /// Every chain holds exactly `len` entries.
    pub fn all_len(&self, len: usize) -> bool {
        !self.chains.is_empty() && self.chains.iter().all(|chain| chain.len() == len)
    }
}
