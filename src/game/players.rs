use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// Participants in join order plus the subset that asked to start.
///
/// Join order doubles as rotation order: position `i` feeds
/// `assignment[i]` once the relay is running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<PlayerId>,
    ready: Vec<PlayerId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn ready(&self) -> &[PlayerId] {
        &self.ready
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    pub fn position(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    pub fn is_ready(&self, player: &PlayerId) -> bool {
        self.ready.contains(player)
    }

    /// Every member is ready. Trivially true for an empty roster.
    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| self.ready.contains(p))
    }

    /// Appends `player`. Returns `false` when it was already present.
    pub fn push(&mut self, player: PlayerId) -> bool {
        if self.contains(&player) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Returns `false` when the player was already ready.
    pub fn mark_ready(&mut self, player: &PlayerId) -> bool {
        if self.is_ready(player) {
            return false;
        }
        self.ready.push(player.clone());
        true
    }

    /// Drops `player` from both the roster and the ready list.
    pub fn remove(&mut self, player: &PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p != player);
        self.ready.retain(|p| p != player);
        self.players.len() != before
    }
}
