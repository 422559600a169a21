use serde::{Deserialize, Serialize};

use crate::types::{GamePhase, PlayerId};

/// An image submitted during a draw round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Drawing {
    pub id: String,
    pub author_id: PlayerId,
    /// Encoded image, opaque to the engine.
    pub data: String,
}

/// One contribution to a chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Move {
    Word { text: String },
    Drawing(Drawing),
}

impl Move {
    pub fn word(text: impl Into<String>) -> Self {
        Move::Word { text: text.into() }
    }

    pub fn drawing(id: impl Into<String>, author_id: PlayerId, data: impl Into<String>) -> Self {
        Move::Drawing(Drawing {
            id: id.into(),
            author_id,
            data: data.into(),
        })
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Move::Word { text } => Some(text),
            Move::Drawing(_) => None,
        }
    }

    pub fn as_drawing(&self) -> Option<&Drawing> {
        match self {
            Move::Word { .. } => None,
            Move::Drawing(drawing) => Some(drawing),
        }
    }

    /// Credits a drawing to `author`. Words carry no author and pass through.
    pub fn authored_by(self, author: &PlayerId) -> Self {
        match self {
            Move::Drawing(drawing) => Move::Drawing(Drawing {
                author_id: author.clone(),
                ..drawing
            }),
            word => word,
        }
    }

    /// Whether this move has the shape `phase` asks for.
    pub fn fits(&self, phase: GamePhase) -> bool {
        match (self, phase) {
            (Move::Word { text }, GamePhase::PickWord | GamePhase::Guess) => !text.is_empty(),
            (Move::Drawing(_), GamePhase::Draw) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GameMove {
    pub player: PlayerId,
    pub contribution: Move,
}

impl GameMove {
    pub fn new(player: impl Into<PlayerId>, contribution: Move) -> Self {
        Self {
            player: player.into(),
            contribution,
        }
    }
}

/// Move as it arrives from clients: either field may be missing, or both set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovePayload {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<Drawing>,
}

impl MovePayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn image(drawing: Drawing) -> Self {
        Self {
            text: None,
            image: Some(drawing),
        }
    }

    /// Picks the field `phase` asks for. `None` means the payload lacks it.
    pub fn into_move(self, phase: GamePhase) -> Option<Move> {
        if phase.expects_text() {
            self.text.map(|text| Move::Word { text })
        } else {
            self.image.map(Move::Drawing)
        }
    }
}
