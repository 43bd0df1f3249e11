use serde::{Deserialize, Serialize};

use crate::{Card, Cell, Coordinate, Outcome, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Moves first.
    Red,
    Blue,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Blue];

    /// The opponent.
    pub fn other(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// The position of this color in [`Color::ALL`].
    pub fn idx(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "RED"),
            Color::Blue => write!(f, "BLUE"),
        }
    }
}

/// Whether a player chooses moves themselves, or has them chosen by a
/// [`Strategy`](crate::Strategy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    Ai,
}

/// A request to create or change a game.
///
/// Card identifiers are resolved against the hand of `color` when the
/// command is executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Start a new game with the given kinds of players.
    CreateGame { red: PlayerKind, blue: PlayerKind },
    /// Place a card from the hand of `color`.
    PlayCard {
        game_id: u64,
        color: Color,
        card_id: String,
        position: Coordinate,
    },
    /// Withdraw a pending move request. This never changes the game.
    CancelMove { game_id: u64, color: Color },
}

/// One cell, as seen by a presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellView {
    Hole,
    Empty {
        /// Whether the current player may place a card here.
        playable: bool,
    },
    Card {
        card: Card,
    },
}

/// Everything needed to render a game, without any game logic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Indexed by `[row][col]`.
    pub cells: Vec<Vec<CellView>>,
    pub red_hand: Vec<Card>,
    pub blue_hand: Vec<Card>,
    pub red_score: usize,
    pub blue_score: usize,
    pub phase: Phase,
    pub current_player: Color,
    /// Only present once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub outcome: Option<Outcome>,
}

/// The state of a single player in a [`SavedGame`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub color: Color,
    pub kind: PlayerKind,
    pub hand: Vec<Card>,
}

/// The logical content of a checkpoint of a game between two moves.
///
/// The encoding is up to whoever stores it. See
/// [`Game::save()`](crate::Game::save) and [`Game::restore()`](crate::Game::restore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub rows: usize,
    pub cols: usize,
    /// In row-major order.
    pub cells: Vec<Cell>,
    pub red: SavedPlayer,
    pub blue: SavedPlayer,
    pub phase: Phase,
    pub current_player: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"type": "PlayCard", "game_id": 3, "color": "blue", "card_id": "Wyvern", "position": {"row": 2, "col": 0}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::PlayCard {
                game_id: 3,
                color: Color::Blue,
                card_id: String::from("Wyvern"),
                position: Coordinate::new(2, 0),
            }
        );
        let cmd: Command =
            serde_json::from_str(r#"{"type": "CreateGame", "red": "human", "blue": "ai"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::CreateGame {
                red: PlayerKind::Human,
                blue: PlayerKind::Ai
            }
        );
    }

    #[test]
    fn colors_alternate() {
        assert_eq!(Color::Red.other(), Color::Blue);
        assert_eq!(Color::Blue.other().other(), Color::Blue);
        assert_eq!(Color::Red.to_string(), "RED");
    }
}
