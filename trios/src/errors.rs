use crate::{CardId, Color, Coordinate, Phase};

/// The error type for [`Board::place_card()`](crate::Board::place_card), i.e. for placing a single card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalCardPlayed {
    OutOfBounds { position: Coordinate },
    Hole { position: Coordinate },
    Occupied { position: Coordinate, existing_card: CardId },
}

impl std::error::Error for IllegalCardPlayed {}

impl std::fmt::Display for IllegalCardPlayed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalCardPlayed::OutOfBounds { position } =>
                write!(f, "Card was played at {}, which is out of the bounds of the board", position),
            IllegalCardPlayed::Hole { position } =>
                write!(f, "Card was played at {}, which is a hole", position),
            IllegalCardPlayed::Occupied { position, existing_card } =>
                write!(f, "Card was played at {}, which is already occupied by {}", position, existing_card),
        }
    }
}

/// The error type for one move, i.e. a precondition of
/// [`Game::play_card()`](crate::Game::play_card) was violated.
///
/// A move that fails with this error has not changed the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    WrongPhase {
        phase: Phase,
    },
    NotYourTurn {
        color: Color,
        current: Color,
    },
    /// The moves of this color are chosen by a strategy.
    AiControlled {
        color: Color,
    },
    CardNotInHand {
        card_id: CardId,
    },
    IllegalCardPlayed {
        card_id: CardId,
        err: IllegalCardPlayed,
    },
    GameNotOver,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalCardPlayed { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::WrongPhase { phase } => {
                write!(f, "No move can be made while the game is in phase {}", phase)
            }
            IllegalMove::NotYourTurn { color, current } => {
                write!(f, "{} tried to move, but it is {}'s turn", color, current)
            }
            IllegalMove::AiControlled { color } => {
                write!(f, "{} is an AI player and can't be moved by hand", color)
            }
            IllegalMove::CardNotInHand { card_id } => {
                write!(f, "Tried to play {}, which is not in the player's hand", card_id)
            }
            IllegalMove::IllegalCardPlayed { card_id, err: _ } => {
                write!(f, "Error placing card {}", card_id)
            }
            IllegalMove::GameNotOver => write!(f, "The game is not over yet"),
        }
    }
}

/// The error type for building boards, cards, hands and games from invalid data.
///
/// Nothing is ever constructed in a partial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalConstruction {
    ZeroDimension { rows: usize, cols: usize },
    TooManyCells { rows: usize, cols: usize },
    HoleOutOfBounds { position: Coordinate },
    StrengthOutOfRange { value: u8 },
    EmptyCardId,
    DuplicateCard { card_id: CardId },
    EmptyHand { color: Color },
    NotEnoughCards { needed: usize, found: usize },
    WrongCellCount { expected: usize, found: usize },
    InconsistentState { reason: String },
}

impl std::error::Error for IllegalConstruction {}

impl std::fmt::Display for IllegalConstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalConstruction::ZeroDimension { rows, cols } => {
                write!(f, "Board dimensions must be positive, got {}x{}", rows, cols)
            }
            IllegalConstruction::TooManyCells { rows, cols } => {
                write!(f, "A board of {}x{} cells is too large", rows, cols)
            }
            IllegalConstruction::HoleOutOfBounds { position } => {
                write!(f, "Hole at {} is out of the bounds of the board", position)
            }
            IllegalConstruction::StrengthOutOfRange { value } => {
                write!(f, "Card strength {} is out of the range 0 to 10", value)
            }
            IllegalConstruction::EmptyCardId => write!(f, "Card identifier must not be empty"),
            IllegalConstruction::DuplicateCard { card_id } => {
                write!(f, "Card {} appears more than once", card_id)
            }
            IllegalConstruction::EmptyHand { color } => {
                write!(f, "The hand of {} is empty", color)
            }
            IllegalConstruction::NotEnoughCards { needed, found } => {
                write!(f, "At least {} cards are needed, but only {} were given", needed, found)
            }
            IllegalConstruction::WrongCellCount { expected, found } => {
                write!(f, "Expected {} cells, found {}", expected, found)
            }
            IllegalConstruction::InconsistentState { reason } => {
                write!(f, "Inconsistent game state: {}", reason)
            }
        }
    }
}

/// Something that was referenced does not exist at all.
///
/// This is distinct from [`IllegalMove`], which means it exists but cannot be
/// used like this right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotFound {
    Game { id: u64 },
    Card { card_id: String },
    Player { color: Color },
}

impl std::error::Error for NotFound {}

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFound::Game { id } => write!(f, "Game {} not found", id),
            NotFound::Card { card_id } => write!(f, "Card {} not found", card_id),
            NotFound::Player { color } => write!(f, "Player {} not found", color),
        }
    }
}

/// Any error that can come out of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    IllegalMove(IllegalMove),
    IllegalConstruction(IllegalConstruction),
    NotFound(NotFound),
    /// A programming-contract violation. Not recoverable.
    Internal(String),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::IllegalMove(err) => Some(err),
            GameError::IllegalConstruction(err) => Some(err),
            GameError::NotFound(err) => Some(err),
            GameError::Internal(_) => None,
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::IllegalMove(_) => write!(f, "Invalid move"),
            GameError::IllegalConstruction(_) => write!(f, "Illegal construction"),
            GameError::NotFound(_) => write!(f, "Not found"),
            GameError::Internal(msg) => write!(f, "Internal inconsistency: {}", msg),
        }
    }
}

impl From<IllegalMove> for GameError {
    fn from(err: IllegalMove) -> Self {
        GameError::IllegalMove(err)
    }
}

impl From<IllegalConstruction> for GameError {
    fn from(err: IllegalConstruction) -> Self {
        GameError::IllegalConstruction(err)
    }
}

impl From<NotFound> for GameError {
    fn from(err: NotFound) -> Self {
        GameError::NotFound(err)
    }
}
