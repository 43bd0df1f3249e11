use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Board, Card, CardId, Cell, CellView, Color, Coordinate, GameError, GameSnapshot, IllegalConstruction,
    IllegalMove, NotFound, Player, SavedGame, SavedPlayer,
};

/// The stage a [`Game`] is in. Phases only ever advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Initialization,
    WaitingForMove,
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Initialization => write!(f, "INITIALIZATION"),
            Phase::WaitingForMove => write!(f, "WAITING_FOR_MOVE"),
            Phase::GameOver => write!(f, "GAME_OVER"),
        }
    }
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(color) => write!(f, "{} wins", color),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Read-only access to a game.
///
/// This is everything a [`Strategy`](crate::Strategy) gets to see.
pub trait GameView {
    fn board(&self) -> &Board;
    fn phase(&self) -> Phase;
    fn current_color(&self) -> Color;
    fn hand(&self, color: Color) -> &[Card];
    fn score(&self, color: Color) -> usize;
    /// `None` unless the game is over.
    fn outcome(&self) -> Option<Outcome>;
    /// How many cards `card` would flip if it was placed at `position` by
    /// its owner. Never changes anything.
    fn potential_flips(&self, card: &Card, position: Coordinate) -> usize;
}

/// The state machine for one game.
///
/// There is no internal locking: callers must make sure that at most one
/// mutating call ([`Self::start()`], [`Self::play_card()`]) is in flight per
/// game. Separate games share nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    /// Indexed by [`Color`].
    players: [Player; 2],
    phase: Phase,
    current: Color,
    outcome: Option<Outcome>,
}

impl Game {
    /// Creates a game in the [`Phase::Initialization`] phase, with red to move.
    pub fn new(board: Board, red: Player, blue: Player) -> Result<Self, IllegalConstruction> {
        if red.color() != Color::Red || blue.color() != Color::Blue {
            return Err(IllegalConstruction::InconsistentState {
                reason: String::from("players must be given as red, then blue"),
            });
        }
        let game = Self {
            board,
            players: [red, blue],
            phase: Phase::Initialization,
            current: Color::Red,
            outcome: None,
        };
        game.check_unique_cards()?;
        for player in &game.players {
            if let Some(card) = player.hand().iter().find(|c| c.owner() != player.color()) {
                return Err(IllegalConstruction::InconsistentState {
                    reason: format!(
                        "{} holds {}, which belongs to {}",
                        player.color(),
                        card.id(),
                        card.owner()
                    ),
                });
            }
        }
        Ok(game)
    }

    /// Moves from [`Phase::Initialization`] to [`Phase::WaitingForMove`].
    ///
    /// If no move is possible at all, the game is over right away.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Initialization {
            return Err(IllegalMove::WrongPhase { phase: self.phase }.into());
        }
        for player in &self.players {
            if player.hand().is_empty() {
                return Err(IllegalConstruction::EmptyHand {
                    color: player.color(),
                }
                .into());
            }
        }
        self.phase = Phase::WaitingForMove;
        info!(
            rows = self.board.rows(),
            cols = self.board.cols(),
            "Game started"
        );
        self.check_game_over();
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_color(&self) -> Color {
        self.current
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.idx()]
    }

    pub fn hand(&self, color: Color) -> &[Card] {
        self.player(color).hand()
    }

    /// The number of cards on the board owned by `color`. Cards in the hand don't count.
    pub fn score(&self, color: Color) -> usize {
        self.board.count_owned(color)
    }

    pub fn winner(&self) -> Result<Outcome, IllegalMove> {
        self.outcome.ok_or(IllegalMove::GameNotOver)
    }

    pub fn potential_flips(&self, card: &Card, position: Coordinate) -> usize {
        self.board.simulate_flips(card, position)
    }

    /// Whether `color` could place any card right now, ignoring whose turn it is.
    pub fn has_legal_move(&self, color: Color) -> bool {
        !self.hand(color).is_empty() && !self.board.is_full()
    }

    /// Resolves a card identifier against the hand of `color`.
    ///
    /// A card that exists somewhere else in this game is an [`IllegalMove`],
    /// a card that doesn't exist at all is [`NotFound`].
    pub fn find_card(&self, color: Color, card_id: &str) -> Result<&Card, GameError> {
        let not_found = || NotFound::Card {
            card_id: String::from(card_id),
        };
        let card_id = CardId::new(card_id).map_err(|_| not_found())?;
        if let Some(card) = self.hand(color).iter().find(|c| *c.id() == card_id) {
            return Ok(card);
        }
        if self.player(color.other()).has_card(&card_id) || self.board.contains_card(&card_id) {
            return Err(IllegalMove::CardNotInHand { card_id }.into());
        }
        Err(not_found().into())
    }

    /// Places a card from the hand of `color`, resolves flips and passes the turn.
    ///
    /// Returns the number of flipped cards. On error, nothing is changed.
    pub fn play_card(
        &mut self,
        color: Color,
        card_id: &CardId,
        position: Coordinate,
    ) -> Result<usize, IllegalMove> {
        if self.phase != Phase::WaitingForMove {
            return Err(IllegalMove::WrongPhase { phase: self.phase });
        }
        if color != self.current {
            return Err(IllegalMove::NotYourTurn {
                color,
                current: self.current,
            });
        }
        let player = &self.players[color.idx()];
        let idx = player
            .position_in_hand(card_id)
            .ok_or_else(|| IllegalMove::CardNotInHand {
                card_id: card_id.clone(),
            })?;
        let illegal_card = |err| IllegalMove::IllegalCardPlayed {
            card_id: card_id.clone(),
            err,
        };
        // Validate before taking the card out of the hand
        self.board
            .calculate(&player.hand()[idx], position)
            .map_err(illegal_card)?;

        let card = self.players[color.idx()].take_card(idx);
        let flips = self
            .board
            .place_card(card, position, color)
            .map_err(illegal_card)?;
        debug!(%color, card = %card_id, %position, flips, "Card played");

        self.current = color.other();
        self.check_game_over();
        Ok(flips)
    }

    /// A read-only view for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        let can_move = self.phase == Phase::WaitingForMove;
        let mut cells = vec![Vec::with_capacity(self.board.cols()); self.board.rows()];
        for (pos, cell) in self.board.cells() {
            let view = match cell {
                Cell::Hole => CellView::Hole,
                Cell::Empty => CellView::Empty { playable: can_move },
                Cell::Occupied(card) => CellView::Card { card: card.clone() },
            };
            cells[pos.row].push(view);
        }
        GameSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells,
            red_hand: self.hand(Color::Red).to_vec(),
            blue_hand: self.hand(Color::Blue).to_vec(),
            red_score: self.score(Color::Red),
            blue_score: self.score(Color::Blue),
            phase: self.phase,
            current_player: self.current,
            outcome: self.outcome,
        }
    }

    /// The data needed to [restore](Self::restore) this game later.
    pub fn save(&self) -> SavedGame {
        let saved_player = |color| {
            let player = self.player(color);
            SavedPlayer {
                color,
                kind: player.kind(),
                hand: player.hand().to_vec(),
            }
        };
        SavedGame {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells: self.board.cells().map(|(_, cell)| cell.clone()).collect(),
            red: saved_player(Color::Red),
            blue: saved_player(Color::Blue),
            phase: self.phase,
            current_player: self.current,
        }
    }

    /// Rebuilds a game from [saved](Self::save) data, checking all invariants.
    pub fn restore(saved: SavedGame) -> Result<Self, IllegalConstruction> {
        let SavedGame {
            rows,
            cols,
            cells,
            red,
            blue,
            phase,
            current_player,
        } = saved;
        let board = Board::from_cells(rows, cols, cells)?;
        let red = Player::new(red.color, red.kind, red.hand)?;
        let blue = Player::new(blue.color, blue.kind, blue.hand)?;
        let mut game = Self::new(board, red, blue)?;
        game.current = current_player;
        match phase {
            Phase::Initialization => {
                if game.board.cards().next().is_some() {
                    return Err(IllegalConstruction::InconsistentState {
                        reason: String::from("cards on the board before the game started"),
                    });
                }
                if current_player != Color::Red {
                    return Err(IllegalConstruction::InconsistentState {
                        reason: String::from("red moves first"),
                    });
                }
            }
            Phase::WaitingForMove => {
                game.phase = Phase::WaitingForMove;
                if game.is_terminal() {
                    return Err(IllegalConstruction::InconsistentState {
                        reason: String::from("waiting for a move, but no move is possible"),
                    });
                }
            }
            Phase::GameOver => {
                if !game.is_terminal() {
                    return Err(IllegalConstruction::InconsistentState {
                        reason: String::from("game is over, but moves are still possible"),
                    });
                }
                game.phase = Phase::WaitingForMove;
                game.check_game_over();
            }
        }
        Ok(game)
    }

    fn is_terminal(&self) -> bool {
        !self.has_legal_move(self.current)
    }

    // Internal helper function to move to the game over phase if no move is possible.
    fn check_game_over(&mut self) {
        if self.phase != Phase::WaitingForMove || !self.is_terminal() {
            return;
        }
        let red = self.score(Color::Red);
        let blue = self.score(Color::Blue);
        let outcome = match red.cmp(&blue) {
            Ordering::Greater => Outcome::Winner(Color::Red),
            Ordering::Less => Outcome::Winner(Color::Blue),
            Ordering::Equal => Outcome::Draw,
        };
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
        info!(red, blue, %outcome, "Game over");
    }

    // Internal helper function to check that no card exists twice in the game.
    fn check_unique_cards(&self) -> Result<(), IllegalConstruction> {
        let mut seen = BTreeSet::new();
        let all_cards = self
            .players
            .iter()
            .flat_map(|p| p.hand())
            .chain(self.board.cards());
        for card in all_cards {
            if !seen.insert(card.id()) {
                return Err(IllegalConstruction::DuplicateCard {
                    card_id: card.id().clone(),
                });
            }
        }
        Ok(())
    }
}

impl GameView for Game {
    fn board(&self) -> &Board {
        &self.board
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_color(&self) -> Color {
        self.current
    }

    fn hand(&self, color: Color) -> &[Card] {
        self.players[color.idx()].hand()
    }

    fn score(&self, color: Color) -> usize {
        self.board.count_owned(color)
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn potential_flips(&self, card: &Card, position: Coordinate) -> usize {
        self.board.simulate_flips(card, position)
    }
}
