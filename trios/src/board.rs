mod coordinate;
mod direction_set;

use std::collections::BTreeSet;

pub use coordinate::*;
pub use direction_set::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Card, CardId, Color, Direction, IllegalCardPlayed, IllegalConstruction};

/// Which coordinates of a board exist and which of them are holes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub holes: BTreeSet<Coordinate>,
}

impl GridLayout {
    /// A layout without holes.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            holes: BTreeSet::new(),
        }
    }

    pub fn with_holes(rows: usize, cols: usize, holes: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            rows,
            cols,
            holes: holes.into_iter().collect(),
        }
    }
}

/// The content of a single cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell {
    /// Never playable.
    Hole,
    Empty,
    /// The card's owner is the owner of the cell.
    Occupied(Card),
}

/// Like [`Cell`], but without the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellState {
    Hole,
    Empty,
    Occupied,
}

impl Cell {
    pub fn state(&self) -> CellState {
        match self {
            Cell::Hole => CellState::Hole,
            Cell::Empty => CellState::Empty,
            Cell::Occupied(_) => CellState::Occupied,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Cell::Occupied(card) => Some(card),
            _ => None,
        }
    }
}

/// A fixed-size grid of cells.
///
/// Cells only ever change from empty to occupied, and the owner of an occupied
/// cell only changes through flips. Nothing is ever removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// In row-major order, i.e. indexed by `[row * cols + col]`.
    cells: Vec<Cell>,
}

/// The effects that placing a card would have, without placing it.
pub struct PlacementCalculation<'a> {
    /// This struct ties together the board and its diff, to prevent any possible mixups
    board: &'a Board,
    position: Coordinate,
    /// The neighbors that would change their owner.
    pub flipped: DirectionSet,
}

impl Board {
    /// Creates a board where every cell that is not a hole is empty.
    pub fn new(layout: &GridLayout) -> Result<Self, IllegalConstruction> {
        let GridLayout { rows, cols, holes } = layout;
        let (rows, cols) = (*rows, *cols);
        let mut cells = vec![Cell::Empty; num_cells(rows, cols)?];
        for &position in holes {
            if position.row >= rows || position.col >= cols {
                return Err(IllegalConstruction::HoleOutOfBounds { position });
            }
            cells[position.row * cols + position.col] = Cell::Hole;
        }
        Ok(Self { rows, cols, cells })
    }

    /// Creates a board from a list of cells in row-major order, e.g. when
    /// restoring a saved game.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, IllegalConstruction> {
        let expected = num_cells(rows, cols)?;
        if cells.len() != expected {
            return Err(IllegalConstruction::WrongCellCount {
                expected,
                found: cells.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for card in cells.iter().filter_map(Cell::card) {
            if !seen.insert(card.id()) {
                return Err(IllegalConstruction::DuplicateCard {
                    card_id: card.id().clone(),
                });
            }
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The layout this board was built from.
    pub fn layout(&self) -> GridLayout {
        GridLayout {
            rows: self.rows,
            cols: self.cols,
            holes: self
                .cells()
                .filter(|(_, cell)| cell.state() == CellState::Hole)
                .map(|(pos, _)| pos)
                .collect(),
        }
    }

    pub fn is_in_bounds(&self, position: Coordinate) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    fn idx(&self, position: Coordinate) -> Option<usize> {
        self.is_in_bounds(position)
            .then(|| position.row * self.cols + position.col)
    }

    pub fn cell_at(&self, position: Coordinate) -> Option<&Cell> {
        self.idx(position).map(|idx| &self.cells[idx])
    }

    /// Returns `None` if the position is out of bounds.
    pub fn cell_state_at(&self, position: Coordinate) -> Option<CellState> {
        self.cell_at(position).map(Cell::state)
    }

    pub fn card_at(&self, position: Coordinate) -> Option<&Card> {
        self.cell_at(position).and_then(Cell::card)
    }

    /// All cells with their coordinates, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (Coordinate::new(idx / self.cols, idx % self.cols), cell)
        })
    }

    /// All cards on the board.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cells.iter().filter_map(Cell::card)
    }

    pub fn contains_card(&self, card_id: &CardId) -> bool {
        self.cards().any(|card| card.id() == card_id)
    }

    /// True iff the position is within bounds and the cell is empty.
    pub fn can_place_card(&self, position: Coordinate) -> bool {
        self.cell_state_at(position) == Some(CellState::Empty)
    }

    /// The empty cells, in row-major order.
    pub fn empty_playable_cells(&self) -> Vec<Coordinate> {
        self.cells()
            .filter(|(_, cell)| cell.state() == CellState::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn num_playable_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.state() != CellState::Hole).count()
    }

    /// True iff there is no empty cell left.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.state() != CellState::Empty)
    }

    /// The number of cards on the board owned by `color`.
    pub fn count_owned(&self, color: Color) -> usize {
        self.cards().filter(|card| card.owner() == color).count()
    }

    /// Calculate placing a card and return the effects that this would have.
    ///
    /// The card is assumed to be placed by its current owner. Nothing is changed.
    pub fn calculate(
        &self,
        card: &Card,
        position: Coordinate,
    ) -> Result<PlacementCalculation<'_>, IllegalCardPlayed> {
        self.check_placeable(position)?;
        Ok(PlacementCalculation {
            board: self,
            position,
            flipped: self.flippable_neighbors(card, position, card.owner()),
        })
    }

    /// How many cards would flip if `card` was placed at `position` by its owner.
    ///
    /// This never changes the board or the card. Positions where no card can
    /// be placed yield 0.
    pub fn simulate_flips(&self, card: &Card, position: Coordinate) -> usize {
        self.calculate(card, position)
            .map(|calc| calc.num_flipped())
            .unwrap_or(0)
    }

    /// Places `card` for `color` and flips the neighbors it beats.
    ///
    /// Returns the number of flipped cards. On error, nothing is changed.
    pub fn place_card(
        &mut self,
        mut card: Card,
        position: Coordinate,
        color: Color,
    ) -> Result<usize, IllegalCardPlayed> {
        let idx = self.check_placeable(position)?;
        card.set_owner(color);
        debug!(card = %card.id(), %position, %color, "Placing card");
        self.cells[idx] = Cell::Occupied(card);
        Ok(self.resolve_flips(position, color))
    }

    /// Flips every orthogonal neighbor of the card at `position` whose facing
    /// strength is strictly lower than that of the card at `position`.
    ///
    /// This is a single pass; flipped cards do not flip their own neighbors.
    /// Cards already owned by `placing_color` are not counted. Returns the
    /// number of flipped cards.
    pub fn resolve_flips(&mut self, position: Coordinate, placing_color: Color) -> usize {
        let Some(card) = self.card_at(position) else {
            return 0;
        };
        let flipped = self.flippable_neighbors(card, position, placing_color);
        if flipped.is_empty() {
            return 0;
        }
        for dir in flipped {
            // Can't fail, flippable_neighbors() only returns occupied in-bounds neighbors
            if let Some(Cell::Occupied(neighbor)) = position
                .neighbor(dir)
                .and_then(|pos| self.idx(pos))
                .map(|idx| &mut self.cells[idx])
            {
                debug!(card = %neighbor.id(), from = %neighbor.owner(), to = %placing_color, "Flipping card");
                neighbor.set_owner(placing_color);
            }
        }
        flipped.len()
    }

    // Internal helper function to check that a card can be placed, returns the cell index.
    fn check_placeable(&self, position: Coordinate) -> Result<usize, IllegalCardPlayed> {
        let idx = self
            .idx(position)
            .ok_or(IllegalCardPlayed::OutOfBounds { position })?;
        match &self.cells[idx] {
            Cell::Empty => Ok(idx),
            Cell::Hole => Err(IllegalCardPlayed::Hole { position }),
            Cell::Occupied(existing) => Err(IllegalCardPlayed::Occupied {
                position,
                existing_card: existing.id().clone(),
            }),
        }
    }

    // Internal helper function shared by the real and the hypothetical flip.
    fn flippable_neighbors(&self, card: &Card, position: Coordinate, color: Color) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|&dir| {
                let Some(neighbor) = position
                    .neighbor(dir)
                    .and_then(|pos| self.card_at(pos))
                else {
                    return false;
                };
                neighbor.owner() != color && card.value(dir) > neighbor.value(dir.opposite())
            })
            .collect()
    }
}

// Internal helper function to validate board dimensions.
fn num_cells(rows: usize, cols: usize) -> Result<usize, IllegalConstruction> {
    if rows == 0 || cols == 0 {
        return Err(IllegalConstruction::ZeroDimension { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(IllegalConstruction::TooManyCells { rows, cols })
}

impl<'a> PlacementCalculation<'a> {
    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn num_flipped(&self) -> usize {
        self.flipped.len()
    }

    /// The cards that would change their owner.
    pub fn flipped_cards(&self) -> impl Iterator<Item = &'a Card> + 'a {
        let board = self.board;
        let position = self.position;
        self.flipped
            .into_iter()
            .filter_map(move |dir| position.neighbor(dir).and_then(|pos| board.card_at(pos)))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::visualize_board(self))
    }
}
