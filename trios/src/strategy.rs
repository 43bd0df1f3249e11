use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Card, Color, Coordinate, GameView, Phase};

/// A card to play, where to play it, and how many cards that would flip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub card: Card,
    pub position: Coordinate,
    pub flips: usize,
}

impl Move {
    pub fn new(card: Card, position: Coordinate, flips: usize) -> Self {
        Self {
            card,
            position,
            flips,
        }
    }
}

/// A move selection policy.
///
/// Strategies only get a read-only view of the game, so they can't change it.
pub trait Strategy {
    /// Returns `None` if the game is over or `color` has no possible move.
    fn choose_move(&mut self, view: &dyn GameView, color: Color) -> Option<Move>;
}

impl<F> Strategy for F
where
    F: FnMut(&dyn GameView, Color) -> Option<Move>,
{
    fn choose_move(&mut self, view: &dyn GameView, color: Color) -> Option<Move> {
        self(view, color)
    }
}

/// Every combination of a card in the hand of `color` and an empty cell.
///
/// The hand order is the outer loop, the row-major cell order the inner loop.
pub fn candidate_moves<'a>(
    view: &'a dyn GameView,
    color: Color,
) -> impl Iterator<Item = (&'a Card, Coordinate)> + 'a {
    let cells = view.board().empty_playable_cells();
    view.hand(color)
        .iter()
        .flat_map(move |card| cells.clone().into_iter().map(move |pos| (card, pos)))
}

/// Picks the move that flips the most cards.
///
/// Among moves with the same number of flips, the card with the higher mean
/// strength is preferred. If that is also equal, the first move in
/// [`candidate_moves()`] order wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFlips;

impl Strategy for MaxFlips {
    fn choose_move(&mut self, view: &dyn GameView, color: Color) -> Option<Move> {
        if view.phase() == Phase::GameOver {
            return None;
        }
        let mut best: Option<Move> = None;
        for (card, position) in candidate_moves(view, color) {
            let flips = view.potential_flips(card, position);
            let is_better = match &best {
                None => true,
                Some(best) => {
                    flips > best.flips
                        || (flips == best.flips && card.mean_strength() > best.card.mean_strength())
                }
            };
            if is_better {
                trace!(card = %card.id(), %position, flips, "New best move");
                best = Some(Move::new(card.clone(), position, flips));
            }
        }
        best
    }
}

/// Picks a uniformly random move.
#[derive(Clone, Debug)]
pub struct RandomMove {
    rng: StdRng,
}

impl RandomMove {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Strategy for RandomMove {
    fn choose_move(&mut self, view: &dyn GameView, color: Color) -> Option<Move> {
        if view.phase() == Phase::GameOver {
            return None;
        }
        let (card, position) = candidate_moves(view, color).choose(&mut self.rng)?;
        let flips = view.potential_flips(card, position);
        Some(Move::new(card.clone(), position, flips))
    }
}
