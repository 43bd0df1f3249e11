use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use crate::{Card, CardId, Color, IllegalConstruction, PlayerKind};

/// The state of a single player during one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    color: Color,
    kind: PlayerKind,
    /// In the order the cards were dealt.
    hand: Vec<Card>,
}

impl Player {
    /// Creates a player and makes them the owner of every card in `hand`.
    pub fn new(color: Color, kind: PlayerKind, hand: Vec<Card>) -> Result<Self, IllegalConstruction> {
        let mut seen = BTreeSet::new();
        for card in &hand {
            if !seen.insert(card.id()) {
                return Err(IllegalConstruction::DuplicateCard {
                    card_id: card.id().clone(),
                });
            }
        }
        let hand = hand.into_iter().map(|card| card.with_owner(color)).collect();
        Ok(Self { color, kind, hand })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Whether this player's moves are chosen by a [`Strategy`](crate::Strategy).
    pub fn is_ai(&self) -> bool {
        self.kind == PlayerKind::Ai
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn position_in_hand(&self, card_id: &CardId) -> Option<usize> {
        self.hand.iter().position(|card| card.id() == card_id)
    }

    pub fn has_card(&self, card_id: &CardId) -> bool {
        self.position_in_hand(card_id).is_some()
    }

    pub(crate) fn take_card(&mut self, idx: usize) -> Card {
        self.hand.remove(idx)
    }
}

/// Splits a card set into the two hands for a board with `num_playable_cells` cells.
///
/// Each player gets `(num_playable_cells + 1) / 2` cards, dealt alternately
/// starting with red. This needs at least `num_playable_cells + 1` cards, so
/// that both hands have the same size. Remaining cards are not used.
///
/// If an RNG is given, the cards are shuffled first.
pub fn deal(
    mut cards: Vec<Card>,
    num_playable_cells: usize,
    rng: Option<&mut StdRng>,
) -> Result<[Vec<Card>; 2], IllegalConstruction> {
    let needed = num_playable_cells + 1;
    if cards.len() < needed {
        return Err(IllegalConstruction::NotEnoughCards {
            needed,
            found: cards.len(),
        });
    }
    if let Some(rng) = rng {
        cards.shuffle(rng);
    }
    let hand_size = needed / 2;
    let mut hands = [Vec::with_capacity(hand_size), Vec::with_capacity(hand_size)];
    for (i, card) in cards.into_iter().take(2 * hand_size).enumerate() {
        hands[i % 2].push(card);
    }
    Ok(hands)
}
