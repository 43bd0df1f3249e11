use quickcheck::{Arbitrary, Gen};

use crate::{Board, Card, CardId, Cell, Color, Coordinate, Game, Player, PlayerKind, Strength};

fn small(g: &mut Gen, max: usize) -> usize {
    usize::arbitrary(g) % max
}

fn arbitrary_card(g: &mut Gen, id: String) -> Card {
    let mut strength = || Strength::new(u8::arbitrary(g) % (Strength::MAX + 1)).unwrap();
    let card = Card::new(CardId::new(id).unwrap(), strength(), strength(), strength(), strength());
    card.with_owner(Color::arbitrary(g))
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Color::ALL).unwrap()
    }
}

/// A board with some holes and some cards of both colors, plus a card to
/// place somewhere on or slightly outside of it.
#[derive(Clone, Debug)]
pub struct BoardWithCard {
    pub board: Board,
    pub card: Card,
    pub position: Coordinate,
}

impl Arbitrary for BoardWithCard {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = 1 + small(g, 4);
        let cols = 1 + small(g, 4);
        let cells = (0..rows * cols)
            .map(|i| match small(g, 4) {
                0 => Cell::Hole,
                1 => Cell::Empty,
                _ => Cell::Occupied(arbitrary_card(g, format!("P{}", i))),
            })
            .collect();
        let board = Board::from_cells(rows, cols, cells).unwrap();
        let card = arbitrary_card(g, String::from("New"));
        // Sometimes out of bounds
        let position = Coordinate::new(small(g, rows + 1), small(g, cols + 1));
        BoardWithCard {
            board,
            card,
            position,
        }
    }
}

/// A started game where the current player can move.
///
/// Both hands are dealt like a real game, and a few moves have already
/// been played.
#[derive(Clone, Debug)]
pub struct GameSetup {
    pub game: Game,
}

impl Arbitrary for GameSetup {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = 1 + small(g, 4);
        let cols = 1 + small(g, 4);
        let mut cells: Vec<Cell> = (0..rows * cols)
            .map(|_| if small(g, 5) == 0 { Cell::Hole } else { Cell::Empty })
            .collect();
        // At least one cell to play on
        cells[small(g, rows * cols)] = Cell::Empty;
        let board = Board::from_cells(rows, cols, cells).unwrap();

        let num_playable_cells = board.num_playable_cells();
        let hand_size = (num_playable_cells + 1) / 2;
        let hand = |g: &mut Gen, prefix: &str| -> Vec<Card> {
            (0..hand_size)
                .map(|i| arbitrary_card(g, format!("{}{}", prefix, i)))
                .collect()
        };
        let red = Player::new(Color::Red, PlayerKind::Ai, hand(g, "R")).unwrap();
        let blue = Player::new(Color::Blue, PlayerKind::Ai, hand(g, "B")).unwrap();
        let mut game = Game::new(board, red, blue).unwrap();
        game.start().unwrap();

        // The board is only full after all cells are taken, so this leaves one
        for _ in 0..small(g, num_playable_cells) {
            let color = game.current_color();
            let card_id = g.choose(game.hand(color)).unwrap().id().clone();
            let position = *g.choose(&game.board().empty_playable_cells()).unwrap();
            game.play_card(color, &card_id, position).unwrap();
        }
        GameSetup { game }
    }
}
