use crate::{Board, Cell, Color};

/// Draws the board as a box of characters, one per cell.
///
/// Holes are `X`, empty cells `.`, and cards are shown as the initial of
/// their owner.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("    ");
    for col in 0..board.cols() {
        result += &format!("{:<2}", col % 10);
    }
    // Draw the top of the box
    result += "\n   ╭";
    for _ in 0..board.cols() {
        result += "──";
    }
    result += "╮";

    for (pos, cell) in board.cells() {
        if pos.col == 0 {
            result += &format!("\n{:>2} │", pos.row);
        }
        result += match cell {
            Cell::Hole => "X ",
            Cell::Empty => ". ",
            Cell::Occupied(card) => match card.owner() {
                Color::Red => "R ",
                Color::Blue => "B ",
            },
        };
        if pos.col + 1 == board.cols() {
            result += "│";
        }
    }
    // Draw the bottom of the box
    result += "\n   ╰";
    for _ in 0..board.cols() {
        result += "──";
    }
    result += "╯";
    result
}
