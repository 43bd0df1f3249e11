use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context};
use trios::{Card, Coordinate, GridLayout};

/// Parses a grid file.
///
/// The first line is `ROWS COLS`, followed by one line per row with one
/// character per cell: `X` for a hole and `C` for a cell that takes a card.
pub fn parse_grid(text: &str) -> anyhow::Result<GridLayout> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line.trim_end()));
    let Some((_, header)) = lines.next() else {
        bail!("Grid is empty");
    };
    let dims: Vec<&str> = header.split_whitespace().collect();
    let &[rows, cols] = dims.as_slice() else {
        bail!("Line 1: expected 'ROWS COLS', found '{}'", header);
    };
    let rows: usize = rows.parse().with_context(|| format!("Line 1: invalid number of rows '{}'", rows))?;
    let cols: usize = cols.parse().with_context(|| format!("Line 1: invalid number of columns '{}'", cols))?;

    let mut holes = Vec::new();
    for row in 0..rows {
        let Some((line_num, line)) = lines.next() else {
            bail!("Expected {} rows, found {}", rows, row);
        };
        if line.chars().count() != cols {
            bail!("Line {}: expected {} cells, found {}", line_num, cols, line.chars().count());
        }
        for (col, c) in line.chars().enumerate() {
            match c {
                'X' => holes.push(Coordinate::new(row, col)),
                'C' => {}
                _ => bail!("Line {}: invalid cell '{}', expected 'X' or 'C'", line_num, c),
            }
        }
    }
    if let Some((line_num, _)) = lines.find(|(_, line)| !line.is_empty()) {
        bail!("Line {}: more rows than the {} announced", line_num, rows);
    }
    Ok(GridLayout::with_holes(rows, cols, holes))
}

/// Parses a card file with one `NAME N E S W` card per line.
///
/// Blank lines are skipped. Card names must be unique.
pub fn parse_cards(text: &str) -> anyhow::Result<Vec<Card>> {
    let mut cards = Vec::new();
    let mut names = BTreeSet::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let card: Card = line.parse().with_context(|| format!("Line {}: invalid card '{}'", i + 1, line))?;
        if !names.insert(card.id().clone()) {
            bail!("Line {}: card {} appears more than once", i + 1, card.id());
        }
        cards.push(card);
    }
    Ok(cards)
}

pub fn load_grid(path: &Path) -> anyhow::Result<GridLayout> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read grid file '{}'", path.display()))?;
    parse_grid(&text).with_context(|| format!("Invalid grid file '{}'", path.display()))
}

pub fn load_cards(path: &Path) -> anyhow::Result<Vec<Card>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read card file '{}'", path.display()))?;
    parse_cards(&text).with_context(|| format!("Invalid card file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use trios::{Board, Direction};

    use super::*;

    #[test]
    fn grid_with_holes() {
        let layout = parse_grid("2 3\nCXC\nCCX\n").unwrap();
        assert_eq!(
            layout,
            GridLayout::with_holes(2, 3, [Coordinate::new(0, 1), Coordinate::new(1, 2)])
        );
        assert_eq!(Board::new(&layout).unwrap().num_playable_cells(), 4);
    }

    #[test]
    fn grid_errors_name_the_line() {
        let err = parse_grid("2 3\nCXC\nCC\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 3: expected 3 cells, found 2");
        let err = parse_grid("1 2\nCY").unwrap_err();
        assert_eq!(err.to_string(), "Line 2: invalid cell 'Y', expected 'X' or 'C'");
        let err = parse_grid("2 2\nCC").unwrap_err();
        assert_eq!(err.to_string(), "Expected 2 rows, found 1");
        let err = parse_grid("1 1\nC\nC").unwrap_err();
        assert_eq!(err.to_string(), "Line 3: more rows than the 1 announced");
        assert!(parse_grid("three 3\n").is_err());
        assert!(parse_grid("").is_err());
    }

    #[test]
    fn cards_with_ace() {
        let cards = parse_cards("CorruptKing 7 3 9 A\n\nAngryDragon 2 8 9 9\n").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id().as_str(), "CorruptKing");
        assert_eq!(cards[0].value(Direction::West).value(), 10);
        assert_eq!(cards[1].value(Direction::East).value(), 8);
    }

    #[test]
    fn card_errors_name_the_line() {
        let err = parse_cards("Good 1 2 3 4\nBad 1 2 3\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 2: invalid card 'Bad 1 2 3'");
        let err = parse_cards("Twice 1 2 3 4\nTwice 4 3 2 1\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 2: card Twice appears more than once");
        assert!(parse_cards("Strong B 1 1 1").is_err());
    }
}
