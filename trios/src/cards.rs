use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Color, IllegalConstruction};

/// One of the four sides of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the order used for iteration everywhere in this crate.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The side of a neighboring card that faces this side.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Row and column offset of the neighbor in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

/// The value printed on one side of a card.
///
/// Valid values are `0..=10`. In text form, `A` stands for 10.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Strength(u8);

impl Strength {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, IllegalConstruction> {
        if value > Self::MAX {
            return Err(IllegalConstruction::StrengthOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Strength {
    type Error = IllegalConstruction;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strength> for u8 {
    fn from(strength: Strength) -> u8 {
        strength.0
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == Self::MAX {
            write!(f, "A")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The identifier of a card, unique within one game.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Result<Self, IllegalConstruction> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IllegalConstruction::EmptyCardId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardId {
    type Error = IllegalConstruction;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> String {
        id.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card with a strength on each of its four sides.
///
/// The identifier and strengths never change after construction. The owner is
/// set when the card is dealt into a hand, and afterwards only changed by the
/// [`Board`](crate::Board) when the card is placed or flipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    /// Indexed by [`Direction`], i.e. north, east, south, west.
    strengths: [Strength; 4],
    owner: Color,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [n, e, s, w] = self.strengths;
        write!(f, "{} {} {} {} {}", self.id, n, e, s, w)
    }
}

impl Card {
    /// Creates a card owned by red. Dealing a card into a hand reassigns the owner.
    pub fn new(id: CardId, north: Strength, east: Strength, south: Strength, west: Strength) -> Self {
        Self {
            id,
            strengths: [north, east, south, west],
            owner: Color::Red,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn value(&self, direction: Direction) -> Strength {
        self.strengths[direction as usize]
    }

    pub fn owner(&self) -> Color {
        self.owner
    }

    /// The arithmetic mean of the four strengths.
    pub fn mean_strength(&self) -> f64 {
        let sum: u32 = self.strengths.iter().map(|s| u32::from(s.value())).sum();
        f64::from(sum) / 4.0
    }

    pub(crate) fn set_owner(&mut self, owner: Color) {
        self.owner = owner;
    }

    /// Returns the same card, owned by `owner`.
    #[must_use]
    pub fn with_owner(mut self, owner: Color) -> Self {
        self.owner = owner;
        self
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    WrongNumberOfFields { found: usize },
    InvalidStrength { token: String },
    IllegalCard(IllegalConstruction),
}

impl std::error::Error for CardFromStrErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardFromStrErr::IllegalCard(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::WrongNumberOfFields { found } => write!(
                f,
                "Expected a name and four strengths separated by spaces, found {} fields",
                found
            ),
            CardFromStrErr::InvalidStrength { token } => {
                write!(f, "Invalid strength '{}', expected 0-9 or A", token)
            }
            CardFromStrErr::IllegalCard(_) => write!(f, "Illegal card"),
        }
    }
}

impl FromStr for Strength {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardFromStrErr::InvalidStrength {
            token: String::from(s),
        };
        let value = match s {
            "A" => Self::MAX,
            _ => s.parse::<u8>().map_err(|_| invalid())?,
        };
        Strength::new(value).map_err(|_| invalid())
    }
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    /// Parses a card in the form `NAME N E S W`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let &[name, north, east, south, west] = tokens.as_slice() else {
            return Err(CardFromStrErr::WrongNumberOfFields {
                found: tokens.len(),
            });
        };
        let id = CardId::new(name).map_err(CardFromStrErr::IllegalCard)?;
        Ok(Card::new(
            id,
            north.parse()?,
            east.parse()?,
            south.parse()?,
            west.parse()?,
        ))
    }
}

/// Shorthand for creating cards from a `NAME N E S W` string.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use trios::{card, Direction};
/// let dragon = card!("Dragon 9 A 1 5");
/// assert_eq!(dragon.value(Direction::East).value(), 10);
/// ```
#[macro_export]
macro_rules! card {
    ($s:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($s)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn parse_card_with_ace() {
        let c = card!("Wyvern A 3 7 1");
        assert_eq!(c.id().as_str(), "Wyvern");
        assert_eq!(c.value(Direction::North).value(), 10);
        assert_eq!(c.value(Direction::East).value(), 3);
        assert_eq!(c.value(Direction::South).value(), 7);
        assert_eq!(c.value(Direction::West).value(), 1);
        assert_eq!(c.mean_strength(), 5.25);
        assert_eq!(c.to_string(), "Wyvern A 3 7 1");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "Wyvern 1 2 3".parse::<Card>(),
            Err(CardFromStrErr::WrongNumberOfFields { found: 4 })
        );
        assert_eq!(
            "Wyvern 1 2 3 B".parse::<Card>(),
            Err(CardFromStrErr::InvalidStrength {
                token: String::from("B")
            })
        );
        assert!("Wyvern 1 2 3 11".parse::<Card>().is_err());
    }

    #[test]
    fn strength_range() {
        assert!(Strength::new(10).is_ok());
        assert_eq!(
            Strength::new(11),
            Err(IllegalConstruction::StrengthOutOfRange { value: 11 })
        );
        assert!(serde_json::from_str::<Strength>("12").is_err());
    }

    #[test]
    fn empty_card_id_is_rejected() {
        assert_eq!(CardId::new("  "), Err(IllegalConstruction::EmptyCardId));
        assert!(serde_json::from_str::<CardId>("\"\"").is_err());
    }
}
