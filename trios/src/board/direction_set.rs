use std::iter::FusedIterator;

use crate::Direction;

/// A compact set of [`Direction`]s.
///
/// Used to describe which neighbors of a placed card flip.
///
/// Note that its "mutating" methods return a new object instead of really mutating.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet {
    // Only the low 4 bits are used.
    bits: u8,
}

impl DirectionSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.bits & (1u8 << direction as u8) != 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, direction: Direction) -> Self {
        Self {
            bits: self.bits | (1u8 << direction as u8),
        }
    }
}

impl std::fmt::Debug for DirectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter()
            .fold(DirectionSet::new(), |set, dir| set.insert(dir))
    }
}

impl IntoIterator for DirectionSet {
    type Item = Direction;
    type IntoIter = DirectionSetIter;

    fn into_iter(self) -> Self::IntoIter {
        DirectionSetIter { set: self, idx: 0 }
    }
}

/// Yields the directions in [`Direction::ALL`] order.
pub struct DirectionSetIter {
    set: DirectionSet,
    idx: usize,
}

impl Iterator for DirectionSetIter {
    type Item = Direction;

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < Direction::ALL.len() {
            let dir = Direction::ALL[self.idx];
            self.idx += 1;
            if self.set.contains(dir) {
                return Some(dir);
            }
        }
        None
    }
}

impl FusedIterator for DirectionSetIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_iterate() {
        let set = DirectionSet::new()
            .insert(Direction::West)
            .insert(Direction::North)
            .insert(Direction::West);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Direction::North));
        assert!(!set.contains(Direction::South));
        assert_eq!(
            Vec::from_iter(set),
            vec![Direction::North, Direction::West]
        );
    }

    #[test]
    fn empty_set() {
        let set = DirectionSet::default();
        assert!(set.is_empty());
        assert_eq!(set, DirectionSet::new());
        assert!(!set.insert(Direction::East).is_empty());
    }
}
