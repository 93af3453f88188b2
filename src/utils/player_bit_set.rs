use std::ops::{BitAnd, BitOr};

/// Seats a `PlayerBitSet` can hold.
pub const MAX_PLAYERS: usize = 16;

/// A set of seat indices. Supports up to `MAX_PLAYERS` seats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerBitSet {
    set: u16,
}

impl PlayerBitSet {
    /// A set with seats `0..players` enabled.
    pub fn new(players: usize) -> Self {
        let set = ((1u32 << players) - 1) as u16;
        Self { set }
    }
    pub fn count(&self) -> usize {
        self.set.count_ones() as usize
    }
    pub fn empty(&self) -> bool {
        self.set == 0
    }
    pub fn enable(&mut self, idx: usize) {
        self.set |= 1 << idx;
    }
    pub fn disable(&mut self, idx: usize) {
        self.set &= !(1 << idx);
    }
    pub fn get(&self, idx: usize) -> bool {
        (self.set & (1 << idx)) != 0
    }
    pub fn ones(self) -> ActivePlayerBitSetIter {
        ActivePlayerBitSetIter { set: self.set }
    }
    /// First enabled seat strictly after `idx`, wrapping around a table of
    /// `num_players` seats. Returns `idx` itself only if it's the sole member.
    pub fn next_after(&self, idx: usize, num_players: usize) -> Option<usize> {
        (1..=num_players)
            .map(|offset| (idx + offset) % num_players)
            .find(|i| self.get(*i))
    }
}

impl BitOr for PlayerBitSet {
    type Output = PlayerBitSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            set: self.set | rhs.set,
        }
    }
}

impl BitAnd for PlayerBitSet {
    type Output = PlayerBitSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            set: self.set & rhs.set,
        }
    }
}

impl FromIterator<usize> for PlayerBitSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut s = Self::default();
        for idx in iter {
            s.enable(idx);
        }
        s
    }
}

pub struct ActivePlayerBitSetIter {
    set: u16,
}

impl Iterator for ActivePlayerBitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set == 0 {
            None
        } else {
            // Find the index of the first non-zero
            let idx = self.set.trailing_zeros() as usize;
            // Then set the first non-zero to zero
            self.set &= !(1 << idx);
            // Then emit the next one
            Some(idx)
        }
    }
}
