use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, Not};

use super::{Card, InputError};

/// This struct is a bitset for cards
/// Each card is represented by a bit in a 64 bit integer
///
/// The bit is set if the card present
/// The bit is unset if the card not in the set
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    // The bitset
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

impl CardBitSet {
    /// Create a new empty bitset
    ///
    /// ```
    /// use holdem_bots::core::CardBitSet;
    /// let cards = CardBitSet::new();
    /// assert!(cards.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { cards: 0 }
    }

    /// Build a set from a slice, failing on the first card seen twice.
    ///
    /// ```
    /// use holdem_bots::core::{Card, CardBitSet, InputError};
    ///
    /// let a = Card::try_from("As").unwrap();
    /// let k = Card::try_from("Kd").unwrap();
    /// assert_eq!(2, CardBitSet::from_unique(&[a, k]).unwrap().count());
    /// assert_eq!(
    ///     Err(InputError::DuplicateCard(a)),
    ///     CardBitSet::from_unique(&[a, k, a])
    /// );
    /// ```
    pub fn from_unique(cards: &[Card]) -> Result<Self, InputError> {
        let mut set = Self::new();
        for &c in cards {
            if set.contains(c) {
                return Err(InputError::DuplicateCard(c));
            }
            set.insert(c);
        }
        Ok(set)
    }

    /// Insert a card into the bitset
    pub fn insert(&mut self, card: Card) {
        self.cards |= 1 << u8::from(card);
    }

    /// Remove a card from the bitset
    pub fn remove(&mut self, card: Card) {
        self.cards &= !(1 << u8::from(card));
    }

    /// Is the card in the bitset ?
    pub fn contains(&self, card: Card) -> bool {
        (self.cards & (1 << u8::from(card))) != 0
    }

    /// Is the bitset empty ?
    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// How many cards are in the bitset ?
    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.cards = 0;
    }

    pub fn iter(&self) -> CardBitSetIter {
        CardBitSetIter { cards: self.cards }
    }
}

impl Default for CardBitSet {
    /// Create a new bitset with all the cards in it
    /// ```
    /// use holdem_bots::core::CardBitSet;
    ///
    /// let cards = CardBitSet::default();
    ///
    /// assert_eq!(52, cards.count());
    /// assert!(!cards.is_empty());
    /// ```
    fn default() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            cards: self.cards & rhs.cards,
        }
    }
}

/// Complement within the 52 card universe.
impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            cards: !self.cards & FIFTY_TWO_ONES,
        }
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = Self::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// Iterates the cards in index order.
pub struct CardBitSetIter {
    cards: u64,
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cards == 0 {
            return None;
        }
        let idx = self.cards.trailing_zeros();
        self.cards &= !(1 << idx);
        Some(Card::from(idx as u8))
    }
}

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
