use std::ops::BitAnd;

use super::{Card, CardBitSet, CardBitSetIter, InputError, Suit, Value};

/// A small set of distinct cards, such as hole cards plus a board.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
pub struct Hand(CardBitSet);

impl Hand {
    /// Create a new empty hand
    ///
    /// ```
    /// use holdem_bots::core::Hand;
    ///
    /// let hand = Hand::new();
    ///
    /// assert!(hand.is_empty());
    /// ```
    pub fn new() -> Self {
        Self(CardBitSet::new())
    }

    /// Build a hand from cards, rejecting duplicates.
    pub fn new_with_cards(cards: &[Card]) -> Result<Self, InputError> {
        CardBitSet::from_unique(cards).map(Self)
    }

    /// Parse a run of two character cards such as `"AsKd5h"`.
    ///
    /// ```
    /// use holdem_bots::core::{Card, Hand, InputError};
    ///
    /// let hand = Hand::new_from_str("AsKd5h").unwrap();
    /// assert_eq!(3, hand.count());
    /// assert!(hand.contains(&Card::try_from("Kd").unwrap()));
    ///
    /// assert!(matches!(
    ///     Hand::new_from_str("AsAs"),
    ///     Err(InputError::DuplicateCard(_))
    /// ));
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, InputError> {
        let mut chars = hand_string.chars();
        let mut bitset = CardBitSet::new();

        while let Some(vc) = chars.next() {
            let v = Value::from_char(vc).ok_or(InputError::UnexpectedValueChar)?;
            let s = chars
                .next()
                .ok_or(InputError::TooFewChars)
                .and_then(|sc| Suit::from_char(sc).ok_or(InputError::UnexpectedSuitChar))?;
            let c = Card::new(v, s);
            if bitset.contains(c) {
                return Err(InputError::DuplicateCard(c));
            }
            bitset.insert(c);
        }

        Ok(Self(bitset))
    }

    /// Given a card, is it in the current hand?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// Insert a card. Returns false if it was already there.
    pub fn insert(&mut self, c: Card) -> bool {
        let contains = self.contains(&c);
        self.0.insert(c);
        !contains
    }

    /// Remove a card from the hand
    pub fn remove(&mut self, c: &Card) -> bool {
        let contains = self.contains(c);
        self.0.remove(*c);
        contains
    }

    pub fn count(&self) -> usize {
        self.0.count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> CardBitSetIter {
        self.0.iter()
    }

    /// The cards as a vector, in index order.
    pub fn cards(&self) -> Vec<Card> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl BitAnd for Hand {
    type Output = Hand;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl From<Hand> for CardBitSet {
    fn from(val: Hand) -> Self {
        val.0
    }
}
