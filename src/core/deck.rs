use std::ops::Index;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, CardBitSet, DeckExhausted, Suit, Value};

/// An ordered pile of distinct cards. Cards are drawn off the front.
///
/// A deck is created for a single hand and thrown away afterwards. Code that
/// needs "the cards nobody can see" uses [`Deck::remaining`], which builds a
/// fresh collection rather than mutating a shared deck.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create the full 52 card deck in suit then value order.
    ///
    /// ```
    /// use holdem_bots::core::Deck;
    ///
    /// assert_eq!(52, Deck::new().len());
    /// ```
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::suits() {
            for v in Value::values() {
                cards.push(Card::new(v, s));
            }
        }
        Self { cards }
    }

    /// A uniformly random permutation of all 52 cards.
    pub fn new_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Use a pre-arranged order. The first card is the first one drawn.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// All 52 cards except `excluded`, as a new collection.
    ///
    /// ```
    /// use holdem_bots::core::{Card, Deck};
    ///
    /// let hole = [Card::try_from("As").unwrap(), Card::try_from("Ah").unwrap()];
    /// let rest = Deck::remaining(&hole);
    /// assert_eq!(50, rest.len());
    /// assert!(!rest.contains(&hole[0]));
    /// ```
    pub fn remaining(excluded: &[Card]) -> Vec<Card> {
        let excluded: CardBitSet = excluded.iter().copied().collect();
        (!excluded).iter().collect()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the next `n` cards.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        if n > self.cards.len() {
            return Err(DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Draw a single card.
    pub fn deal(&mut self) -> Result<Card, DeckExhausted> {
        if self.cards.is_empty() {
            return Err(DeckExhausted {
                requested: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }

    /// Take specific cards out of the deck. Returns false for any card that
    /// was not present.
    pub fn remove(&mut self, c: &Card) -> bool {
        match self.cards.iter().position(|x| x == c) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Deck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_has_every_card_once() {
        let d = Deck::new();
        let set: CardBitSet = d.iter().copied().collect();
        assert_eq!(52, set.count());
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let d = Deck::new_shuffled(&mut rng);
        assert_eq!(52, d.len());
        let set: CardBitSet = d.iter().copied().collect();
        assert_eq!(CardBitSet::default(), set);
        assert_ne!(Deck::new(), d);
    }

    #[test]
    fn test_shuffle_is_seedable() {
        let a = Deck::new_shuffled(&mut StdRng::seed_from_u64(7));
        let b = Deck::new_shuffled(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw() {
        let mut d = Deck::new();
        let first = d[0];
        let drawn = d.draw(3).unwrap();
        assert_eq!(3, drawn.len());
        assert_eq!(first, drawn[0]);
        assert_eq!(49, d.len());
        assert!(!d.contains(&first));
    }

    #[test]
    fn test_draw_exhausted() {
        let mut d = Deck::from_cards(vec![Card::try_from("As").unwrap()]);
        assert_eq!(
            Err(DeckExhausted {
                requested: 2,
                remaining: 1
            }),
            d.draw(2)
        );
        // A failed draw leaves the deck untouched.
        assert_eq!(1, d.len());
        assert!(d.deal().is_ok());
        assert!(d.deal().is_err());
    }

    #[test]
    fn test_remaining_does_not_touch_deck() {
        let d = Deck::new();
        let excluded = [d[0], d[10], d[20]];
        let rest = Deck::remaining(&excluded);
        assert_eq!(49, rest.len());
        assert_eq!(52, d.len());
        for c in excluded {
            assert!(!rest.contains(&c));
        }
    }

    #[test]
    fn test_remove() {
        let mut d = Deck::new();
        let c = Card::new(Value::Ace, Suit::Heart);
        assert!(d.contains(&c));
        assert!(d.remove(&c));
        assert!(!d.contains(&c));
        assert!(!d.remove(&c));
    }
}
