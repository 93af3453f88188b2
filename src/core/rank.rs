use std::cmp::Ordering;
use std::fmt;

use super::{Card, CardBitSet, Hand, InputError, Value};

/// All the different possible hand categories, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// The lowest rank.
    /// No matches
    HighCard = 0,
    /// One Card matches another.
    OnePair = 1,
    /// Two diffent pair of matching cards.
    TwoPair = 2,
    /// Three of the same value.
    ThreeOfAKind = 3,
    /// Five cards in a sequence
    Straight = 4,
    /// Five cards of the same suit
    Flush = 5,
    /// Three of one value and two of another value
    FullHouse = 6,
    /// Four of the same value.
    FourOfAKind = 7,
    /// Five cards in a sequence all fo the same suit.
    StraightFlush = 8,
    /// Ten through ace of one suit.
    RoyalFlush = 9,
}

impl Category {
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        };
        f.write_str(name)
    }
}

/// The value of the best five card hand.
///
/// Ordering compares the category first and then the tiebreak
/// lexicographically. `tiebreak` holds face magnitudes (2 through 14)
/// grouped by multiplicity and then by value, both descending, and is padded
/// with zeros. Straights list their five ranks with the ace counted as 1 in
/// the wheel.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatedHand {
    pub category: Category,
    pub tiebreak: [u8; 5],
}

impl EvaluatedHand {
    /// A normalized strength in `[0, 1]`: the category index refined by the
    /// tiebreak, so a better hand never maps lower.
    pub fn strength(&self) -> f64 {
        let mut frac = 0.0;
        let mut scale = 1.0;
        for &v in &self.tiebreak {
            scale /= 15.0;
            frac += f64::from(v) * scale;
        }
        ((self.category.index() as f64 + 1.0 + frac) / 10.0).min(1.0)
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreak)
    }
}

const WHEEL: u16 = 1 << (Value::Ace as u16)
    | 1 << (Value::Two as u16)
    | 1 << (Value::Three as u16)
    | 1 << (Value::Four as u16)
    | 1 << (Value::Five as u16);

/// Given a bitset of exactly five distinct values, return the magnitude of
/// the straight's top card, if it is one.
fn straight_high(value_set: u16) -> Option<u8> {
    if value_set == WHEEL {
        return Some(5);
    }
    let low = value_set.trailing_zeros();
    if value_set >> low == 0b1_1111 {
        // low is the index of the lowest card, so the top index is low + 4.
        Some(low as u8 + 4 + 2)
    } else {
        None
    }
}

/// Rank exactly five cards.
fn rank_five(cards: [Card; 5]) -> EvaluatedHand {
    let mut counts = [0u8; 13];
    let mut value_set: u16 = 0;
    let first_suit = cards[0].suit;
    let mut is_flush = true;
    for c in &cards {
        counts[c.value as usize] += 1;
        value_set |= 1 << (c.value as u16);
        is_flush &= c.suit == first_suit;
    }

    if value_set.count_ones() == 5 {
        if let Some(high) = straight_high(value_set) {
            let tiebreak = [high, high - 1, high - 2, high - 3, high - 4];
            let category = match (is_flush, high) {
                (true, 14) => Category::RoyalFlush,
                (true, _) => Category::StraightFlush,
                (false, _) => Category::Straight,
            };
            return EvaluatedHand { category, tiebreak };
        }
    }

    // (multiplicity, magnitude) pairs, strongest group first.
    let mut groups = [(0u8, 0u8); 5];
    let mut len = 0;
    for (v, &n) in counts.iter().enumerate() {
        if n > 0 {
            groups[len] = (n, v as u8 + 2);
            len += 1;
        }
    }
    groups[..len].sort_unstable_by(|a, b| b.cmp(a));

    let mut tiebreak = [0u8; 5];
    for (slot, (_, mag)) in tiebreak.iter_mut().zip(groups[..len].iter()) {
        *slot = *mag;
    }

    let category = match (groups[0].0, groups[1].0) {
        (4, _) => Category::FourOfAKind,
        (3, 2) => Category::FullHouse,
        _ if is_flush => Category::Flush,
        (3, _) => Category::ThreeOfAKind,
        (2, 2) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    };
    EvaluatedHand { category, tiebreak }
}

fn validate(cards: &[Card]) -> Result<(), InputError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(InputError::HandSize(cards.len()));
    }
    CardBitSet::from_unique(cards).map(|_| ())
}

/// Find the best five card hand out of 5 to 7 cards along with the cards
/// that make it.
pub fn best_five(cards: &[Card]) -> Result<(EvaluatedHand, [Card; 5]), InputError> {
    validate(cards)?;
    let n = cards.len();
    let mut best: Option<(EvaluatedHand, [Card; 5])> = None;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = rank_five(five);
                        if best.is_none_or(|(r, _)| rank > r) {
                            best = Some((rank, five));
                        }
                    }
                }
            }
        }
    }
    // validate() guarantees at least one subset.
    best.ok_or(InputError::HandSize(n))
}

/// Rank the best five card hand out of 5 to 7 distinct cards.
///
/// ```
/// use holdem_bots::core::{Category, Hand, evaluate_hand};
///
/// let cards = Hand::new_from_str("AsKsQsJsTs2d3c").unwrap().cards();
/// assert_eq!(Category::RoyalFlush, evaluate_hand(&cards).unwrap().category);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<EvaluatedHand, InputError> {
    best_five(cards).map(|(rank, _)| rank)
}

/// Total order over evaluated hands. `Equal` means a split.
pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    a.cmp(b)
}

/// Can this turn into a hand rank?
pub trait Rankable {
    fn rank(&self) -> Result<EvaluatedHand, InputError>;
}

impl Rankable for [Card] {
    fn rank(&self) -> Result<EvaluatedHand, InputError> {
        evaluate_hand(self)
    }
}

impl Rankable for Vec<Card> {
    fn rank(&self) -> Result<EvaluatedHand, InputError> {
        evaluate_hand(self)
    }
}

/// Implementation for `Hand`
impl Rankable for Hand {
    fn rank(&self) -> Result<EvaluatedHand, InputError> {
        evaluate_hand(&self.cards())
    }
}
