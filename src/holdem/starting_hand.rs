use crate::core::{Card, Suit, Value};

#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suitedness {
    Suited,
    OffSuit,
}

/// `StartingHand` represents one of the 169 classes of two card starting
/// hands in texas holdem, ignoring which exact suits are held.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartingHand {
    /// The higher value.
    pub value_one: Value,
    /// The lower (or equal) value.
    pub value_two: Value,
    /// Both cards share a suit. Pairs are always off suit.
    pub suited: Suitedness,
}

// Weights of the non-pair formula. Chosen so that a higher card, a higher
// kicker, a shared suit or a smaller gap never lowers the score.
const HIGH_WEIGHT: f64 = 0.45;
const LOW_WEIGHT: f64 = 0.25;
const SUITED_BONUS: f64 = 0.08;
const GAP_BONUS: f64 = 0.025;
const NON_PAIR_CEILING: f64 = 0.85;
const PAIR_FLOOR: f64 = 0.55;

impl StartingHand {
    /// Classify two hole cards.
    pub fn from_cards(a: Card, b: Card) -> Self {
        let (hi, lo) = if a.value >= b.value { (a, b) } else { (b, a) };
        let suited = if hi.suit == lo.suit && hi.value != lo.value {
            Suitedness::Suited
        } else {
            Suitedness::OffSuit
        };
        Self {
            value_one: hi.value,
            value_two: lo.value,
            suited,
        }
    }

    pub fn is_pair(&self) -> bool {
        self.value_one == self.value_two
    }

    /// Static pre-flop strength in `[0, 1]`.
    ///
    /// Pairs occupy `[0.55, 1.0]` linearly by rank. Everything else is scored
    /// on high card, kicker, suitedness and connectedness and then rescaled so
    /// that 3-2 off suit is 0.0 and A-K suited is 0.85.
    pub fn strength(&self) -> f64 {
        if self.is_pair() {
            let v = f64::from(self.value_one as u8);
            return PAIR_FLOOR + v / 12.0 * (1.0 - PAIR_FLOOR);
        }
        let floor = raw_score(Value::Three, Value::Two, false);
        let ceiling = raw_score(Value::Ace, Value::King, true);
        let raw = raw_score(
            self.value_one,
            self.value_two,
            self.suited == Suitedness::Suited,
        );
        ((raw - floor) / (ceiling - floor) * NON_PAIR_CEILING).clamp(0.0, NON_PAIR_CEILING)
    }

    /// Every concrete two card combination in this class.
    pub fn possible_hands(&self) -> Vec<[Card; 2]> {
        let suits = Suit::suits();
        let mut hands = Vec::with_capacity(12);
        match self.suited {
            Suitedness::Suited => {
                for s in suits {
                    hands.push([Card::new(self.value_one, s), Card::new(self.value_two, s)]);
                }
            }
            Suitedness::OffSuit => {
                for (i, suit_one) in suits.iter().enumerate() {
                    for suit_two in &suits[i + 1..] {
                        hands.push([
                            Card::new(self.value_one, *suit_one),
                            Card::new(self.value_two, *suit_two),
                        ]);
                        // Unless it's a pair the flipped suits are distinct.
                        if !self.is_pair() {
                            hands.push([
                                Card::new(self.value_one, *suit_two),
                                Card::new(self.value_two, *suit_one),
                            ]);
                        }
                    }
                }
            }
        }
        hands
    }

    /// Create every possible unique StartingHand.
    pub fn all() -> Vec<StartingHand> {
        let mut hands = Vec::with_capacity(169);
        let values = Value::values();
        for (i, value_two) in values.iter().enumerate() {
            for value_one in &values[i..] {
                hands.push(StartingHand {
                    value_one: *value_one,
                    value_two: *value_two,
                    suited: Suitedness::OffSuit,
                });
                if value_one != value_two {
                    hands.push(StartingHand {
                        value_one: *value_one,
                        value_two: *value_two,
                        suited: Suitedness::Suited,
                    });
                }
            }
        }
        hands
    }
}

fn raw_score(hi: Value, lo: Value, suited: bool) -> f64 {
    let hi = f64::from(hi as u8);
    let lo = f64::from(lo as u8);
    let gap = hi - lo - 1.0;
    let mut raw = hi / 12.0 * HIGH_WEIGHT + lo / 12.0 * LOW_WEIGHT;
    if suited {
        raw += SUITED_BONUS;
    }
    raw + (3.0 - gap).max(0.0) * GAP_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sh(s: &str) -> StartingHand {
        let a = Card::try_from(&s[0..2]).unwrap();
        let b = Card::try_from(&s[2..4]).unwrap();
        StartingHand::from_cards(a, b)
    }

    #[test]
    fn test_aces() {
        let sh = StartingHand {
            value_one: Value::Ace,
            value_two: Value::Ace,
            suited: Suitedness::OffSuit,
        };
        assert_eq!(6, sh.possible_hands().len());
    }

    #[test]
    fn test_suited_connector() {
        let sh = StartingHand {
            value_one: Value::Ace,
            value_two: Value::King,
            suited: Suitedness::Suited,
        };
        assert_eq!(4, sh.possible_hands().len());
    }

    #[test]
    fn test_unsuited_connector() {
        let sh = StartingHand {
            value_one: Value::Ace,
            value_two: Value::King,
            suited: Suitedness::OffSuit,
        };
        assert_eq!(12, sh.possible_hands().len());
    }

    #[test]
    fn test_starting_hand_count() {
        let all = StartingHand::all();
        assert_eq!(169, all.len());
        let num_hands: usize = all.iter().map(|h| h.possible_hands().len()).sum();
        assert_eq!(1326, num_hands);
    }

    #[test]
    fn test_from_cards_orders_values() {
        let h = sh("5dKd");
        assert_eq!(Value::King, h.value_one);
        assert_eq!(Value::Five, h.value_two);
        assert_eq!(Suitedness::Suited, h.suited);
        assert_eq!(Suitedness::OffSuit, sh("AsAd").suited);
    }

    #[test]
    fn test_strength_anchors() {
        assert_relative_eq!(1.0, sh("AsAd").strength());
        assert_relative_eq!(0.55, sh("2s2d").strength());
        assert_relative_eq!(0.0, sh("3s2d").strength());
        assert_relative_eq!(0.85, sh("AsKs").strength());
    }

    #[test]
    fn test_strength_ordering() {
        assert!(sh("AsKs").strength() > sh("AsKd").strength());
        assert!(sh("AsKd").strength() > sh("AsQd").strength());
        assert!(sh("JsTs").strength() > sh("Js8s").strength());
        assert!(sh("7s2d").strength() < sh("8s2d").strength());
        assert!(sh("7s2d").strength() < 0.2);
        for h in StartingHand::all() {
            let s = h.strength();
            assert!((0.0..=1.0).contains(&s), "{h:?} {s}");
        }
    }
}
