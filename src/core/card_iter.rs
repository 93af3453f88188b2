use super::Card;

/// Iterates every `k` card combination of a slice of cards, in
/// lexicographic index order.
///
/// ```
/// use holdem_bots::core::{CardIter, Deck};
///
/// let cards = Deck::remaining(&[]);
/// assert_eq!(1326, CardIter::new(&cards, 2).count());
/// ```
#[derive(Debug)]
pub struct CardIter<'a> {
    // All the possible cards that can be dealt
    possible_cards: &'a [Card],
    // Set of current offsets being used to create card sets.
    idx: Vec<usize>,
    // Nothing left to hand out
    done: bool,
}

impl<'a> CardIter<'a> {
    pub fn new(possible_cards: &'a [Card], num_cards: usize) -> Self {
        CardIter {
            possible_cards,
            idx: (0..num_cards).collect(),
            done: num_cards > possible_cards.len(),
        }
    }
}

impl Iterator for CardIter<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.done {
            return None;
        }
        let result: Vec<Card> = self.idx.iter().map(|&i| self.possible_cards[i]).collect();

        // Advance the right-most index that still has room, then reset
        // everything to its right.
        let n = self.possible_cards.len();
        let k = self.idx.len();
        let mut level = k;
        loop {
            if level == 0 {
                self.done = true;
                break;
            }
            level -= 1;
            if self.idx[level] < n - (k - level) {
                self.idx[level] += 1;
                for j in (level + 1)..k {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                break;
            }
        }
        Some(result)
    }
}

/// Number of `k` element subsets of `n` items, saturating.
pub fn combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        acc = acc.saturating_mul(n - i) / (i + 1);
    }
    acc
}
