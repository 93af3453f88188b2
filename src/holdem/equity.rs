//! Monte Carlo and exact win probability estimation.
//!
//! A trial deals the unknown cards without replacement from the pool of
//! cards nobody can see, ranks every seven card hand, and records whether
//! the hero strictly won, tied the best opponent, or lost. Trials are
//! grouped into fixed size chunks which run on rayon's pool. Each chunk
//! seeds its own `StdRng` from one base seed drawn from the caller's rng
//! and the chunk index, and the reduction only sums counts, so the result
//! does not depend on scheduling.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{event, trace_span};

use crate::core::{
    Card, CardBitSet, CardIter, EvaluatedHand, InputError, combinations, evaluate_hand,
};

/// Trials handed to one worker at a time.
const CHUNK_SIZE: usize = 256;
/// Board completions at or below this count are enumerated exactly.
const EXACT_ENUMERATION_LIMIT: usize = 5_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquityError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Equity simulation ran past its deadline")]
    Timeout,
}

/// Outcome of an equity calculation. The three probabilities sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityResult {
    pub win_prob: f64,
    pub tie_prob: f64,
    pub lose_prob: f64,
    /// `win_prob + tie_prob / (opponents + 1)`
    pub equity: f64,
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    pub trials: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: usize,
    ties: usize,
    losses: usize,
}

impl Tally {
    fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
    }

    fn total(&self) -> usize {
        self.wins + self.ties + self.losses
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Self) -> Self {
        Tally {
            wins: self.wins + rhs.wins,
            ties: self.ties + rhs.ties,
            losses: self.losses + rhs.losses,
        }
    }
}

impl EquityResult {
    fn from_tally(tally: Tally, opponents: usize) -> Self {
        let trials = tally.total();
        let n = trials.max(1) as f64;
        let win_prob = tally.wins as f64 / n;
        let tie_prob = tally.ties as f64 / n;
        // Computed as the remainder so the three always sum to one.
        let lose_prob = (1.0 - win_prob - tie_prob).max(0.0);
        Self {
            win_prob,
            tie_prob,
            lose_prob,
            equity: win_prob + tie_prob / (opponents as f64 + 1.0),
            wins: tally.wins,
            ties: tally.ties,
            losses: tally.losses,
            trials,
        }
    }
}

/// Six ordered bands of equity relative to a fair share of the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandStrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl HandStrengthLabel {
    /// Band an equity against the baseline `1 / (opponents + 1)`.
    pub fn from_equity(equity: f64, opponents: usize) -> Self {
        let baseline = 1.0 / (opponents as f64 + 1.0);
        if equity < baseline / 2.0 {
            HandStrengthLabel::VeryWeak
        } else if equity < baseline {
            HandStrengthLabel::Weak
        } else if equity < baseline + 0.10 {
            HandStrengthLabel::Fair
        } else if equity < baseline + 0.20 {
            HandStrengthLabel::Good
        } else if equity < baseline + 0.35 {
            HandStrengthLabel::VeryGood
        } else {
            HandStrengthLabel::Excellent
        }
    }
}

impl fmt::Display for HandStrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandStrengthLabel::VeryWeak => "very weak",
            HandStrengthLabel::Weak => "weak",
            HandStrengthLabel::Fair => "fair",
            HandStrengthLabel::Good => "good",
            HandStrengthLabel::VeryGood => "very good",
            HandStrengthLabel::Excellent => "excellent",
        };
        f.write_str(s)
    }
}

/// Estimates win/tie/loss probabilities for a pair of hole cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquityCalculator {
    trials: usize,
    timeout: Option<Duration>,
}

impl EquityCalculator {
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            timeout: None,
        }
    }

    /// Abort with [`EquityError::Timeout`] once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Equity of `hole` on `community` against `opponents` random hands.
    ///
    /// ```
    /// use holdem_bots::core::Hand;
    /// use holdem_bots::holdem::EquityCalculator;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let hole = Hand::new_from_str("AsAd").unwrap().cards();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let result = EquityCalculator::new(500)
    ///     .calculate_win_probability(&hole, &[], 1, &mut rng)
    ///     .unwrap();
    /// assert_eq!(500, result.trials);
    /// assert!(result.equity > 0.7);
    /// ```
    pub fn calculate_win_probability<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        community: &[Card],
        opponents: usize,
        rng: &mut R,
    ) -> Result<EquityResult, EquityError> {
        let known = validate(hole, community)?;
        if opponents == 0 {
            return Err(InputError::NoOpponents.into());
        }
        if self.trials == 0 {
            return Err(InputError::NoTrials.into());
        }
        let pool: Vec<Card> = (!known).iter().collect();
        let missing = 5 - community.len();
        let needed = 2 * opponents + missing;
        if needed > pool.len() {
            return Err(InputError::NotEnoughCards {
                needed,
                available: pool.len(),
            }
            .into());
        }

        let _span = trace_span!("equity", opponents, community = community.len()).entered();
        let hole = [hole[0], hole[1]];
        let tally = self.run_chunks(rng, &pool, |rng, scratch| {
            let (drawn, _) = scratch.partial_shuffle(rng, needed);
            let board = complete_board(community, &drawn[2 * opponents..]);
            let hero = rank_seven(hole, &board)?;
            let mut best: Option<EvaluatedHand> = None;
            for opp in drawn[..2 * opponents].chunks_exact(2) {
                let r = rank_seven([opp[0], opp[1]], &board)?;
                best = Some(best.map_or(r, |b| b.max(r)));
            }
            Ok(best.map_or(Ordering::Greater, |b| hero.cmp(&b)))
        })?;

        let result = EquityResult::from_tally(tally, opponents);
        event!(
            tracing::Level::TRACE,
            equity = result.equity,
            wins = result.wins,
            ties = result.ties,
            trials = result.trials,
            "equity estimated"
        );
        Ok(result)
    }

    /// Equity against known opponent hole cards. Only the board is unknown.
    ///
    /// When few enough completions exist they are all enumerated and the
    /// result is exact; otherwise board completions are sampled.
    pub fn vs_specific_hands<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        community: &[Card],
        opponent_hands: &[[Card; 2]],
        rng: &mut R,
    ) -> Result<EquityResult, EquityError> {
        let mut known = validate(hole, community)?;
        if opponent_hands.is_empty() {
            return Err(InputError::NoOpponents.into());
        }
        for &c in opponent_hands.iter().flatten() {
            if known.contains(c) {
                return Err(InputError::DuplicateCard(c).into());
            }
            known.insert(c);
        }
        let pool: Vec<Card> = (!known).iter().collect();
        let missing = 5 - community.len();
        if missing > pool.len() {
            return Err(InputError::NotEnoughCards {
                needed: missing,
                available: pool.len(),
            }
            .into());
        }

        let hole = [hole[0], hole[1]];
        let showdown = |board: &[Card; 5]| -> Result<Ordering, InputError> {
            let hero = rank_seven(hole, board)?;
            let mut best: Option<EvaluatedHand> = None;
            for opp in opponent_hands {
                let r = rank_seven(*opp, board)?;
                best = Some(best.map_or(r, |b| b.max(r)));
            }
            Ok(best.map_or(Ordering::Greater, |b| hero.cmp(&b)))
        };

        let tally = if combinations(pool.len(), missing) <= EXACT_ENUMERATION_LIMIT {
            let mut tally = Tally::default();
            for extra in CardIter::new(&pool, missing) {
                tally.record(showdown(&complete_board(community, &extra))?);
            }
            tally
        } else {
            if self.trials == 0 {
                return Err(InputError::NoTrials.into());
            }
            self.run_chunks(rng, &pool, |rng, scratch| {
                let (drawn, _) = scratch.partial_shuffle(rng, missing);
                showdown(&complete_board(community, drawn))
            })?
        };
        Ok(EquityResult::from_tally(tally, opponent_hands.len()))
    }

    /// Run the equity calculation and band the result.
    pub fn hand_strength_label<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        community: &[Card],
        opponents: usize,
        rng: &mut R,
    ) -> Result<HandStrengthLabel, EquityError> {
        self.calculate_win_probability(hole, community, opponents, rng)
            .map(|r| HandStrengthLabel::from_equity(r.equity, opponents))
    }

    fn run_chunks<R, F>(&self, rng: &mut R, pool: &[Card], trial: F) -> Result<Tally, EquityError>
    where
        R: Rng + ?Sized,
        F: Fn(&mut StdRng, &mut [Card]) -> Result<Ordering, InputError> + Sync,
    {
        let base: u64 = rng.random();
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let trials = self.trials;
        let chunks = trials.div_ceil(CHUNK_SIZE);

        let tallies: Result<Vec<Tally>, EquityError> = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    return Err(EquityError::Timeout);
                }
                let n = CHUNK_SIZE.min(trials - chunk * CHUNK_SIZE);
                let mut rng = StdRng::seed_from_u64(chunk_seed(base, chunk));
                let mut scratch = pool.to_vec();
                let mut tally = Tally::default();
                for _ in 0..n {
                    tally.record(trial(&mut rng, &mut scratch)?);
                }
                Ok(tally)
            })
            .collect();

        let tally = tallies?.into_iter().fold(Tally::default(), Add::add);
        Ok(tally)
    }
}

impl Default for EquityCalculator {
    fn default() -> Self {
        Self::new(5_000)
    }
}

/// Equity against `opponents` random hands using the thread local rng.
pub fn calculate_win_probability(
    hole: &[Card],
    community: &[Card],
    opponents: usize,
    trials: usize,
) -> Result<EquityResult, EquityError> {
    EquityCalculator::new(trials).calculate_win_probability(
        hole,
        community,
        opponents,
        &mut rand::rng(),
    )
}

/// Check card counts and duplicates; return the set of known cards.
fn validate(hole: &[Card], community: &[Card]) -> Result<CardBitSet, InputError> {
    if hole.len() != 2 {
        return Err(InputError::HoleCardCount(hole.len()));
    }
    if !matches!(community.len(), 0 | 3 | 4 | 5) {
        return Err(InputError::CommunityCardCount(community.len()));
    }
    let mut known = CardBitSet::from_unique(hole)?;
    for &c in community {
        if known.contains(c) {
            return Err(InputError::DuplicateCard(c));
        }
        known.insert(c);
    }
    Ok(known)
}

fn complete_board(community: &[Card], extra: &[Card]) -> [Card; 5] {
    let mut board = [Card::from(0); 5];
    for (slot, c) in board.iter_mut().zip(community.iter().chain(extra.iter())) {
        *slot = *c;
    }
    board
}

fn rank_seven(hole: [Card; 2], board: &[Card; 5]) -> Result<EvaluatedHand, InputError> {
    let cards = [
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ];
    evaluate_hand(&cards)
}

fn chunk_seed(base: u64, chunk: usize) -> u64 {
    base ^ (chunk as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
