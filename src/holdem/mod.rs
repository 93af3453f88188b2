/// Module that classifies two card starting hands.
mod starting_hand;
/// Export `StartingHand`
pub use self::starting_hand::{StartingHand, Suitedness};

/// Win probability estimation.
mod equity;
pub use self::equity::{
    EquityCalculator, EquityError, EquityResult, HandStrengthLabel, calculate_win_probability,
};
