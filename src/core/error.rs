use thiserror::Error;

use super::Card;

/// Errors raised when the caller hands the core cards or counts that
/// can never be valid. These are always surfaced, never repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card appears more than once: {0}")]
    DuplicateCard(Card),
    #[error("Hands must have between 5 and 7 cards, got {0}")]
    HandSize(usize),
    #[error("Exactly 2 hole cards are required, got {0}")]
    HoleCardCount(usize),
    #[error("Community cards must number 0, 3, 4 or 5, got {0}")]
    CommunityCardCount(usize),
    #[error("At least one opponent is required")]
    NoOpponents,
    #[error("At least one trial is required")]
    NoTrials,
    #[error("Not enough cards left in the deck: need {needed}, have {available}")]
    NotEnoughCards { needed: usize, available: usize },
}

/// Raised when more cards are drawn than the deck holds. Fatal to the
/// current hand.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("Deck exhausted: requested {requested} cards with {remaining} remaining")]
pub struct DeckExhausted {
    pub requested: usize,
    pub remaining: usize,
}
