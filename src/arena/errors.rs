use thiserror::Error;

use crate::core::{DeckExhausted, InputError};

use super::game_state::Round;

/// Why an action was refused. A refused action never changes the game
/// state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("No betting is allowed in round {0:?}")]
    NotBettingRound(Round),
    #[error("There is no player in seat {0}")]
    UnknownPlayer(usize),
    #[error("It is seat {expected}'s turn, not seat {got}'s")]
    NotPlayersTurn { expected: usize, got: usize },
    #[error("Seat {0} has folded or is all in")]
    PlayerNotActive(usize),
    #[error("Can't check while facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("Raise of {amount} is below the minimum of {minimum}")]
    RaiseBelowMinimum { amount: u32, minimum: u32 },
    #[error("Raise of {amount} doesn't exceed the {to_call} needed to call")]
    RaiseDoesNotExceedCall { amount: u32, to_call: u32 },
    #[error("Betting was not reopened for this player")]
    RaiseNotAllowed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoldemSimulationError {
    #[error("Builder needs a game state")]
    NeedGameState,
    #[error("Builder needs agents")]
    NeedAgents,
    #[error("There are {agents} agents for {players} players")]
    AgentCountMismatch { agents: usize, players: usize },
    #[error("Expected there to be a winner but none was found")]
    NoWinner,
    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),
    #[error("Unable to rank a hand at showdown: {0}")]
    InvalidHand(#[from] InputError),
}
