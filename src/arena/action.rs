use crate::core::{Card, EvaluatedHand};

use super::errors::InvalidAction;
use super::game_state::Round;

/// What an agent wants to do on its turn.
///
/// `Raise` carries the total number of chips put in by this action, that is
/// the amount to call plus the raise increment. Amounts above the stack are
/// capped to an all in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentAction {
    Fold,
    Check,
    Call,
    Raise(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
}

impl AgentAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            AgentAction::Fold => ActionKind::Fold,
            AgentAction::Check => ActionKind::Check,
            AgentAction::Call => ActionKind::Call,
            AgentAction::Raise(_) => ActionKind::Raise,
        }
    }

    /// Chips requested by a raise, zero otherwise.
    pub fn amount(&self) -> u32 {
        match self {
            AgentAction::Raise(amount) => *amount,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedBetType {
    SmallBlind,
    BigBlind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStartPayload {
    pub hand_number: usize,
    pub dealer_idx: usize,
    pub small_blind: u32,
    pub big_blind: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBetPayload {
    pub idx: usize,
    /// Chips actually posted. Can be less than the blind for a short stack.
    pub amount: u32,
    pub forced_bet_type: ForcedBetType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayedActionPayload {
    pub idx: usize,
    pub action: AgentAction,
    /// Chips moved from the stack into the pot.
    pub chips_added: u32,
    pub player_stack: u32,
    pub total_pot: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedActionPayload {
    pub idx: usize,
    pub action: AgentAction,
    pub error: InvalidAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPayload {
    /// Index of the pot in ascending contribution order. Zero is the main pot.
    pub pot_idx: usize,
    pub idx: usize,
    pub amount: u32,
    /// The winning hand when the pot was contested.
    pub hand: Option<EvaluatedHand>,
}

/// Everything that happens in a hand, as seen by historians.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GameStart(GameStartPayload),
    ForcedBet(ForcedBetPayload),
    DealStartingHand { idx: usize, cards: [Card; 2] },
    PlayedAction(PlayedActionPayload),
    /// The agent's action was refused and the player was folded instead.
    FailedAction(FailedActionPayload),
    RoundAdvance(Round),
    DealCommunity(Card),
    Award(AwardPayload),
    HandOver,
}
