//! Turning a hand, a style and the table situation into an action.

use rand::Rng;
use thiserror::Error;
use tracing::event;

use crate::arena::GameState;
use crate::arena::action::AgentAction;
use crate::core::{Card, InputError};
use crate::holdem::{EquityCalculator, EquityError};

use super::position::PositionClass;
use super::strength::hand_strength;
use super::style::BotStyle;

/// Hand strength above which a bot will open the betting.
const BET_STRENGTH: f64 = 0.65;
/// Equity needed to call off the stack when facing an all in.
const ALL_IN_CALL_EQUITY: f64 = 0.40;
const FOLD_BASE: f64 = 0.35;
const FOLD_TIGHTNESS: f64 = 0.30;
/// Above this equity a bot always continues regardless of pot odds.
const CONTINUE_EQUITY: f64 = 0.50;
/// Heuristic used when the bot can't reason about its hand.
const FALLBACK_CALL_STRENGTH: f64 = 0.5;

/// Something went wrong while reasoning. Never escapes `decide_action`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BotDecisionError {
    #[error("Unable to evaluate hand strength: {0}")]
    Strength(#[from] InputError),
    #[error("Unable to estimate equity: {0}")]
    Equity(#[from] EquityError),
}

/// The cards a bot can see of its own seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: usize,
    pub hole_cards: Vec<Card>,
}

/// The table situation for one decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionContext {
    /// Players still in the hand other than the one deciding.
    pub opponents: usize,
    pub to_call: u32,
    pub pot: u32,
    pub community: Vec<Card>,
    pub position: PositionClass,
    pub stack: u32,
    /// The smallest legal raise increment.
    pub min_raise: u32,
}

impl DecisionContext {
    /// The decision facing seat `idx` in `game_state`.
    pub fn for_player(game_state: &GameState, idx: usize) -> (PlayerSnapshot, DecisionContext) {
        let in_hand = game_state.player_in_hand();
        let (hole_cards, stack) = game_state
            .players
            .get(idx)
            .map_or((vec![], 0), |p| (p.hole_cards.clone(), p.stack));
        let snapshot = PlayerSnapshot { id: idx, hole_cards };
        let ctx = DecisionContext {
            opponents: in_hand.count().saturating_sub(usize::from(in_hand.get(idx))),
            to_call: game_state.to_call(idx),
            pot: game_state.total_pot(),
            community: game_state.board.clone(),
            // All in seats no longer act, so they don't count for position.
            position: PositionClass::classify(
                idx,
                game_state.dealer_idx,
                game_state.player_active(),
                game_state.num_players(),
            ),
            stack,
            min_raise: game_state.round_data.min_raise,
        };
        (snapshot, ctx)
    }

    pub fn pot_odds(&self) -> f64 {
        let total = f64::from(self.pot) + f64::from(self.to_call);
        if total == 0.0 {
            0.0
        } else {
            f64::from(self.to_call) / total
        }
    }
}

/// The outcome of a decision, tagged with how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Reasoned {
        action: AgentAction,
        hand_strength: f64,
        /// Only estimated when there was something to call.
        equity: Option<f64>,
    },
    /// Reasoning failed so a simple rule picked the action.
    Fallback {
        action: AgentAction,
        reason: BotDecisionError,
    },
}

impl Decision {
    pub fn action(&self) -> AgentAction {
        match self {
            Decision::Reasoned { action, .. } | Decision::Fallback { action, .. } => *action,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback { .. })
    }
}

/// Pick an action for `player`.
///
/// Only the injected `rng` and the equity sampling are random, so the same
/// inputs and the same seed always give the same decision.
pub fn decide<R: Rng + ?Sized>(
    player: &PlayerSnapshot,
    style: &BotStyle,
    ctx: &DecisionContext,
    calculator: &EquityCalculator,
    rng: &mut R,
) -> Decision {
    let hs = match hand_strength(&player.hole_cards, &ctx.community) {
        Ok(hs) => hs,
        Err(e) => return fallback(ctx, None, e.into()),
    };

    if ctx.to_call == 0 {
        let action = if hs > BET_STRENGTH && rng.random::<f64>() < style.aggression {
            let size = (style.aggression * hs * f64::from(ctx.stack)) as u32;
            // Never bet less than the minimum unless that's all we have.
            let size = size.max(ctx.min_raise).min(ctx.stack);
            if size == 0 {
                AgentAction::Check
            } else {
                AgentAction::Raise(size)
            }
        } else {
            AgentAction::Check
        };
        return reasoned(player, ctx, action, hs, None);
    }

    let equity = match calculator.calculate_win_probability(
        &player.hole_cards,
        &ctx.community,
        ctx.opponents,
        rng,
    ) {
        Ok(result) => result.equity,
        Err(e) => return fallback(ctx, Some(hs), e.into()),
    };

    let action = if ctx.to_call >= ctx.stack {
        // Calling means going all in.
        if equity > ALL_IN_CALL_EQUITY {
            AgentAction::Call
        } else {
            AgentAction::Fold
        }
    } else {
        let fold_threshold =
            (FOLD_BASE + style.tightness * FOLD_TIGHTNESS) * ctx.position.multiplier();
        if equity < fold_threshold {
            AgentAction::Fold
        } else if (equity >= ctx.pot_odds() || equity > CONTINUE_EQUITY)
            && rng.random::<f64>() < style.aggression * hs
        {
            let extra = (f64::from(ctx.stack) * style.aggression * hs) as u32;
            let amount = ctx
                .to_call
                .saturating_add(extra)
                .max(ctx.to_call.saturating_add(ctx.min_raise))
                .min(ctx.stack);
            AgentAction::Raise(amount)
        } else {
            AgentAction::Call
        }
    };
    reasoned(player, ctx, action, hs, Some(equity))
}

/// Like [`decide`] but only the action.
pub fn decide_action<R: Rng + ?Sized>(
    player: &PlayerSnapshot,
    style: &BotStyle,
    ctx: &DecisionContext,
    calculator: &EquityCalculator,
    rng: &mut R,
) -> AgentAction {
    decide(player, style, ctx, calculator, rng).action()
}

fn reasoned(
    player: &PlayerSnapshot,
    ctx: &DecisionContext,
    action: AgentAction,
    hand_strength: f64,
    equity: Option<f64>,
) -> Decision {
    event!(
        tracing::Level::DEBUG,
        idx = player.id,
        hand_strength,
        ?equity,
        to_call = ctx.to_call,
        pot = ctx.pot,
        position = %ctx.position,
        ?action,
        "bot decision"
    );
    Decision::Reasoned {
        action,
        hand_strength,
        equity,
    }
}

fn fallback(ctx: &DecisionContext, hs: Option<f64>, reason: BotDecisionError) -> Decision {
    let action = if ctx.to_call == 0 {
        AgentAction::Check
    } else if hs.is_some_and(|hs| hs >= FALLBACK_CALL_STRENGTH) {
        AgentAction::Call
    } else {
        AgentAction::Fold
    };
    event!(tracing::Level::WARN, %reason, ?action, "bot falling back to heuristic");
    Decision::Fallback { action, reason }
}
