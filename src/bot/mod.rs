//! Synthetic opponents.
//!
//! A bot combines a static [`hand_strength`], an equity estimate against the
//! live opponents and its seat's [`PositionClass`] with a [`BotStyle`] to
//! pick an action. Styles are plain data looked up in a [`StyleTable`].
//!
//! ```
//! use holdem_bots::bot::{BotStyle, DecisionContext, PlayerSnapshot, PositionClass, decide_action};
//! use holdem_bots::core::Hand;
//! use holdem_bots::holdem::EquityCalculator;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let player = PlayerSnapshot {
//!     id: 0,
//!     hole_cards: Hand::new_from_str("AsAd").unwrap().cards(),
//! };
//! let ctx = DecisionContext {
//!     opponents: 2,
//!     to_call: 20,
//!     pot: 30,
//!     community: vec![],
//!     position: PositionClass::Late,
//!     stack: 1000,
//!     min_raise: 10,
//! };
//! let mut rng = StdRng::seed_from_u64(7);
//! let action = decide_action(&player, &BotStyle::TAG, &ctx, &EquityCalculator::new(500), &mut rng);
//! assert_ne!(holdem_bots::arena::action::AgentAction::Fold, action);
//! ```
mod decision;
mod position;
mod strength;
mod style;

pub use decision::{
    BotDecisionError, Decision, DecisionContext, PlayerSnapshot, decide, decide_action,
};
pub use position::PositionClass;
pub use strength::hand_strength;
pub use style::{BotStyle, CANONICAL_STYLES, StyleError, StyleTable};
