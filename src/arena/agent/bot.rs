use rand::{SeedableRng, rngs::StdRng};

use crate::arena::{
    GameState,
    action::{ActionKind, AgentAction},
};
use crate::bot::{BotStyle, DecisionContext, decide_action};
use crate::holdem::EquityCalculator;

use super::{Agent, AgentGenerator};

/// Plays a `BotStyle` using equity estimates. All of its randomness comes
/// from its own seeded rng so a hand can be replayed exactly.
#[derive(Debug, Clone)]
pub struct BotAgent {
    style: BotStyle,
    calculator: EquityCalculator,
    rng: StdRng,
}

impl BotAgent {
    pub fn new(style: BotStyle, calculator: EquityCalculator, seed: u64) -> Self {
        Self {
            style,
            calculator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn style(&self) -> &BotStyle {
        &self.style
    }
}

impl Agent for BotAgent {
    fn act(&mut self, game_state: &GameState) -> AgentAction {
        let idx = game_state.round_data.to_act_idx;
        let (player, ctx) = DecisionContext::for_player(game_state, idx);
        let action = decide_action(&player, &self.style, &ctx, &self.calculator, &mut self.rng);

        // After a short all in the bot may only be allowed to call.
        match (action, game_state.turn_request()) {
            (AgentAction::Raise(_), Some(req)) if !req.legal_actions.contains(&ActionKind::Raise) => {
                if req.to_call == 0 {
                    AgentAction::Check
                } else {
                    AgentAction::Call
                }
            }
            _ => action,
        }
    }
}

/// Builds a `BotAgent` for each hand, reseeded from the hand number so
/// every hand of a tournament sees different but repeatable draws.
#[derive(Debug, Clone)]
pub struct BotAgentGenerator {
    style: BotStyle,
    calculator: EquityCalculator,
    seed: u64,
}

impl BotAgentGenerator {
    pub fn new(style: BotStyle, calculator: EquityCalculator, seed: u64) -> Self {
        Self {
            style,
            calculator,
            seed,
        }
    }
}

impl AgentGenerator for BotAgentGenerator {
    fn generate(&self, game_state: &GameState) -> Box<dyn Agent> {
        let seed = self
            .seed
            .wrapping_add((game_state.hand_number as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Box::new(BotAgent::new(self.style, self.calculator, seed))
    }
}
