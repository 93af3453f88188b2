use crate::arena::{GameState, action::AgentAction};

use super::{Agent, AgentGenerator};

/// Shoves every chip in whenever it acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInAgent;

impl Agent for AllInAgent {
    fn act(&mut self, game_state: &GameState) -> AgentAction {
        let idx = game_state.round_data.to_act_idx;
        AgentAction::Raise(game_state.players[idx].stack)
    }
}

/// Default `AgentGenerator` for `AllInAgent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInAgentGenerator;

impl AgentGenerator for AllInAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(AllInAgent)
    }
}
