use crate::arena::{GameState, action::AgentAction};

use super::{Agent, AgentGenerator};

/// A calling station. Matches every bet, checks when there's nothing to
/// call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgent;

impl Agent for CallingAgent {
    fn act(&mut self, game_state: &GameState) -> AgentAction {
        if game_state.to_call(game_state.round_data.to_act_idx) == 0 {
            AgentAction::Check
        } else {
            AgentAction::Call
        }
    }
}

/// Default `AgentGenerator` for `CallingAgent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgentGenerator;

impl AgentGenerator for CallingAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(CallingAgent)
    }
}
