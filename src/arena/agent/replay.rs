use crate::arena::{action::AgentAction, game_state::GameState};

use super::Agent;

/// Replays a fixed list of actions, one per turn, then folds.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    actions: Vec<AgentAction>,
    idx: usize,
    default: AgentAction,
}

impl VecReplayAgent {
    pub fn new(actions: Vec<AgentAction>) -> Self {
        Self {
            actions,
            idx: 0,
            default: AgentAction::Fold,
        }
    }

    /// What to play once the list runs out.
    pub fn with_default(mut self, default: AgentAction) -> Self {
        self.default = default;
        self
    }
}

impl Agent for VecReplayAgent {
    fn act(&mut self, _game_state: &GameState) -> AgentAction {
        let idx = self.idx;
        self.idx += 1;
        self.actions.get(idx).copied().unwrap_or(self.default)
    }
}
