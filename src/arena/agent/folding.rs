use crate::arena::{GameState, action::AgentAction};

use super::{Agent, AgentGenerator};

/// Folds to any bet. Checks when it can, so a free look is never thrown
/// away.
#[derive(Default, Debug, Clone, Copy)]
pub struct FoldingAgent;

impl Agent for FoldingAgent {
    fn act(&mut self, game_state: &GameState) -> AgentAction {
        if game_state.to_call(game_state.round_data.to_act_idx) == 0 {
            AgentAction::Check
        } else {
            AgentAction::Fold
        }
    }
}

/// Default `AgentGenerator` for `FoldingAgent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingAgentGenerator;

impl AgentGenerator for FoldingAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(FoldingAgent)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::arena::{RngHoldemSimulationBuilder, game_state::Round};

    use super::*;

    #[test_log::test]
    fn test_folding_agents() {
        let game_state = GameState::new(vec![100; 3], 10, 5, 0);
        let mut sim = RngHoldemSimulationBuilder::default()
            .rng(StdRng::seed_from_u64(420))
            .game_state(game_state)
            .agents(vec![
                Box::new(FoldingAgent),
                Box::new(FoldingAgent),
                Box::new(FoldingAgent),
            ])
            .build()
            .unwrap();

        sim.run().unwrap();

        assert_eq!(Round::HandOver, sim.game_state.round);
        assert_eq!(1, sim.game_state.num_players_in_hand());
        // The big blind takes the blinds.
        assert_eq!(15, sim.game_state.player_winnings[2]);
        assert_eq!(105, sim.game_state.players[2].stack);
    }
}
