//! `Agent`s are the automatic players in a simulation. They hold the
//! strategy behind each seat.
//!
//! A few fixed agents are provided as baselines and for tests, along with
//! `BotAgent` which plays a `BotStyle` using equity estimates.
mod all_in;
mod bot;
mod calling;
mod folding;
mod replay;

use super::{action::AgentAction, game_state::GameState};

/// The trait every strategy implements. The agent is asked to act whenever
/// `game_state.round_data.to_act_idx` is its seat.
///
/// An illegal action is not corrected. The simulation logs it and folds the
/// seat instead.
pub trait Agent {
    fn act(&mut self, game_state: &GameState) -> AgentAction;
}

/// Builds a fresh agent for every hand of a tournament.
pub trait AgentGenerator {
    fn generate(&self, game_state: &GameState) -> Box<dyn Agent>;
}

pub trait CloneAgent: Agent {
    fn clone_box(&self) -> Box<dyn Agent>;
}

impl<T> CloneAgent for T
where
    T: 'static + Agent + Clone,
{
    fn clone_box(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

/// Hands out a copy of the same agent for every hand.
pub struct CloneAgentGenerator<T> {
    agent: T,
}

impl<T> CloneAgentGenerator<T>
where
    T: CloneAgent,
{
    pub fn new(agent: T) -> Self {
        CloneAgentGenerator { agent }
    }
}

impl<T> AgentGenerator for CloneAgentGenerator<T>
where
    T: CloneAgent,
{
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        self.agent.clone_box()
    }
}

pub use all_in::{AllInAgent, AllInAgentGenerator};
pub use bot::{BotAgent, BotAgentGenerator};
pub use calling::{CallingAgent, CallingAgentGenerator};
pub use folding::{FoldingAgent, FoldingAgentGenerator};
pub use replay::VecReplayAgent;
