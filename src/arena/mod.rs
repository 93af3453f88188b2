//! The betting engine and everything needed to play hands with agents.
//!
//! # Single Hand
//!
//! A `HoldemSimulation` plays one hand. Every source of randomness can be
//! injected, down to the deck.
//!
//! ```
//! use holdem_bots::arena::agent::{BotAgent, CallingAgent};
//! use holdem_bots::arena::{Agent, GameState, RngHoldemSimulationBuilder};
//! use holdem_bots::bot::BotStyle;
//! use holdem_bots::holdem::EquityCalculator;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(BotAgent::new(BotStyle::TAG, EquityCalculator::new(200), 1)),
//!     Box::<CallingAgent>::default(),
//! ];
//! let game_state = GameState::new(vec![1000, 1000], 10, 5, 0);
//! let mut sim = RngHoldemSimulationBuilder::default()
//!     .game_state(game_state)
//!     .agents(agents)
//!     .rng(StdRng::seed_from_u64(420))
//!     .build()
//!     .unwrap();
//!
//! sim.run().unwrap();
//! assert_eq!(2000, sim.game_state.stacks().iter().sum::<u32>());
//! ```
//!
//! # `SingleTableTournament` Example
//!
//! A tournament keeps dealing hands until one player has all the chips.
//!
//! ```
//! use holdem_bots::arena::AgentGenerator;
//! use holdem_bots::arena::agent::BotAgentGenerator;
//! use holdem_bots::arena::tournament::SingleTableTournamentBuilder;
//! use holdem_bots::arena::GameState;
//! use holdem_bots::bot::StyleTable;
//! use holdem_bots::holdem::EquityCalculator;
//!
//! let table = StyleTable::default();
//! let agent_gens: Vec<Box<dyn AgentGenerator>> = table
//!     .assign_round_robin(4)
//!     .unwrap()
//!     .into_iter()
//!     .enumerate()
//!     .map(|(seat, (_, style))| {
//!         Box::new(BotAgentGenerator::new(style, EquityCalculator::new(100), seat as u64))
//!             as Box<dyn AgentGenerator>
//!     })
//!     .collect();
//!
//! let tournament = SingleTableTournamentBuilder::default()
//!     .agent_generators(agent_gens)
//!     .starting_game_state(GameState::new(vec![100; 4], 10, 5, 0))
//!     .seed(7)
//!     .max_hands(20)
//!     .build()
//!     .unwrap();
//!
//! let result = tournament.run().unwrap();
//! assert_eq!(400, result.final_stacks.iter().sum::<u32>());
//! ```
pub mod action;
pub mod agent;
pub mod errors;
pub mod game_state;
pub mod historian;
pub mod pots;
pub mod sim_builder;
pub mod simulation;
pub mod tournament;

#[cfg(any(test, feature = "arena-test-util"))]
pub mod test_util;

pub use agent::{Agent, AgentGenerator, CloneAgentGenerator};
pub use game_state::{GameState, Round, TurnRequest};
pub use historian::{CloneHistorianGenerator, Historian, HistorianError, HistorianGenerator};
pub use sim_builder::{HoldemSimulationBuilder, RngHoldemSimulationBuilder};
pub use simulation::HoldemSimulation;
