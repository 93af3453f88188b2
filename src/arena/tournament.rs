use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{event, trace_span};

use super::{
    GameState, RngHoldemSimulationBuilder, agent::AgentGenerator, errors::HoldemSimulationError,
    historian::HistorianGenerator,
};

/// Where everyone finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentResult {
    /// Finishing place of each seat. 1 is the winner.
    pub places: Vec<usize>,
    pub final_stacks: Vec<u32>,
    pub hands_played: usize,
}

/// A `SingleTableTournament` plays hand after hand at one table. Stacks
/// carry over, the button moves to the next seat with chips and play stops
/// when one player has everything (or the hand limit is hit).
///
/// This builder is used to create a `SingleTableTournament`.
#[derive(Default)]
pub struct SingleTableTournamentBuilder {
    agent_generators: Option<Vec<Box<dyn AgentGenerator>>>,
    historian_generators: Option<Vec<Box<dyn HistorianGenerator>>>,
    starting_game_state: Option<GameState>,
    panic_on_historian_error: bool,
    seed: Option<u64>,
    max_hands: Option<usize>,
}

pub struct SingleTableTournament {
    agent_generators: Vec<Box<dyn AgentGenerator>>,
    historian_generators: Vec<Box<dyn HistorianGenerator>>,
    starting_game_state: GameState,
    panic_on_historian_error: bool,
    seed: u64,
    max_hands: Option<usize>,
}

impl SingleTableTournamentBuilder {
    /// One generator per seat. Each is asked for a fresh agent every hand.
    pub fn agent_generators(mut self, agent_generators: Vec<Box<dyn AgentGenerator>>) -> Self {
        self.agent_generators = Some(agent_generators);
        self
    }

    pub fn historian_generators(
        mut self,
        historian_generators: Vec<Box<dyn HistorianGenerator>>,
    ) -> Self {
        self.historian_generators = Some(historian_generators);
        self
    }

    pub fn starting_game_state(mut self, starting_game_state: GameState) -> Self {
        self.starting_game_state = Some(starting_game_state);
        self
    }

    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Seed for the deck of every hand. Hand `n` is shuffled with
    /// `seed + n`, so the same seed replays the same tournament.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Stop after this many hands even if nobody has won yet.
    pub fn max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = Some(max_hands);
        self
    }

    pub fn build(self) -> Result<SingleTableTournament, HoldemSimulationError> {
        let agent_generators = self
            .agent_generators
            .ok_or(HoldemSimulationError::NeedAgents)?;
        let starting_game_state = self
            .starting_game_state
            .ok_or(HoldemSimulationError::NeedGameState)?;
        if agent_generators.len() != starting_game_state.num_players() {
            return Err(HoldemSimulationError::AgentCountMismatch {
                agents: agent_generators.len(),
                players: starting_game_state.num_players(),
            });
        }
        Ok(SingleTableTournament {
            agent_generators,
            historian_generators: self.historian_generators.unwrap_or_default(),
            starting_game_state,
            panic_on_historian_error: self.panic_on_historian_error,
            seed: self.seed.unwrap_or_else(|| rand::rng().random()),
            max_hands: self.max_hands,
        })
    }
}

impl SingleTableTournament {
    /// Run the tournament to completion.
    ///
    /// `places` of `[2, 1, 3, 4]` means the first seat finished second, the
    /// second seat won and so on. Players busting in the same hand are
    /// placed by the stack they started that hand with. If the hand limit
    /// stops play early the survivors are placed by chip count.
    pub fn run(self) -> Result<TournamentResult, HoldemSimulationError> {
        let _span = trace_span!("SingleTableTournament::run").entered();

        let num_players = self.agent_generators.len();
        let mut stacks = self.starting_game_state.stacks();
        let mut dealer_idx = self.starting_game_state.dealer_idx;
        let mut results = vec![0; num_players];

        // Seats that start with nothing finish last.
        let mut place = num_players;
        for idx in (0..num_players).filter(|i| stacks[*i] == 0) {
            results[idx] = place;
            place -= 1;
        }

        let mut hands_played = 0;
        while place > 1 && self.max_hands.is_none_or(|m| hands_played < m) {
            let mut game_state = GameState::new(
                stacks.clone(),
                self.starting_game_state.big_blind,
                self.starting_game_state.small_blind,
                dealer_idx,
            );
            game_state.hand_number = hands_played;

            let agents = self
                .agent_generators
                .iter()
                .map(|g| g.generate(&game_state))
                .collect::<Vec<_>>();
            let historians = self
                .historian_generators
                .iter()
                .map(|g| g.generate(&game_state))
                .collect::<Vec<_>>();
            let rng = StdRng::seed_from_u64(self.seed.wrapping_add(hands_played as u64));
            let mut sim = RngHoldemSimulationBuilder::default()
                .game_state(game_state)
                .agents(agents)
                .historians(historians)
                .panic_on_historian_error(self.panic_on_historian_error)
                .rng(rng)
                .build()?;
            sim.run()?;
            hands_played += 1;

            let mut out: Vec<usize> = (0..num_players)
                .filter(|idx| sim.game_state.players[*idx].stack == 0 && stacks[*idx] != 0)
                .collect();
            // Smaller stacks going into the hand finish worse.
            out.sort_by_key(|idx| stacks[*idx]);
            for idx in out {
                event!(
                    tracing::Level::INFO,
                    "Agent {} finished in place {}",
                    idx,
                    place
                );
                results[idx] = place;
                place -= 1;
            }

            stacks = sim.game_state.stacks();
            match (1..=num_players)
                .map(|offset| (dealer_idx + offset) % num_players)
                .find(|idx| stacks[*idx] > 0)
            {
                Some(next) => dealer_idx = next,
                None => return Err(HoldemSimulationError::NoWinner),
            }
        }

        // Whoever is left is placed by chips, most first.
        let mut remaining: Vec<usize> = (0..num_players).filter(|i| results[*i] == 0).collect();
        if remaining.is_empty() {
            return Err(HoldemSimulationError::NoWinner);
        }
        remaining.sort_by_key(|idx| (std::cmp::Reverse(stacks[*idx]), *idx));
        for (offset, idx) in remaining.into_iter().enumerate() {
            results[idx] = offset + 1;
            event!(
                tracing::Level::INFO,
                "Agent {} finished in place {}",
                idx,
                offset + 1
            );
        }

        Ok(TournamentResult {
            places: results,
            final_stacks: stacks,
            hands_played,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::agent::{
        AllInAgentGenerator, BotAgentGenerator, CallingAgentGenerator, FoldingAgentGenerator,
    };
    use crate::arena::historian::{CloneHistorianGenerator, VecHistorian};
    use crate::arena::action::Action;
    use crate::bot::BotStyle;
    use crate::holdem::EquityCalculator;

    use super::*;

    #[test_log::test]
    fn test_all_in() {
        let gens: Vec<Box<dyn AgentGenerator>> = (0..4)
            .map(|_| Box::<AllInAgentGenerator>::default() as Box<dyn AgentGenerator>)
            .collect();
        let game_state = GameState::new(vec![50; 4], 10, 5, 0);
        let result = SingleTableTournamentBuilder::default()
            .agent_generators(gens)
            .starting_game_state(game_state)
            .seed(1)
            .build()
            .unwrap()
            .run()
            .unwrap();

        let mut places = result.places.clone();
        places.sort();
        assert_eq!(vec![1, 2, 3, 4], places);
        assert_eq!(200, result.final_stacks.iter().sum::<u32>());
    }

    #[test_log::test]
    fn test_folding_never_wins() {
        // The all in agent shoves every hand and the folders give up their
        // blinds until they bust.
        let gens: Vec<Box<dyn AgentGenerator>> = vec![
            Box::<AllInAgentGenerator>::default(),
            Box::<FoldingAgentGenerator>::default(),
            Box::<FoldingAgentGenerator>::default(),
            Box::<FoldingAgentGenerator>::default(),
        ];
        let game_state = GameState::new(vec![50; 4], 10, 5, 0);
        let result = SingleTableTournamentBuilder::default()
            .agent_generators(gens)
            .starting_game_state(game_state)
            .seed(2)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(1, result.places[0]);
        assert!(result.places[1..].iter().all(|p| *p > 1));
        assert_eq!(200, result.final_stacks[0]);
    }

    #[test_log::test]
    fn test_hand_limit_places_by_chips() {
        let gens: Vec<Box<dyn AgentGenerator>> = (0..3)
            .map(|_| Box::<CallingAgentGenerator>::default() as Box<dyn AgentGenerator>)
            .collect();
        let game_state = GameState::new(vec![1000, 2000, 3000], 10, 5, 0);
        let result = SingleTableTournamentBuilder::default()
            .agent_generators(gens)
            .starting_game_state(game_state)
            .seed(3)
            .max_hands(2)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(2, result.hands_played);
        let mut places = result.places.clone();
        places.sort();
        assert_eq!(vec![1, 2, 3], places);
        let winner = result.places.iter().position(|p| *p == 1).unwrap();
        assert_eq!(
            result.final_stacks.iter().max().copied(),
            Some(result.final_stacks[winner])
        );
    }

    #[test_log::test]
    fn test_busted_seat_at_start_places_last() {
        let gens: Vec<Box<dyn AgentGenerator>> = vec![
            Box::<AllInAgentGenerator>::default(),
            Box::<AllInAgentGenerator>::default(),
            Box::<FoldingAgentGenerator>::default(),
        ];
        let game_state = GameState::new(vec![100, 100, 0], 10, 5, 0);
        let result = SingleTableTournamentBuilder::default()
            .agent_generators(gens)
            .starting_game_state(game_state)
            .seed(4)
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(3, result.places[2]);
        assert_eq!(0, result.final_stacks[2]);
    }

    #[test_log::test]
    fn test_seeded_bot_tournament_replays() {
        let run = || {
            let records = VecHistorian::new_storage();
            let gens: Vec<Box<dyn AgentGenerator>> = [BotStyle::TAG, BotStyle::LAG, BotStyle::FISH]
                .iter()
                .enumerate()
                .map(|(i, style)| {
                    Box::new(BotAgentGenerator::new(
                        *style,
                        EquityCalculator::new(100),
                        i as u64,
                    )) as Box<dyn AgentGenerator>
                })
                .collect();
            let result = SingleTableTournamentBuilder::default()
                .agent_generators(gens)
                .historian_generators(vec![Box::new(CloneHistorianGenerator::new(
                    VecHistorian::new(records.clone()),
                ))])
                .starting_game_state(GameState::new(vec![200; 3], 20, 10, 0))
                .seed(99)
                .max_hands(5)
                .build()
                .unwrap()
                .run()
                .unwrap();
            let actions: Vec<Action> = records.borrow().iter().map(|r| r.action.clone()).collect();
            (result, actions)
        };
        let (first, first_actions) = run();
        let (second, second_actions) = run();
        assert_eq!(first, second);
        assert_eq!(first_actions, second_actions);
        assert_eq!(600, first.final_stacks.iter().sum::<u32>());
    }

    #[test]
    fn test_agent_count_checked() {
        let gens: Vec<Box<dyn AgentGenerator>> = vec![Box::<FoldingAgentGenerator>::default()];
        let err = SingleTableTournamentBuilder::default()
            .agent_generators(gens)
            .starting_game_state(GameState::new(vec![100; 2], 10, 5, 0))
            .build()
            .err();
        assert_eq!(
            Some(HoldemSimulationError::AgentCountMismatch {
                agents: 1,
                players: 2
            }),
            err
        );
    }
}
