use holdem_bots::arena::action::Action;
use holdem_bots::arena::agent::{BotAgent, CallingAgent};
use holdem_bots::arena::historian::VecHistorian;
use holdem_bots::arena::tournament::TournamentResult;
use holdem_bots::arena::{
    Agent, AgentGenerator, CloneAgentGenerator, CloneHistorianGenerator, GameState,
    RngHoldemSimulationBuilder,
};
use holdem_bots::bot::{BotStyle, StyleTable};
use holdem_bots::config::GameConfig;
use holdem_bots::holdem::EquityCalculator;
use rand::{SeedableRng, rngs::StdRng};

fn play_hand(seed: u64) -> (Vec<Action>, Vec<u32>) {
    let records = VecHistorian::new_storage();
    let agents: Vec<Box<dyn Agent>> = StyleTable::default()
        .assign_round_robin(6)
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(seat, (_, style))| {
            Box::new(BotAgent::new(style, EquityCalculator::new(200), seed + seat as u64))
                as Box<dyn Agent>
        })
        .collect();
    let mut sim = RngHoldemSimulationBuilder::default()
        .game_state(GameState::new(vec![500; 6], 10, 5, 2))
        .agents(agents)
        .historians(vec![Box::new(VecHistorian::new(records.clone()))])
        .rng(StdRng::seed_from_u64(seed))
        .build()
        .unwrap();
    sim.run().unwrap();
    let actions = records.borrow().iter().map(|r| r.action.clone()).collect();
    (actions, sim.game_state.stacks())
}

#[test_log::test]
fn test_same_seed_same_hand() {
    let (first_actions, first_stacks) = play_hand(31);
    let (second_actions, second_stacks) = play_hand(31);
    assert_eq!(first_actions, second_actions);
    assert_eq!(first_stacks, second_stacks);
    assert_eq!(3000, first_stacks.iter().sum::<u32>());
    assert!(matches!(first_actions.last(), Some(Action::HandOver)));
}

fn play_tournament(config: &GameConfig) -> (TournamentResult, Vec<Action>) {
    let records = VecHistorian::new_storage();
    let result = config
        .tournament_builder()
        .unwrap()
        .historian_generators(vec![Box::new(CloneHistorianGenerator::new(
            VecHistorian::new(records.clone()),
        ))])
        .max_hands(10)
        .build()
        .unwrap()
        .run()
        .unwrap();
    let actions = records.borrow().iter().map(|r| r.action.clone()).collect();
    (result, actions)
}

#[test_log::test]
fn test_configured_tournament_replays() {
    let config = GameConfig {
        seats: 4,
        starting_stack: 200,
        small_blind: 10,
        big_blind: 20,
        bot_trials: 100,
        seed: Some(1234),
        ..Default::default()
    };
    let (first, first_actions) = play_tournament(&config);
    let (second, second_actions) = play_tournament(&config);
    assert_eq!(first, second);
    assert_eq!(first_actions, second_actions);
    assert_eq!(800, first.final_stacks.iter().sum::<u32>());

    let mut places = first.places.clone();
    places.sort();
    assert_eq!(vec![1, 2, 3, 4], places);
}

#[test_log::test]
fn test_mixed_generators() {
    let gens: Vec<Box<dyn AgentGenerator>> = vec![
        Box::new(CloneAgentGenerator::new(BotAgent::new(
            BotStyle::NIT,
            EquityCalculator::new(100),
            3,
        ))),
        Box::new(CloneAgentGenerator::new(CallingAgent)),
    ];
    let result = holdem_bots::arena::tournament::SingleTableTournamentBuilder::default()
        .agent_generators(gens)
        .starting_game_state(GameState::new(vec![100, 100], 10, 5, 0))
        .seed(8)
        .max_hands(15)
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(200, result.final_stacks.iter().sum::<u32>());
    assert!(result.hands_played <= 15);
}
