use rand::{Rng, rngs::ThreadRng};

use crate::core::{Card, Deck};

use super::{
    Agent, GameState, HoldemSimulation, agent::FoldingAgent, errors::HoldemSimulationError,
    historian::Historian,
};

// Every card not already in someone's hand or on the board, shuffled.
fn build_deck<R: Rng + ?Sized>(game_state: &GameState, rng: &mut R) -> Deck {
    let known: Vec<Card> = game_state
        .players
        .iter()
        .flat_map(|p| p.hole_cards.iter().copied())
        .chain(game_state.board.iter().copied())
        .collect();
    let mut deck = Deck::from_cards(Deck::remaining(&known));
    deck.shuffle(rng);
    deck
}

fn build_agents(num_agents: usize) -> Vec<Box<dyn Agent>> {
    (0..num_agents)
        .map(|_| -> Box<dyn Agent> { Box::<FoldingAgent>::default() })
        .collect()
}

/// # HoldemSimulationBuilder
///
/// `RngHoldemSimulationBuilder` puts together a single hand played by
/// agents. A game state is required, everything else is optional.
///
/// `HoldemSimulationBuilder` is a type alias for
/// `RngHoldemSimulationBuilder<ThreadRng>`.
///
/// Without agents every seat gets a `FoldingAgent`. Without a deck the
/// cards nobody holds yet are shuffled with the rng.
///
/// ## Examples
///
/// ```
/// use holdem_bots::arena::{GameState, HoldemSimulationBuilder};
///
/// let game_state = GameState::new(vec![100; 5], 10, 5, 3);
/// let sim = HoldemSimulationBuilder::default()
///     .game_state(game_state)
///     .build()
///     .unwrap();
/// ```
///
/// For a replayable hand pass in a seeded rng:
///
/// ```
/// use holdem_bots::arena::{GameState, RngHoldemSimulationBuilder};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let game_state = GameState::new(vec![100; 5], 10, 5, 3);
/// let mut sim = RngHoldemSimulationBuilder::default()
///     .game_state(game_state)
///     .rng(StdRng::seed_from_u64(420))
///     .build()
///     .unwrap();
/// sim.run().unwrap();
/// ```
pub struct RngHoldemSimulationBuilder<R: Rng> {
    agents: Option<Vec<Box<dyn Agent>>>,
    historians: Vec<Box<dyn Historian>>,
    game_state: Option<GameState>,
    deck: Option<Deck>,
    rng: Option<R>,
    panic_on_historian_error: bool,
}

impl<R: Rng> RngHoldemSimulationBuilder<R> {
    /// One agent per seat, in seat order.
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    pub fn game_state(mut self, game_state: GameState) -> Self {
        self.game_state = Some(game_state);
        self
    }

    /// Set the deck. It is dealt from the top as given, with no shuffling,
    /// so the hand is fully determined by the deck and the agents.
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn rng(mut self, rng: R) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// Panic instead of dropping a historian that fails to record.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    pub fn build(self) -> Result<HoldemSimulation, HoldemSimulationError> {
        let game_state = self
            .game_state
            .ok_or(HoldemSimulationError::NeedGameState)?;

        let agents = self
            .agents
            .unwrap_or_else(|| build_agents(game_state.num_players()));
        if agents.len() != game_state.num_players() {
            return Err(HoldemSimulationError::AgentCountMismatch {
                agents: agents.len(),
                players: game_state.num_players(),
            });
        }

        let deck = match (self.deck, self.rng) {
            (Some(deck), _) => deck,
            (None, Some(mut rng)) => build_deck(&game_state, &mut rng),
            (None, None) => build_deck(&game_state, &mut rand::rng()),
        };

        Ok(HoldemSimulation {
            agents,
            game_state,
            deck,
            historians: self.historians,
            panic_on_historian_error: self.panic_on_historian_error,
        })
    }
}

impl<R: Rng> Default for RngHoldemSimulationBuilder<R> {
    fn default() -> Self {
        Self {
            agents: None,
            historians: vec![],
            game_state: None,
            deck: None,
            rng: None,
            panic_on_historian_error: false,
        }
    }
}

/// The rng is ThreadRng.
pub type HoldemSimulationBuilder = RngHoldemSimulationBuilder<ThreadRng>;
