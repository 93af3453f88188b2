use tracing::{event, trace_span};

use crate::core::{Card, Deck};

use super::Agent;
use super::GameState;
use super::action::{
    Action, AgentAction, FailedActionPayload, GameStartPayload, PlayedActionPayload,
};
use super::errors::HoldemSimulationError;
use super::game_state::Round;
use super::historian::Historian;

/// Drives a single hand from blinds to the award of every pot.
///
/// Agents are asked for an action whenever it's their seat's turn. Each
/// thing that happens is logged with `tracing` and handed to every
/// historian along with the game state after it happened.
pub struct HoldemSimulation {
    pub(crate) agents: Vec<Box<dyn Agent>>,
    pub game_state: GameState,
    pub deck: Deck,
    pub(crate) historians: Vec<Box<dyn Historian>>,
    pub(crate) panic_on_historian_error: bool,
}

impl HoldemSimulation {
    pub fn more_rounds(&self) -> bool {
        !self.game_state.is_complete()
    }

    /// Play the hand to the end.
    pub fn run(&mut self) -> Result<(), HoldemSimulationError> {
        let _span = trace_span!("HoldemSimulation::run", hand = self.game_state.hand_number)
            .entered();
        while self.more_rounds() {
            self.step()?;
        }
        Ok(())
    }

    /// Advance through one round of the hand.
    pub fn step(&mut self) -> Result<(), HoldemSimulationError> {
        match self.game_state.round {
            Round::Starting => self.start()?,
            Round::Preflop | Round::Flop | Round::Turn | Round::River => {
                self.run_betting_round();
                if self.game_state.is_complete() {
                    self.finish_hand();
                } else {
                    self.advance_round()?;
                }
            }
            Round::Showdown => {
                self.game_state.distribute_pots()?;
                self.finish_hand();
            }
            Round::HandOver => (),
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), HoldemSimulationError> {
        self.record_action(Action::GameStart(GameStartPayload {
            hand_number: self.game_state.hand_number,
            dealer_idx: self.game_state.dealer_idx,
            small_blind: self.game_state.small_blind,
            big_blind: self.game_state.big_blind,
        }));

        for forced in self.game_state.start_hand() {
            self.record_action(Action::ForcedBet(forced));
        }
        if self.game_state.is_complete() {
            self.record_action(Action::HandOver);
            return Ok(());
        }

        // Deal starting left of the dealer. Seats that already hold cards
        // keep them.
        let n = self.game_state.num_players();
        let in_hand = self.game_state.player_in_hand();
        for offset in 1..=n {
            let idx = (self.game_state.dealer_idx + offset) % n;
            if !in_hand.get(idx) || self.game_state.players[idx].hole_cards.len() == 2 {
                continue;
            }
            let dealt = self.deck.draw(2)?;
            let cards = [dealt[0], dealt[1]];
            self.game_state.players[idx].hole_cards = dealt;
            event!(
                tracing::Level::TRACE,
                idx,
                hand = %format!("{}{}", cards[0], cards[1]),
                "dealt starting hand"
            );
            self.record_action(Action::DealStartingHand { idx, cards });
        }
        Ok(())
    }

    fn run_betting_round(&mut self) {
        while let Some(idx) = self.game_state.current_player_idx() {
            let action = self.agents[idx].act(&self.game_state);
            match self.game_state.apply_action(idx, action) {
                Ok(chips_added) => self.record_played(idx, action, chips_added),
                Err(error) => {
                    event!(
                        tracing::Level::WARN,
                        idx,
                        ?action,
                        %error,
                        "Agent action rejected, folding"
                    );
                    self.record_action(Action::FailedAction(FailedActionPayload {
                        idx,
                        action,
                        error,
                    }));
                    // Folding is always legal for the player holding the turn.
                    match self.game_state.apply_action(idx, AgentAction::Fold) {
                        Ok(_) => self.record_played(idx, AgentAction::Fold, 0),
                        Err(error) => {
                            event!(tracing::Level::ERROR, idx, %error, "Unable to fold");
                            return;
                        }
                    }
                }
            }
        }
    }

    fn record_played(&mut self, idx: usize, action: AgentAction, chips_added: u32) {
        let payload = PlayedActionPayload {
            idx,
            action,
            chips_added,
            player_stack: self.game_state.players[idx].stack,
            total_pot: self.game_state.total_pot(),
        };
        self.record_action(Action::PlayedAction(payload));
    }

    fn advance_round(&mut self) -> Result<(), HoldemSimulationError> {
        self.game_state.advance_round();
        self.record_action(Action::RoundAdvance(self.game_state.round));

        let target = match self.game_state.round {
            Round::Flop => 3,
            Round::Turn => 4,
            Round::River => 5,
            _ => return Ok(()),
        };
        let needed = target - self.game_state.board.len().min(target);
        let cards: Vec<Card> = self.deck.draw(needed)?;
        self.game_state.deal_community(&cards);
        for card in cards {
            event!(tracing::Level::TRACE, %card, "dealt community card");
            self.record_action(Action::DealCommunity(card));
        }
        Ok(())
    }

    fn finish_hand(&mut self) {
        for award in self.game_state.awards.clone() {
            self.record_action(Action::Award(award));
        }
        event!(
            tracing::Level::INFO,
            hand = self.game_state.hand_number,
            winnings = ?self.game_state.player_winnings,
            "Hand over"
        );
        self.record_action(Action::HandOver);
    }

    fn record_action(&mut self, action: Action) {
        let mut failed = vec![];
        for (i, historian) in self.historians.iter_mut().enumerate() {
            if let Err(error) = historian.record_action(&self.game_state, action.clone()) {
                if self.panic_on_historian_error {
                    panic!("Historian failed to record {action:?}: {error}");
                }
                event!(tracing::Level::WARN, %error, "Dropping historian");
                failed.push(i);
            }
        }
        for i in failed.into_iter().rev() {
            self.historians.remove(i);
        }
    }
}
