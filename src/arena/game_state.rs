//! The betting state machine.
//!
//! A hand moves `Starting -> Preflop -> Flop -> Turn -> River -> Showdown ->
//! HandOver`, and jumps straight to `HandOver` as soon as only one player has
//! not folded. Actions are validated completely before anything is changed,
//! so a refused action leaves the state exactly as it was.

use std::fmt;

use tracing::{event, trace_span};

use crate::core::{Card, EvaluatedHand, InputError, evaluate_hand};
use crate::utils::{MAX_PLAYERS, PlayerBitSet};

use super::action::{ActionKind, AgentAction, AwardPayload, ForcedBetPayload, ForcedBetType};
use super::errors::InvalidAction;
use super::pots::{Pot, create_side_pots};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Round {
    Starting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandOver,
}

impl Round {
    pub fn advance(&self) -> Self {
        match *self {
            Round::Starting => Round::Preflop,
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River => Round::Showdown,
            Round::Showdown => Round::HandOver,
            Round::HandOver => Round::HandOver,
        }
    }

    pub fn is_betting(&self) -> bool {
        matches!(
            self,
            Round::Preflop | Round::Flop | Round::Turn | Round::River
        )
    }

    /// Community cards revealed when entering this round.
    pub fn cards_to_deal(&self) -> usize {
        match self {
            Round::Flop => 3,
            Round::Turn | Round::River => 1,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: usize,
    pub stack: u32,
    /// Empty until dealt, then exactly two cards.
    pub hole_cards: Vec<Card>,
    pub is_folded: bool,
    pub is_all_in: bool,
    pub total_bet_this_round: u32,
    pub total_contributed_this_hand: u32,
}

impl Player {
    pub fn new(id: usize, stack: u32) -> Self {
        Self {
            id,
            stack,
            hole_cards: vec![],
            // A player with no chips sits the hand out.
            is_folded: stack == 0,
            is_all_in: false,
            total_bet_this_round: 0,
            total_contributed_this_hand: 0,
        }
    }

    /// A player that has already put `contributed` chips in this hand.
    pub fn with_contribution(id: usize, contributed: u32) -> Self {
        Self {
            id,
            stack: 0,
            hole_cards: vec![],
            is_folded: false,
            is_all_in: true,
            total_bet_this_round: contributed,
            total_contributed_this_hand: contributed,
        }
    }

    /// Can still make decisions this hand.
    pub fn is_active(&self) -> bool {
        !self.is_folded && !self.is_all_in
    }

    fn commit(&mut self, chips: u32) {
        self.stack -= chips;
        self.total_bet_this_round += chips;
        self.total_contributed_this_hand += chips;
        if self.stack == 0 {
            self.is_all_in = true;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundData {
    /// The amount everyone has to match this round.
    pub bet: u32,
    /// The smallest legal raise increment.
    pub min_raise: u32,
    /// Players that still have to act before the round closes.
    pub needs_action: PlayerBitSet,
    /// Players allowed to raise when they act. A short all in removes the
    /// players who had already matched the bet.
    pub may_raise: PlayerBitSet,
    /// The index of the next player to act.
    pub to_act_idx: usize,
}

/// What the acting player may do right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRequest {
    pub idx: usize,
    pub legal_actions: Vec<ActionKind>,
    pub to_call: u32,
    /// Smallest chips for a legal `Raise`. Smaller only as an all in.
    pub min_raise_amount: u32,
    pub max_raise_amount: u32,
}

#[derive(Clone)]
pub struct GameState {
    pub players: Vec<Player>,
    /// Stacks at the start of the hand, before blinds.
    pub starting_stacks: Vec<u32>,
    pub small_blind: u32,
    pub big_blind: u32,
    /// The index of the player who's the dealer
    pub dealer_idx: usize,
    pub hand_number: usize,
    // What round this is currently
    pub round: Round,
    pub round_data: RoundData,
    // The community cards.
    pub board: Vec<Card>,
    /// Chips won by each seat this hand.
    pub player_winnings: Vec<u32>,
    pub awards: Vec<AwardPayload>,
}

impl GameState {
    /// A table with one seat per stack and the button on `dealer_idx`.
    ///
    /// There can be at most `MAX_PLAYERS` seats and the button has to be on
    /// one of them. Both are checked with `debug_assert!`.
    pub fn new(stacks: Vec<u32>, big_blind: u32, small_blind: u32, dealer_idx: usize) -> Self {
        debug_assert!(
            stacks.len() <= MAX_PLAYERS,
            "{} seats is more than the {MAX_PLAYERS} supported",
            stacks.len()
        );
        debug_assert!(
            dealer_idx < stacks.len(),
            "dealer {dealer_idx} is not one of the {} seats",
            stacks.len()
        );
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(id, s)| Player::new(id, *s))
            .collect();
        let num_players = players.len();
        GameState {
            players,
            starting_stacks: stacks,
            small_blind,
            big_blind,
            dealer_idx,
            hand_number: 0,
            round: Round::Starting,
            round_data: RoundData {
                bet: 0,
                min_raise: big_blind,
                needs_action: PlayerBitSet::default(),
                may_raise: PlayerBitSet::default(),
                to_act_idx: dealer_idx,
            },
            board: vec![],
            player_winnings: vec![0; num_players],
            awards: vec![],
        }
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Players that have not folded, in seat order.
    pub fn player_in_hand(&self) -> PlayerBitSet {
        self.seats_where(|p| !p.is_folded)
    }

    /// Players that can still act.
    pub fn player_active(&self) -> PlayerBitSet {
        self.seats_where(Player::is_active)
    }

    fn seats_where<F: Fn(&Player) -> bool>(&self, f: F) -> PlayerBitSet {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| f(p))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn num_players_in_hand(&self) -> usize {
        self.player_in_hand().count()
    }

    pub fn is_complete(&self) -> bool {
        self.round == Round::HandOver
    }

    /// All the betting for the current round is done.
    pub fn is_round_complete(&self) -> bool {
        self.round_data.needs_action.empty()
    }

    pub fn to_call(&self, idx: usize) -> u32 {
        self.players
            .get(idx)
            .map_or(0, |p| self.round_data.bet.saturating_sub(p.total_bet_this_round))
    }

    pub fn total_pot(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.total_contributed_this_hand)
            .sum()
    }

    pub fn pots(&self) -> Vec<Pot> {
        create_side_pots(&self.players)
    }

    pub fn current_player_idx(&self) -> Option<usize> {
        if self.round.is_betting() && !self.round_data.needs_action.empty() {
            Some(self.round_data.to_act_idx)
        } else {
            None
        }
    }

    /// Describe the decision facing the player whose turn it is.
    pub fn turn_request(&self) -> Option<TurnRequest> {
        let idx = self.current_player_idx()?;
        let player = &self.players[idx];
        let to_call = self.to_call(idx);
        let mut legal_actions = vec![ActionKind::Fold];
        if to_call == 0 {
            legal_actions.push(ActionKind::Check);
        } else {
            legal_actions.push(ActionKind::Call);
        }
        if self.round_data.may_raise.get(idx) && player.stack > to_call {
            legal_actions.push(ActionKind::Raise);
        }
        Some(TurnRequest {
            idx,
            legal_actions,
            to_call,
            min_raise_amount: (to_call + self.round_data.min_raise).min(player.stack),
            max_raise_amount: player.stack,
        })
    }

    /// Post the blinds and open pre-flop betting.
    ///
    /// The small blind sits left of the dealer and the big blind left of
    /// that, skipping seats with no chips. Heads up the dealer posts the
    /// small blind. Returns the forced bets actually posted.
    pub fn start_hand(&mut self) -> Vec<ForcedBetPayload> {
        let _span = trace_span!("start_hand", hand = self.hand_number).entered();
        let seated = self.player_in_hand();
        let n = self.num_players();
        if seated.count() < 2 {
            event!(tracing::Level::WARN, "Not enough players to start a hand");
            self.round = Round::HandOver;
            return vec![];
        }

        let sb_idx = if seated.count() == 2 && seated.get(self.dealer_idx) {
            self.dealer_idx
        } else {
            seated.next_after(self.dealer_idx, n).unwrap_or(self.dealer_idx)
        };
        let bb_idx = seated.next_after(sb_idx, n).unwrap_or(sb_idx);

        let mut posted = Vec::with_capacity(2);
        for (idx, blind, forced_bet_type) in [
            (sb_idx, self.small_blind, ForcedBetType::SmallBlind),
            (bb_idx, self.big_blind, ForcedBetType::BigBlind),
        ] {
            let player = &mut self.players[idx];
            let amount = blind.min(player.stack);
            player.commit(amount);
            event!(
                tracing::Level::TRACE,
                idx,
                amount,
                ?forced_bet_type,
                "posted blind"
            );
            posted.push(ForcedBetPayload {
                idx,
                amount,
                forced_bet_type,
            });
        }

        self.round = Round::Preflop;
        let bet = self
            .players
            .iter()
            .map(|p| p.total_bet_this_round)
            .max()
            .unwrap_or(0);
        self.open_round(bet, bb_idx);
        posted
    }

    /// Set up betting for a street. Action starts with the first player that
    /// needs to act after `start_after`.
    fn open_round(&mut self, bet: u32, start_after: usize) {
        let active = self.player_active();
        let needs_action = if active.count() >= 2 {
            active
        } else {
            // A lone active player only acts if they are facing a bet.
            active
                .ones()
                .filter(|idx| bet > self.players[*idx].total_bet_this_round)
                .collect()
        };
        let to_act_idx = needs_action
            .next_after(start_after, self.num_players())
            .unwrap_or(start_after);
        self.round_data = RoundData {
            bet,
            min_raise: self.big_blind,
            needs_action,
            may_raise: needs_action,
            to_act_idx,
        };
    }

    /// Move to the next round once betting has closed. Post-flop action
    /// starts left of the dealer button.
    pub fn advance_round(&mut self) {
        match self.round {
            Round::Starting => {
                self.start_hand();
            }
            Round::HandOver => (),
            _ => {
                for p in self.players.iter_mut() {
                    p.total_bet_this_round = 0;
                }
                self.round = self.round.advance();
                if self.round.is_betting() {
                    self.open_round(0, self.dealer_idx);
                } else {
                    self.round_data.needs_action = PlayerBitSet::default();
                    self.round_data.may_raise = PlayerBitSet::default();
                }
                event!(tracing::Level::TRACE, round = ?self.round, "advanced round");
            }
        }
    }

    pub fn deal_community(&mut self, cards: &[Card]) {
        self.board.extend_from_slice(cards);
    }

    /// Validate and apply an action for `idx`. Returns the chips added to
    /// the pot.
    pub fn apply_action(&mut self, idx: usize, action: AgentAction) -> Result<u32, InvalidAction> {
        let chips = self.validate_action(idx, action)?;
        let previous_bet = self.round_data.bet;
        let previous_needs_action = self.round_data.needs_action;

        match action {
            AgentAction::Fold => {
                self.players[idx].is_folded = true;
                self.round_data.may_raise.disable(idx);
            }
            AgentAction::Check => {}
            AgentAction::Call | AgentAction::Raise(_) => {
                self.players[idx].commit(chips);
            }
        }
        self.round_data.needs_action.disable(idx);

        let new_total = self.players[idx].total_bet_this_round;
        if new_total > previous_bet {
            let increment = new_total - previous_bet;
            let full_raise = increment >= self.round_data.min_raise;
            if full_raise {
                self.round_data.min_raise = increment;
            }
            self.round_data.bet = new_total;
            for other in self.player_active().ones().filter(|o| *o != idx) {
                self.round_data.needs_action.enable(other);
                if full_raise {
                    self.round_data.may_raise.enable(other);
                } else if !previous_needs_action.get(other) {
                    // Already matched the old bet; a short all in doesn't
                    // give them another raise.
                    self.round_data.may_raise.disable(other);
                }
            }
        }
        if self.players[idx].is_all_in {
            self.round_data.may_raise.disable(idx);
        }

        event!(
            tracing::Level::TRACE,
            idx,
            ?action,
            chips,
            stack = self.players[idx].stack,
            "applied action"
        );

        if self.num_players_in_hand() == 1 {
            // Everyone else folded. Pots with one eligible player are never
            // shown down.
            self.round_data.needs_action = PlayerBitSet::default();
            let unranked = vec![None; self.num_players()];
            self.award_pots(&unranked);
        } else if let Some(next) = self
            .round_data
            .needs_action
            .next_after(idx, self.num_players())
        {
            self.round_data.to_act_idx = next;
        }
        Ok(chips)
    }

    fn validate_action(&self, idx: usize, action: AgentAction) -> Result<u32, InvalidAction> {
        if !self.round.is_betting() {
            return Err(InvalidAction::NotBettingRound(self.round));
        }
        let player = self.players.get(idx).ok_or(InvalidAction::UnknownPlayer(idx))?;
        if !player.is_active() {
            return Err(InvalidAction::PlayerNotActive(idx));
        }
        if idx != self.round_data.to_act_idx || !self.round_data.needs_action.get(idx) {
            return Err(InvalidAction::NotPlayersTurn {
                expected: self.round_data.to_act_idx,
                got: idx,
            });
        }

        let to_call = self.to_call(idx);
        match action {
            AgentAction::Fold => Ok(0),
            AgentAction::Check if to_call > 0 => Err(InvalidAction::CheckFacingBet { to_call }),
            AgentAction::Check => Ok(0),
            // A short call puts the player all in.
            AgentAction::Call => Ok(to_call.min(player.stack)),
            AgentAction::Raise(amount) => {
                let chips = amount.min(player.stack);
                let all_in = chips == player.stack;
                if chips <= to_call {
                    return if all_in {
                        // Shoving for less than a call is just a call.
                        Ok(chips)
                    } else {
                        Err(InvalidAction::RaiseDoesNotExceedCall { amount, to_call })
                    };
                }
                if !self.round_data.may_raise.get(idx) {
                    return Err(InvalidAction::RaiseNotAllowed);
                }
                let minimum = to_call + self.round_data.min_raise;
                if chips < minimum && !all_in {
                    return Err(InvalidAction::RaiseBelowMinimum { amount, minimum });
                }
                Ok(chips)
            }
        }
    }

    /// Split every pot between the best hands eligible for it, then end the
    /// hand. Pots with a single eligible player are awarded without looking
    /// at cards. A pot no one can win goes back to the players who paid
    /// into it.
    ///
    /// Odd chips go one at a time to the winners in seat order starting left
    /// of the dealer.
    pub fn distribute_pots(&mut self) -> Result<Vec<AwardPayload>, InputError> {
        // Rank everything first so an error leaves the state untouched.
        let ranked = self.rank_hands()?;
        Ok(self.award_pots(&ranked))
    }

    fn rank_hands(&self) -> Result<Vec<Option<EvaluatedHand>>, InputError> {
        let mut ranked = vec![None; self.num_players()];
        if self.num_players_in_hand() < 2 {
            return Ok(ranked);
        }
        for idx in self.player_in_hand().ones() {
            let mut cards = self.players[idx].hole_cards.clone();
            cards.extend_from_slice(&self.board);
            ranked[idx] = Some(evaluate_hand(&cards)?);
        }
        Ok(ranked)
    }

    fn award_pots(&mut self, ranked: &[Option<EvaluatedHand>]) -> Vec<AwardPayload> {
        let n = self.num_players();
        let dealer_idx = self.dealer_idx;
        let seat_order = |idx: &usize| (idx + n - dealer_idx - 1) % n;

        let mut awards = vec![];
        let mut previous_level = 0;
        for (pot_idx, pot) in self.pots().iter().enumerate() {
            let tier = pot.level - previous_level;
            previous_level = pot.level;

            if pot.eligible.is_empty() {
                for p in self
                    .players
                    .iter()
                    .filter(|p| p.total_contributed_this_hand >= pot.level)
                {
                    awards.push(AwardPayload {
                        pot_idx,
                        idx: p.id,
                        amount: tier,
                        hand: None,
                    });
                }
                continue;
            }

            let (mut winners, hand) = if pot.eligible.len() == 1 {
                (pot.eligible.clone(), None)
            } else {
                let best = pot.eligible.iter().filter_map(|idx| ranked[*idx]).max();
                let winners: Vec<usize> = pot
                    .eligible
                    .iter()
                    .copied()
                    .filter(|idx| ranked[*idx] == best)
                    .collect();
                (winners, best)
            };
            winners.sort_by_key(seat_order);

            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount as usize % winners.len();
            for (i, idx) in winners.iter().enumerate() {
                awards.push(AwardPayload {
                    pot_idx,
                    idx: *idx,
                    amount: share + u32::from(i < remainder),
                    hand,
                });
            }
        }

        for award in &awards {
            self.players[award.idx].stack += award.amount;
            self.player_winnings[award.idx] += award.amount;
            event!(
                tracing::Level::INFO,
                idx = award.idx,
                amount = award.amount,
                pot = award.pot_idx,
                "awarded pot"
            );
        }
        self.awards.extend(awards.iter().cloned());
        self.round = Round::HandOver;
        awards
    }

    /// Hole cards of every seat, for callers that want a plain view.
    pub fn hole_cards(&self, idx: usize) -> &[Card] {
        self.players
            .get(idx)
            .map_or(&[][..], |p| p.hole_cards.as_slice())
    }

    pub fn stacks(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.stack).collect()
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("num_players", &self.num_players())
            .field("players", &self.players)
            .field("total_pot", &self.total_pot())
            .field("big_blind", &self.big_blind)
            .field("small_blind", &self.small_blind)
            .field("dealer_idx", &self.dealer_idx)
            .field("hand_number", &self.hand_number)
            .field("round", &self.round)
            .field("round_data", &self.round_data)
            .field("board", &self.board)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test_util::{assert_valid_game_state, assert_valid_round_data};
    use crate::core::Hand;

    fn deal(gs: &mut GameState, idx: usize, s: &str) {
        gs.players[idx].hole_cards = Hand::new_from_str(s).unwrap().cards();
    }

    fn act(gs: &mut GameState, action: AgentAction) -> u32 {
        let idx = gs.round_data.to_act_idx;
        let chips = gs.apply_action(idx, action).unwrap();
        assert_valid_game_state(gs);
        assert_valid_round_data(gs);
        chips
    }

    /// Check every remaining street through to showdown.
    fn check_down(gs: &mut GameState) {
        while gs.round != Round::Showdown {
            while !gs.is_round_complete() {
                act(gs, AgentAction::Check);
            }
            gs.advance_round();
        }
    }

    #[test_log::test]
    fn test_blinds_and_first_to_act() {
        let mut gs = GameState::new(vec![100; 4], 10, 5, 0);
        let posted = gs.start_hand();
        assert_eq!(2, posted.len());
        assert_eq!(Round::Preflop, gs.round);
        // 0 dealer, 1 small blind, 2 big blind, 3 first to act
        assert_eq!(95, gs.players[1].stack);
        assert_eq!(90, gs.players[2].stack);
        assert_eq!(3, gs.round_data.to_act_idx);
        assert_eq!(10, gs.to_call(3));
        assert_eq!(5, gs.to_call(1));
        assert_eq!(0, gs.to_call(2));
        assert_valid_game_state(&gs);
    }

    #[test_log::test]
    fn test_heads_up_dealer_posts_small_blind() {
        let mut gs = GameState::new(vec![100, 100], 10, 5, 1);
        gs.start_hand();
        assert_eq!(95, gs.players[1].stack);
        assert_eq!(90, gs.players[0].stack);
        // The dealer acts first pre-flop.
        assert_eq!(1, gs.round_data.to_act_idx);

        act(&mut gs, AgentAction::Call);
        // Big blind gets the option.
        assert_eq!(0, gs.round_data.to_act_idx);
        act(&mut gs, AgentAction::Check);
        assert!(gs.is_round_complete());

        gs.advance_round();
        assert_eq!(Round::Flop, gs.round);
        // Post-flop the non-dealer acts first.
        assert_eq!(0, gs.round_data.to_act_idx);
    }

    #[test_log::test]
    fn test_busted_seats_are_skipped() {
        let mut gs = GameState::new(vec![100, 0, 100, 100], 10, 5, 0);
        assert!(gs.players[1].is_folded);
        gs.start_hand();
        assert_eq!(95, gs.players[2].stack);
        assert_eq!(90, gs.players[3].stack);
        assert_eq!(0, gs.round_data.to_act_idx);
    }

    #[test_log::test]
    fn test_fold_around_call() {
        let mut gs = GameState::new(vec![100; 4], 10, 5, 1);
        gs.start_hand();

        // 0 player, 1 dealer, 2 small blind, 3 big blind
        assert_eq!(0, gs.round_data.to_act_idx);
        act(&mut gs, AgentAction::Fold);
        act(&mut gs, AgentAction::Fold);
        act(&mut gs, AgentAction::Call);
        act(&mut gs, AgentAction::Check);
        assert!(gs.is_round_complete());
        assert_eq!(2, gs.num_players_in_hand());

        for expected in [Round::Flop, Round::Turn, Round::River] {
            gs.advance_round();
            assert_eq!(expected, gs.round);
            assert_eq!(2, gs.round_data.to_act_idx);
            act(&mut gs, AgentAction::Check);
            assert_eq!(3, gs.round_data.to_act_idx);
            act(&mut gs, AgentAction::Check);
            assert!(gs.is_round_complete());
        }

        gs.advance_round();
        assert_eq!(Round::Showdown, gs.round);
    }

    #[test_log::test]
    fn test_everyone_folds_to_big_blind() {
        let mut gs = GameState::new(vec![100; 3], 10, 5, 0);
        gs.start_hand();
        act(&mut gs, AgentAction::Fold);
        act(&mut gs, AgentAction::Fold);

        assert_eq!(Round::HandOver, gs.round);
        assert_eq!(105, gs.players[2].stack);
        assert_eq!(15, gs.player_winnings[2]);
        // Blinds make two tiers, both uncontested.
        assert_eq!(2, gs.awards.len());
        assert!(gs.awards.iter().all(|a| a.idx == 2 && a.hand.is_none()));
        // No more actions are accepted.
        assert_eq!(
            Err(InvalidAction::NotBettingRound(Round::HandOver)),
            gs.apply_action(0, AgentAction::Check)
        );
    }

    #[test_log::test]
    fn test_rejected_actions_leave_state_unchanged() {
        let mut gs = GameState::new(vec![500; 5], 20, 10, 0);
        gs.start_hand();
        let before = gs.clone();
        let idx = gs.round_data.to_act_idx;
        assert_eq!(3, idx);

        assert_eq!(
            Err(InvalidAction::NotPlayersTurn {
                expected: 3,
                got: 4
            }),
            gs.apply_action(4, AgentAction::Call)
        );
        assert_eq!(
            Err(InvalidAction::CheckFacingBet { to_call: 20 }),
            gs.apply_action(idx, AgentAction::Check)
        );
        // The min raise is the big blind, so raising by 13 isn't enough.
        assert_eq!(
            Err(InvalidAction::RaiseBelowMinimum {
                amount: 33,
                minimum: 40
            }),
            gs.apply_action(idx, AgentAction::Raise(33))
        );
        assert_eq!(
            Err(InvalidAction::RaiseDoesNotExceedCall {
                amount: 15,
                to_call: 20
            }),
            gs.apply_action(idx, AgentAction::Raise(15))
        );
        assert_eq!(
            Err(InvalidAction::UnknownPlayer(9)),
            gs.apply_action(9, AgentAction::Fold)
        );

        assert_eq!(before.players, gs.players);
        assert_eq!(before.round_data, gs.round_data);
    }

    #[test_log::test]
    fn test_raise_reopens_action() {
        let mut gs = GameState::new(vec![1000; 3], 10, 5, 0);
        gs.start_hand();
        // 0 dealer first to act with three players.
        assert_eq!(0, gs.round_data.to_act_idx);
        assert_eq!(40, act(&mut gs, AgentAction::Raise(40)));
        assert_eq!(30, gs.round_data.min_raise);
        act(&mut gs, AgentAction::Call);
        // Big blind re-raises by the minimum.
        assert_eq!(2, gs.round_data.to_act_idx);
        assert_eq!(60, act(&mut gs, AgentAction::Raise(60)));
        assert_eq!(70, gs.round_data.bet);
        // Everyone else needs to act again.
        assert_eq!(2, gs.round_data.needs_action.count());
        assert_eq!(0, gs.round_data.to_act_idx);
        act(&mut gs, AgentAction::Call);
        act(&mut gs, AgentAction::Call);
        assert!(gs.is_round_complete());
        assert_eq!(210, gs.total_pot());
    }

    #[test_log::test]
    fn test_short_all_in_does_not_reopen_raising() {
        let mut gs = GameState::new(vec![1000, 40, 1000], 10, 5, 0);
        gs.start_hand();
        act(&mut gs, AgentAction::Raise(30));
        assert_eq!(20, gs.round_data.min_raise);
        // Small blind has 35 behind; going all in makes 40 total, a raise of
        // 10 which is short of the 20 minimum.
        assert_eq!(35, act(&mut gs, AgentAction::Raise(35)));
        assert!(gs.players[1].is_all_in);
        assert_eq!(40, gs.round_data.bet);
        assert_eq!(20, gs.round_data.min_raise);

        // Big blind hasn't acted yet so they keep the right to raise.
        assert_eq!(2, gs.round_data.to_act_idx);
        assert!(gs.round_data.may_raise.get(2));
        act(&mut gs, AgentAction::Call);

        // The dealer already matched 30 so can only call or fold.
        assert_eq!(0, gs.round_data.to_act_idx);
        let req = gs.turn_request().unwrap();
        assert!(!req.legal_actions.contains(&ActionKind::Raise));
        assert_eq!(
            Err(InvalidAction::RaiseNotAllowed),
            gs.apply_action(0, AgentAction::Raise(200))
        );
        act(&mut gs, AgentAction::Call);
        assert!(gs.is_round_complete());
    }

    #[test_log::test]
    fn test_short_call_goes_all_in() {
        let mut gs = GameState::new(vec![1000, 1000, 25], 10, 5, 0);
        gs.start_hand();
        act(&mut gs, AgentAction::Raise(100));
        act(&mut gs, AgentAction::Fold);
        // Big blind has 15 behind and calls for less.
        assert_eq!(15, act(&mut gs, AgentAction::Call));
        assert!(gs.players[2].is_all_in);
        assert!(gs.is_round_complete());

        // The folded small blind paid into the lowest tier.
        let pots = gs.pots();
        assert_eq!(
            vec![15, 40, 75],
            pots.iter().map(|p| p.amount).collect::<Vec<_>>()
        );
        assert_eq!(vec![0, 2], pots[0].eligible);
        assert_eq!(vec![0, 2], pots[1].eligible);
        assert_eq!(vec![0], pots[2].eligible);

        // With one active player left there's no more betting.
        gs.advance_round();
        assert!(gs.is_round_complete());
    }

    #[test_log::test]
    fn test_raise_over_stack_is_all_in() {
        let mut gs = GameState::new(vec![100, 100], 10, 5, 0);
        gs.start_hand();
        assert_eq!(95, act(&mut gs, AgentAction::Raise(500)));
        assert!(gs.players[0].is_all_in);
        let req = gs.turn_request().unwrap();
        assert_eq!(90, req.to_call);
        act(&mut gs, AgentAction::Call);
        assert!(gs.is_round_complete());
        assert_eq!(200, gs.total_pot());
    }

    #[test_log::test]
    fn test_turn_request() {
        let mut gs = GameState::new(vec![100; 3], 10, 5, 0);
        assert_eq!(None, gs.turn_request());
        gs.start_hand();
        let req = gs.turn_request().unwrap();
        assert_eq!(0, req.idx);
        assert_eq!(10, req.to_call);
        assert_eq!(
            vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
            req.legal_actions
        );
        assert_eq!(20, req.min_raise_amount);
        assert_eq!(100, req.max_raise_amount);
    }

    #[test_log::test]
    fn test_showdown_split_with_odd_chip() {
        let mut gs = GameState::new(vec![100; 3], 10, 5, 0);
        gs.start_hand();
        deal(&mut gs, 0, "2c3d");
        deal(&mut gs, 1, "4h4d");
        deal(&mut gs, 2, "2d3c");
        act(&mut gs, AgentAction::Call);
        // Small blind folds leaving an odd 25 chip pot.
        act(&mut gs, AgentAction::Fold);
        act(&mut gs, AgentAction::Check);
        gs.advance_round();
        gs.deal_community(&Hand::new_from_str("AsKsQsJhTh").unwrap().cards());
        check_down(&mut gs);

        // The board straight is shared by both remaining players.
        gs.distribute_pots().unwrap();
        assert_eq!(Round::HandOver, gs.round);
        // Seat 2 is the first winner left of the dealer so gets the odd chip
        // of each tier.
        assert_eq!(13, gs.player_winnings[2]);
        assert_eq!(12, gs.player_winnings[0]);
        assert_eq!(0, gs.player_winnings[1]);
        assert_eq!(103, gs.players[2].stack);
        assert_eq!(102, gs.players[0].stack);
        assert_eq!(95, gs.players[1].stack);
        assert!(gs.awards.iter().all(|a| a.hand.is_some()));
        assert_valid_game_state(&gs);
    }

    #[test_log::test]
    fn test_all_in_winner_only_takes_eligible_pots() {
        let mut gs = GameState::new(vec![50, 200, 200], 10, 5, 0);
        gs.start_hand();
        deal(&mut gs, 0, "AsAd");
        deal(&mut gs, 1, "KsKd");
        deal(&mut gs, 2, "7c2h");
        act(&mut gs, AgentAction::Raise(50));
        act(&mut gs, AgentAction::Raise(195));
        act(&mut gs, AgentAction::Call);
        assert!(gs.is_round_complete());
        gs.advance_round();
        gs.deal_community(&Hand::new_from_str("3c8d9hJsQc").unwrap().cards());
        check_down(&mut gs);
        gs.distribute_pots().unwrap();
        // Aces win the 150 main pot, kings the 300 side pot.
        assert_eq!(150, gs.players[0].stack);
        assert_eq!(300, gs.players[1].stack);
        assert_eq!(0, gs.players[2].stack);
        assert_valid_game_state(&gs);
    }

    #[test_log::test]
    fn test_tier_nobody_can_win_is_refunded() {
        let mut gs = GameState::new(vec![1000, 1000, 20], 10, 5, 0);
        gs.start_hand();
        deal(&mut gs, 0, "AsAd");
        deal(&mut gs, 1, "KsKd");
        deal(&mut gs, 2, "7c2h");
        act(&mut gs, AgentAction::Raise(100));
        act(&mut gs, AgentAction::Call);
        // Short stack calls all in for 20 total.
        assert_eq!(10, act(&mut gs, AgentAction::Call));
        assert!(gs.is_round_complete());
        gs.advance_round();
        gs.deal_community(&Hand::new_from_str("3c8d9h").unwrap().cards());

        // Both big stacks fold, so nobody left can win the 160 above 20.
        assert_eq!(1, gs.round_data.to_act_idx);
        act(&mut gs, AgentAction::Fold);
        act(&mut gs, AgentAction::Fold);

        assert_eq!(Round::HandOver, gs.round);
        assert_eq!(vec![980, 980, 60], gs.stacks());
        assert_eq!(
            vec![(0, 2, 60), (1, 0, 80), (1, 1, 80)],
            gs.awards
                .iter()
                .map(|a| (a.pot_idx, a.idx, a.amount))
                .collect::<Vec<_>>()
        );
        assert!(gs.awards.iter().all(|a| a.hand.is_none()));
        assert_valid_game_state(&gs);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "is not one of the")]
    fn test_dealer_must_be_seated() {
        GameState::new(vec![100; 3], 10, 5, 3);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "supported")]
    fn test_too_many_seats() {
        GameState::new(vec![100; MAX_PLAYERS + 1], 10, 5, 0);
    }
}
