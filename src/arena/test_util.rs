use super::game_state::{GameState, Round};

/// Chips are never created or destroyed and pots always account for every
/// contributed chip.
pub fn assert_valid_game_state(game_state: &GameState) {
    let starting: u32 = game_state.starting_stacks.iter().sum();
    let stacks: u32 = game_state.players.iter().map(|p| p.stack).sum();
    if game_state.round == Round::HandOver {
        assert_eq!(starting, stacks);
    } else {
        assert_eq!(starting, stacks + game_state.total_pot());
    }

    let pots = game_state.pots();
    let in_pots: u32 = pots.iter().map(|p| p.amount).sum();
    assert_eq!(game_state.total_pot(), in_pots);

    for (idx, player) in game_state.players.iter().enumerate() {
        assert_eq!(idx, player.id);
        // Someone with no chips left can't still be making decisions.
        assert!(!(player.stack == 0 && player.is_active()));
        if player.is_folded {
            assert!(pots.iter().all(|p| !p.eligible.contains(&idx)));
        }
    }

    assert!(game_state.board.len() <= 5);
}

pub fn assert_valid_round_data(game_state: &GameState) {
    if !game_state.round.is_betting() {
        return;
    }
    let round_data = &game_state.round_data;
    for (idx, player) in game_state.players.iter().enumerate() {
        assert!(player.total_bet_this_round <= round_data.bet);
        // Everyone done acting this round has matched the bet.
        if player.is_active() && !round_data.needs_action.get(idx) {
            assert_eq!(round_data.bet, player.total_bet_this_round);
        }
        if round_data.needs_action.get(idx) {
            assert!(player.is_active());
        }
    }
    if !round_data.needs_action.empty() {
        assert!(round_data.needs_action.get(round_data.to_act_idx));
    }
}
