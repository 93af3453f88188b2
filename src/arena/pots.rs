use super::game_state::Player;

/// One tier of the pot.
///
/// `level` is the per-player contribution ceiling of this tier. Everyone who
/// put in at least `level` chips paid into it; only those who have not folded
/// can win it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pot {
    pub amount: u32,
    pub level: u32,
    /// Player ids in seat order.
    pub eligible: Vec<usize>,
}

/// Split the chips contributed this hand into a main pot and side pots,
/// ordered by ascending contribution level.
///
/// For each distinct contribution level `L` with previous level `P` the tier
/// holds `(L - P)` from every player who contributed at least `L`. Folded
/// players pay into tiers but are never eligible, so the tiers always add up
/// to the total contributed.
///
/// ```
/// use holdem_bots::arena::game_state::Player;
/// use holdem_bots::arena::pots::create_side_pots;
///
/// let players: Vec<Player> = [30, 70, 100]
///     .iter()
///     .enumerate()
///     .map(|(id, c)| Player::with_contribution(id, *c))
///     .collect();
/// let pots = create_side_pots(&players);
/// assert_eq!(vec![90, 80, 30], pots.iter().map(|p| p.amount).collect::<Vec<_>>());
/// assert_eq!(vec![0, 1, 2], pots[0].eligible);
/// assert_eq!(vec![2], pots[2].eligible);
/// ```
pub fn create_side_pots(players: &[Player]) -> Vec<Pot> {
    let mut levels: Vec<u32> = players
        .iter()
        .map(|p| p.total_contributed_this_hand)
        .filter(|c| *c > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::with_capacity(levels.len());
    let mut previous = 0;
    for level in levels {
        let contributors = players
            .iter()
            .filter(|p| p.total_contributed_this_hand >= level)
            .count() as u32;
        let eligible = players
            .iter()
            .filter(|p| p.total_contributed_this_hand >= level && !p.is_folded)
            .map(|p| p.id)
            .collect();
        pots.push(Pot {
            amount: (level - previous) * contributors,
            level,
            eligible,
        });
        previous = level;
    }
    pots
}
