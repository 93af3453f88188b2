use crate::core::{Card, CardBitSet, InputError, evaluate_hand};
use crate::holdem::StartingHand;

/// How good `hole` is on `community`, in `[0, 1]`.
///
/// Before the flop this is the static starting hand strength. Afterwards
/// it's the strength of the best five card hand, by category and then by
/// kickers.
pub fn hand_strength(hole: &[Card], community: &[Card]) -> Result<f64, InputError> {
    if hole.len() != 2 {
        return Err(InputError::HoleCardCount(hole.len()));
    }
    if !matches!(community.len(), 0 | 3 | 4 | 5) {
        return Err(InputError::CommunityCardCount(community.len()));
    }
    let mut cards = hole.to_vec();
    cards.extend_from_slice(community);
    CardBitSet::from_unique(&cards)?;

    if community.is_empty() {
        Ok(StartingHand::from_cards(hole[0], hole[1]).strength())
    } else {
        Ok(evaluate_hand(&cards)?.strength())
    }
}
