use std::fmt;

use crate::utils::PlayerBitSet;

/// Where a seat acts relative to the button among the players who can still
/// act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionClass {
    Early,
    Middle,
    Late,
}

impl PositionClass {
    /// Scales the fold threshold. Late position plays looser.
    pub fn multiplier(&self) -> f64 {
        match self {
            PositionClass::Early => 0.50,
            PositionClass::Middle => 0.80,
            PositionClass::Late => 1.30,
        }
    }

    /// Classify `seat` by its distance from the button.
    ///
    /// The seats in `active` (plus `seat` itself) are ordered starting left
    /// of the dealer, so the button comes last. The last third of that order
    /// is late, the first third early and anything between middle.
    pub fn classify(
        seat: usize,
        dealer_idx: usize,
        active: PlayerBitSet,
        num_players: usize,
    ) -> Self {
        let mut seats = active;
        seats.enable(seat);
        let mut order = Vec::with_capacity(num_players);
        let mut idx = dealer_idx;
        while let Some(next) = seats.next_after(idx, num_players) {
            if order.contains(&next) {
                break;
            }
            order.push(next);
            idx = next;
        }

        let n = order.len();
        let i = order.iter().position(|s| *s == seat).unwrap_or(n - 1);
        let third = n.div_ceil(3);
        if i >= n - third {
            PositionClass::Late
        } else if i < third {
            PositionClass::Early
        } else {
            PositionClass::Middle
        }
    }
}

impl fmt::Display for PositionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PositionClass::Early => "early",
            PositionClass::Middle => "middle",
            PositionClass::Late => "late",
        };
        f.write_str(s)
    }
}
