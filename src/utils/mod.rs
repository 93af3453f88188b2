mod player_bit_set;

pub use player_bit_set::{ActivePlayerBitSetIter, MAX_PLAYERS, PlayerBitSet};
