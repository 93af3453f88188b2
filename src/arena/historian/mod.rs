use thiserror::Error;

use super::{GameState, action::Action};

/// HistorianError is the error type for historian implementations.
#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("Borrow Mut Error: {0}")]
    BorrowMutError(#[from] std::cell::BorrowMutError),
    #[error("Borrow Error: {0}")]
    BorrowError(#[from] std::cell::BorrowError),
}

/// Historians are the event sink of a simulation. They are told about
/// everything that happens in a hand, which makes them the place for
/// logging, debugging or replay.
pub trait Historian {
    /// Called by the simulation after each event.
    ///
    /// # Arguments
    /// - `game_state` - The game state after the event
    /// - `action` - What happened
    ///
    /// Returning an error drops the historian from the simulation.
    fn record_action(&mut self, game_state: &GameState, action: Action)
    -> Result<(), HistorianError>;
}

/// Builds a historian for each hand of a tournament.
pub trait HistorianGenerator {
    fn generate(&self, game_state: &GameState) -> Box<dyn Historian>;
}

/// Hands out a clone of the same historian for every hand. Clones of a
/// `VecHistorian` share storage, so this collects a whole tournament.
pub struct CloneHistorianGenerator<T> {
    historian: T,
}

impl<T> CloneHistorianGenerator<T>
where
    T: Historian + Clone + 'static,
{
    pub fn new(historian: T) -> Self {
        Self { historian }
    }
}

impl<T> HistorianGenerator for CloneHistorianGenerator<T>
where
    T: Historian + Clone + 'static,
{
    fn generate(&self, _game_state: &GameState) -> Box<dyn Historian> {
        Box::new(self.historian.clone())
    }
}

mod fn_historian;
mod vec;

pub use fn_historian::FnHistorian;
pub use vec::{HistoryRecord, VecHistorian};
