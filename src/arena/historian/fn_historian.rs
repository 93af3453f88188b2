use crate::arena::{GameState, action::Action};

use super::{Historian, HistorianError};

/// A historian that hands every event to a closure. Handy for tests and
/// for forwarding events somewhere else.
#[derive(Debug, Clone)]
pub struct FnHistorian<F> {
    func: F,
}

impl<F: Fn(&GameState, Action) -> Result<(), HistorianError>> FnHistorian<F> {
    pub fn new(f: F) -> Self {
        Self { func: f }
    }
}

impl<F: Fn(&GameState, Action) -> Result<(), HistorianError>> Historian for FnHistorian<F> {
    fn record_action(
        &mut self,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError> {
        (self.func)(game_state, action)
    }
}
