use std::{cell::RefCell, rc::Rc};

use crate::arena::{GameState, action::Action};

use super::{Historian, HistorianError};

#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub before_game_state: Option<GameState>,
    pub action: Action,
    pub after_game_state: GameState,
}

/// VecHistorian is a historian that will
/// append each action to a vector.
#[derive(Clone)]
pub struct VecHistorian {
    previous: Option<GameState>,
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    /// Create a new storage for the historian
    /// that can be introspected later.
    pub fn new_storage() -> Rc<RefCell<Vec<HistoryRecord>>> {
        Rc::new(RefCell::new(vec![]))
    }

    /// Create a new VecHistorian with the provided storage
    /// `Rc<RefCell<Vec<HistoryRecord>>>`
    pub fn new(actions: Rc<RefCell<Vec<HistoryRecord>>>) -> Self {
        Self {
            records: actions,
            previous: None,
        }
    }
}

impl Historian for VecHistorian {
    fn record_action(
        &mut self,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError> {
        let mut act = self.records.try_borrow_mut()?;

        act.push(HistoryRecord {
            before_game_state: self.previous.clone(),
            action,
            after_game_state: game_state.clone(),
        });

        // Record the game state for the next action
        self.previous = Some(game_state.clone());
        Ok(())
    }
}
