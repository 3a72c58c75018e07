//! Handoff of the opening selection from match setup to the scoring session.

use std::collections::HashMap;
use std::sync::RwLock;

use scoring_core::{Crease, MatchId, PlayerId};

use crate::repository::{RepositoryError, Result};

/// Openers and opening bowler chosen during match setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningSelection {
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

impl OpeningSelection {
    pub fn crease(&self) -> Crease {
        Crease::new(self.striker, self.non_striker, self.bowler)
    }
}

/// Key-value bridge keyed by match id. A session reads its entry once, on
/// open, and the entry is gone afterwards.
#[derive(Debug, Default)]
pub struct SetupBridge {
    pending: RwLock<HashMap<MatchId, OpeningSelection>>,
}

impl SetupBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the selection for `match_id`, replacing any earlier one.
    pub fn put(&self, match_id: MatchId, selection: OpeningSelection) -> Result<()> {
        let mut pending = self
            .pending
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        pending.insert(match_id, selection);
        Ok(())
    }

    pub fn peek(&self, match_id: MatchId) -> Result<Option<OpeningSelection>> {
        let pending = self
            .pending
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(pending.get(&match_id).copied())
    }

    /// Removes and returns the selection for `match_id`.
    pub fn take(&self, match_id: MatchId) -> Result<Option<OpeningSelection>> {
        let mut pending = self
            .pending
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(pending.remove(&match_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_read_once() {
        let bridge = SetupBridge::new();
        let selection = OpeningSelection {
            striker: PlayerId(1),
            non_striker: PlayerId(2),
            bowler: PlayerId(20),
        };
        bridge.put(MatchId(7), selection).unwrap();

        assert_eq!(bridge.peek(MatchId(7)).unwrap(), Some(selection));
        assert_eq!(bridge.take(MatchId(7)).unwrap(), Some(selection));
        assert_eq!(bridge.take(MatchId(7)).unwrap(), None);
        assert_eq!(bridge.take(MatchId(8)).unwrap(), None);
    }
}
