use std::collections::HashMap;
use std::sync::RwLock;

use scoring_core::{Match, MatchId};

use crate::repository::{MatchRepository, RepositoryError, Result};

#[derive(Default)]
pub struct InMemoryMatchRepo {
    matches: RwLock<HashMap<MatchId, Match>>,
}

impl InMemoryMatchRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(matches: impl IntoIterator<Item = Match>) -> Self {
        let matches = matches.into_iter().map(|m| (m.id, m)).collect();
        Self {
            matches: RwLock::new(matches),
        }
    }
}

impl MatchRepository for InMemoryMatchRepo {
    fn get(&self, id: MatchId) -> Result<Option<Match>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.get(&id).cloned())
    }

    fn upsert(&self, fixture: &Match) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches.insert(fixture.id, fixture.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Match>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut all: Vec<Match> = matches.values().cloned().collect();
        all.sort_by_key(|m| (m.scheduled_at, m.id));
        Ok(all)
    }
}
