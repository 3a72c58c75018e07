use std::collections::HashMap;
use std::sync::RwLock;

use scoring_core::{Delivery, Innings, InningsId, MatchId};

use crate::repository::{DeliveryRepository, InningsRepository, RepositoryError, Result};

/// Delivery logs keyed by innings.
#[derive(Default)]
pub struct InMemoryDeliveryRepo {
    logs: RwLock<HashMap<InningsId, Vec<Delivery>>>,
}

impl InMemoryDeliveryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeliveryRepository for InMemoryDeliveryRepo {
    fn list(&self, innings: InningsId) -> Result<Vec<Delivery>> {
        let logs = self.logs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(logs.get(&innings).cloned().unwrap_or_default())
    }

    fn append(&self, delivery: &Delivery) -> Result<()> {
        let mut logs = self
            .logs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        logs.entry(delivery.innings())
            .or_default()
            .push(delivery.clone());
        Ok(())
    }

    fn remove_last(&self, innings: InningsId) -> Result<Option<Delivery>> {
        let mut logs = self
            .logs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(logs.get_mut(&innings).and_then(Vec::pop))
    }

    fn remove_innings(&self, innings: InningsId) -> Result<usize> {
        let mut logs = self
            .logs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(logs.remove(&innings).map_or(0, |log| log.len()))
    }
}

/// Innings records keyed by id.
#[derive(Default)]
pub struct InMemoryInningsRepo {
    innings: RwLock<HashMap<InningsId, Innings>>,
}

impl InMemoryInningsRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InningsRepository for InMemoryInningsRepo {
    fn list_for_match(&self, match_id: MatchId) -> Result<Vec<Innings>> {
        let innings = self
            .innings
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut found: Vec<Innings> = innings
            .values()
            .filter(|i| i.match_id() == match_id)
            .cloned()
            .collect();
        found.sort_by_key(|i| i.number());
        Ok(found)
    }

    fn get(&self, id: InningsId) -> Result<Option<Innings>> {
        let innings = self
            .innings
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(innings.get(&id).cloned())
    }

    fn upsert(&self, record: &Innings) -> Result<()> {
        let mut innings = self
            .innings
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        innings.insert(record.id, record.clone());
        Ok(())
    }

    fn remove(&self, id: InningsId) -> Result<()> {
        let mut innings = self
            .innings
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        innings.remove(&id);
        Ok(())
    }
}
