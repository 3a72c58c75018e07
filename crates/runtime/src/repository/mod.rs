//! Repository layer for scoring data.
//!
//! Repositories hold what CHANGES during a match: fixtures, innings records
//! and delivery logs, plus the team and player roster. Two implementations
//! are provided: in-memory (tests, ephemeral runs) and JSON files on disk.

mod error;
mod file;
mod memory;
mod seed;
mod traits;

use std::sync::Arc;

use scoring_core::InningsId;

pub use error::{RepositoryError, Result};
pub use file::FileStore;
pub use memory::{InMemoryDeliveryRepo, InMemoryInningsRepo, InMemoryMatchRepo, InMemoryRosterRepo};
pub use seed::Seed;
pub use traits::{DeliveryRepository, InningsRepository, MatchRepository, RosterRepository};

/// The four repositories a scoring session writes through to.
#[derive(Clone)]
pub struct Repositories {
    pub matches: Arc<dyn MatchRepository>,
    pub innings: Arc<dyn InningsRepository>,
    pub deliveries: Arc<dyn DeliveryRepository>,
    pub roster: Arc<dyn RosterRepository>,
}

impl Repositories {
    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self::seeded_in_memory(Seed::default())
    }

    /// In-memory repositories pre-filled with `seed`.
    pub fn seeded_in_memory(seed: Seed) -> Self {
        Self {
            matches: Arc::new(InMemoryMatchRepo::with_matches(seed.matches)),
            innings: Arc::new(InMemoryInningsRepo::new()),
            deliveries: Arc::new(InMemoryDeliveryRepo::new()),
            roster: Arc::new(InMemoryRosterRepo::with_roster(seed.teams, seed.players)),
        }
    }

    /// Removes an innings alongside its delivery log. Returns how many
    /// deliveries went with it.
    pub fn remove_innings(&self, id: InningsId) -> Result<usize> {
        let removed = self.deliveries.remove_innings(id)?;
        self.innings.remove(id)?;
        Ok(removed)
    }

    /// Repositories backed by JSON files under `dir`.
    pub fn file(dir: impl AsRef<std::path::Path>, seed: Seed) -> Result<Self> {
        let store = Arc::new(FileStore::open(dir, seed)?);
        Ok(Self {
            matches: store.clone(),
            innings: store.clone(),
            deliveries: store.clone(),
            roster: store,
        })
    }
}
