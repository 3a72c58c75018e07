//! Builds the repositories, event bus and setup bridge used by front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use runtime::{EventBus, Repositories, ScoringSession, Seed, SetupBridge};
use scoring_core::MatchId;

use crate::config::{Persistence, ScorerConfig};
use crate::seed::demo_seed;

/// Builder that assembles storage and notification for scoring clients.
pub struct ScorerBuilder {
    config: ScorerConfig,
    seed: Option<Seed>,
}

impl ScorerBuilder {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fallback data for empty stores, replacing the demo seed.
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<ScorerSetup> {
        let seed = match (self.seed, self.config.seed_demo) {
            (Some(seed), _) => seed,
            (None, true) => demo_seed(),
            (None, false) => Seed::default(),
        };

        let repos = match self.config.persistence {
            Persistence::Memory => {
                tracing::info!("Using in-memory repositories");
                Repositories::seeded_in_memory(seed)
            }
            Persistence::File => {
                let dir = self.config.resolved_data_dir();
                tracing::info!("Using JSON repositories in {}", dir.display());
                Repositories::file(&dir, seed)
                    .with_context(|| format!("Failed to open data directory {}", dir.display()))?
            }
        };

        let bus = EventBus::with_capacity(self.config.session.event_buffer_size);

        Ok(ScorerSetup {
            config: self.config,
            repos,
            bus,
            bridge: Arc::new(SetupBridge::new()),
        })
    }
}

pub struct ScorerSetup {
    pub config: ScorerConfig,
    pub repos: Repositories,
    pub bus: EventBus,
    pub bridge: Arc<SetupBridge>,
}

impl ScorerSetup {
    /// Opens a scoring session for `match_id` on the assembled storage.
    pub fn open_session(&self, match_id: MatchId) -> Result<ScoringSession> {
        ScoringSession::open(
            match_id,
            self.repos.clone(),
            &self.bridge,
            self.bus.clone(),
            self.config.session,
        )
        .with_context(|| format!("Failed to open scoring session for match {match_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::OpeningSelection;
    use scoring_core::{PlayerId, ScoringAction};

    #[test]
    fn memory_setup_scores_the_demo_fixture() {
        let setup = ScorerBuilder::new(ScorerConfig::default()).build().unwrap();
        setup
            .bridge
            .put(
                MatchId(1),
                OpeningSelection {
                    striker: PlayerId(1),
                    non_striker: PlayerId(2),
                    bowler: PlayerId(111),
                },
            )
            .unwrap();

        let mut session = setup.open_session(MatchId(1)).unwrap();
        session.record(ScoringAction::runs(4)).unwrap();

        assert_eq!(session.innings()[0].totals.runs, 4);
    }

    #[test]
    fn file_setup_writes_under_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScorerConfig {
            persistence: Persistence::File,
            data_dir: Some(dir.path().to_path_buf()),
            ..ScorerConfig::default()
        };

        let setup = ScorerBuilder::new(config).build().unwrap();

        assert_eq!(setup.repos.matches.list().unwrap().len(), 2);
        assert!(dir.path().join("matches.json").exists());
    }

    #[test]
    fn fixture_without_toss_does_not_open() {
        let setup = ScorerBuilder::new(ScorerConfig::default()).build().unwrap();
        assert!(setup.open_session(MatchId(2)).is_err());
    }
}
