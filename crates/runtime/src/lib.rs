//! Session orchestration for live cricket scoring.
//!
//! This crate wires the deterministic `scoring-core` engine to persistence
//! and change notification. Consumers open a [`ScoringSession`] per match,
//! feed it scoring actions, and subscribe to the [`EventBus`] for updates.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the scoring session and read-only scorecard queries
//! - [`repository`] provides the persistence contracts and their in-memory
//!   and JSON file implementations
//! - [`events`] provides the topic-based event bus
//! - [`setup`] hands the opening selection from match setup to a session
pub mod config;
pub mod error;
pub mod events;
pub mod repository;
pub mod session;
pub mod setup;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use events::{Event, EventBus, LifecycleEvent, ScoringUpdate, Topic};
pub use repository::{
    DeliveryRepository, FileStore, InMemoryDeliveryRepo, InMemoryInningsRepo, InMemoryMatchRepo,
    InMemoryRosterRepo, InningsRepository, MatchRepository, Repositories, RepositoryError,
    RosterRepository, Seed,
};
pub use session::{ScoringSession, match_scorecards};
pub use setup::{OpeningSelection, SetupBridge};
