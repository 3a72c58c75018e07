//! In-memory repositories for tests and ephemeral sessions.

mod fixture;
mod roster;
mod scoring;

pub use fixture::InMemoryMatchRepo;
pub use roster::InMemoryRosterRepo;
pub use scoring::{InMemoryDeliveryRepo, InMemoryInningsRepo};
