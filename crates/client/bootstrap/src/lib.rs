//! Shared bootstrap utilities for scoring front-ends.
//!
//! Provides configuration loading, demo data, and storage setup that can be
//! reused by the CLI or any other front-end crate.
pub mod builder;
pub mod config;
pub mod dirs;
pub mod seed;

pub use builder::{ScorerBuilder, ScorerSetup};
pub use config::{Persistence, ScorerConfig};
pub use seed::demo_seed;
