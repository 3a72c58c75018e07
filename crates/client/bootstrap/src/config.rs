//! Scorer configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use runtime::SessionConfig;

use crate::dirs;

/// Where scoring data lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Nothing survives the process.
    #[default]
    Memory,
    /// JSON files under the data directory.
    File,
}

impl FromStr for Persistence {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            other => Err(format!("unknown persistence backend `{other}`")),
        }
    }
}

/// Configuration required to bootstrap a scoring client.
#[derive(Clone, Debug)]
pub struct ScorerConfig {
    pub persistence: Persistence,
    pub data_dir: Option<PathBuf>,
    /// Seed empty stores with two demo teams and a fixture.
    pub seed_demo: bool,
    pub log_stderr: bool,
    pub session: SessionConfig,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            persistence: Persistence::default(),
            data_dir: None,
            seed_demo: true,
            log_stderr: false,
            session: SessionConfig::default(),
        }
    }
}

impl ScorerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SCORER_PERSISTENCE` - `memory` or `file` (default: memory)
    /// - `SCORER_DATA_DIR` - Directory for JSON files (default: platform-specific)
    /// - `SCORER_SEED_DEMO` - Seed empty stores with demo data (default: true)
    /// - `SCORER_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `SCORER_VERIFY_INTERVAL` - Actions between totals checks, 0 = every action (default: 6)
    /// - `SCORER_LOG_STDERR` - Also log to stderr (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var("SCORER_PERSISTENCE") {
            match value.parse() {
                Ok(persistence) => config.persistence = persistence,
                Err(error) => tracing::warn!("{error}; using in-memory persistence"),
            }
        }

        config.data_dir = env::var("SCORER_DATA_DIR").ok().map(PathBuf::from);

        if let Some(seed) = read_env::<bool>("SCORER_SEED_DEMO") {
            config.seed_demo = seed;
        }

        if let Some(capacity) = read_env::<usize>("SCORER_EVENT_BUFFER") {
            config.session.event_buffer_size = capacity.max(1);
        }

        if let Some(interval) = read_env::<u32>("SCORER_VERIFY_INTERVAL") {
            config.session.verify_interval = interval;
        }

        // Setting the variable without a value also enables stderr logging.
        if let Some(enable) = read_env::<bool>("SCORER_LOG_STDERR") {
            config.log_stderr = enable;
        } else if env::var("SCORER_LOG_STDERR").is_ok() {
            config.log_stderr = true;
        }

        config
    }

    /// The configured data directory, or the platform default.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(dirs::data_dir)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
