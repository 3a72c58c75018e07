//! Platform-specific directory utilities
//!
//! Follows platform conventions for cache and data directories.

use std::path::PathBuf;

const APP: &str = "scorer";

/// Log directory: `~/.cache/scorer/logs` on Linux, the platform cache dir
/// elsewhere, `/tmp/scorer/logs` as a fallback.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp").join(APP))
        .join("logs")
}

/// Data directory: `~/.local/share/scorer` on Linux, the platform data dir
/// elsewhere, `./scorer_data` as a fallback.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./scorer_data"))
}
