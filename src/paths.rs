//! Single source of truth for the skillmatch filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O, no validation,
//! no business logic.
//!
//! ```text
//! ~/.skillmatch/
//! ├── config.toml              # Service config
//! └── catalog.db               # SQLite job catalog (skills, created_jobs, jobs)
//! ```
//!
//! `SKILLMATCH_HOME` relocates the whole tree (used by tests and containers).

use std::path::PathBuf;

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "SKILLMATCH_HOME";

/// skillmatch home directory: `~/.skillmatch/`
pub fn skillmatch_home() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".skillmatch")
}

/// Config file: `~/.skillmatch/config.toml`
pub fn config_path() -> PathBuf {
    skillmatch_home().join("config.toml")
}

/// Default catalog database: `~/.skillmatch/catalog.db`
pub fn catalog_path() -> PathBuf {
    skillmatch_home().join("catalog.db")
}
