//! Service configuration stored in `~/.skillmatch/config.toml`
//!
//! All sections are optional with defaults, so a missing file is the same as
//! an empty one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::RankingConfig;
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub ranking: RankingSection,
    #[serde(default)]
    pub serve: ServeSection,
}

impl AppConfig {
    /// Load config from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(paths::config_path);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse config from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Catalog database path with `~` and env vars expanded
    pub fn catalog_path(&self) -> Result<PathBuf> {
        match &self.catalog.path {
            Some(raw) => {
                let expanded = shellexpand::full(raw)
                    .with_context(|| format!("Failed to expand catalog path {}", raw))?;
                Ok(PathBuf::from(expanded.as_ref()))
            }
            None => Ok(paths::catalog_path()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    /// SQLite catalog file (default: ~/.skillmatch/catalog.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSection {
    /// Rank curated postings ahead of generated ones
    #[serde(default = "default_priority_tiers")]
    pub priority_tiers: bool,
    /// Result cutoff; defaults depend on `priority_tiers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn default_priority_tiers() -> bool {
    true
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            priority_tiers: default_priority_tiers(),
            limit: None,
        }
    }
}

impl RankingSection {
    pub fn to_ranking_config(&self) -> RankingConfig {
        let base = if self.priority_tiers {
            RankingConfig::tiered()
        } else {
            RankingConfig::single_tier()
        };
        match self.limit {
            Some(limit) => base.with_limit(limit),
            None => base,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}

impl Default for ServeSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.ranking.priority_tiers);
        assert_eq!(config.serve.port, 8000);
        assert_eq!(config.serve.host, "127.0.0.1");
        assert!(config.catalog.path.is_none());

        let ranking = config.ranking.to_ranking_config();
        assert_eq!(ranking.limit, RankingConfig::TIERED_LIMIT);
        assert!(ranking.priority_tiers);
    }

    #[test]
    fn test_single_tier_defaults_to_ten() {
        let config = AppConfig::from_toml("[ranking]\npriority_tiers = false\n").unwrap();
        let ranking = config.ranking.to_ranking_config();
        assert!(!ranking.priority_tiers);
        assert_eq!(ranking.limit, RankingConfig::SINGLE_TIER_LIMIT);
    }

    #[test]
    fn test_explicit_limit_wins() {
        let config = AppConfig::from_toml("[ranking]\nlimit = 25\n").unwrap();
        assert_eq!(config.ranking.to_ranking_config().limit, 25);
    }

    #[test]
    fn test_catalog_path_expansion() {
        let config = AppConfig::from_toml("[catalog]\npath = \"/tmp/jobs.db\"\n").unwrap();
        assert_eq!(config.catalog_path().unwrap(), PathBuf::from("/tmp/jobs.db"));

        let config = AppConfig::from_toml("[catalog]\npath = \"~/jobs.db\"\n").unwrap();
        assert!(!config.catalog_path().unwrap().starts_with("~"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(config.ranking.priority_tiers);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ranking\npriority_tiers = ").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
