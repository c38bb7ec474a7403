//! Run configuration.
//!
//! Search order:
//! 1. an explicit `--config` path
//! 2. `itemforge.toml` in the current directory
//! 3. `~/.config/itemforge/config.toml`
//!
//! `ITEMFORGE_AGENT` and `ITEMFORGE_MIN_ACCURACY` override file values; CLI
//! flags override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level itemforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemforgeConfig {
    /// Agent used when `--agent` is not given.
    #[serde(default = "default_agent")]
    pub default_agent: String,
    /// Accuracy threshold used when `--min-accuracy` is not given.
    #[serde(default = "default_min_accuracy")]
    pub min_accuracy: f64,
    /// Max cases in flight.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Where summary reports land when no explicit path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_agent() -> String {
    "oracle".to_string()
}
fn default_min_accuracy() -> f64 {
    1.0
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./itemforge-results")
}

impl Default for ItemforgeConfig {
    fn default() -> Self {
        Self {
            default_agent: default_agent(),
            min_accuracy: default_min_accuracy(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load configuration from well-known paths.
pub fn load_config() -> Result<ItemforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ItemforgeConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("itemforge.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ItemforgeConfig::default(),
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Parse and check a TOML config document.
pub fn parse_config_str(content: &str) -> Result<ItemforgeConfig> {
    let config: ItemforgeConfig = toml::from_str(content)?;
    check_min_accuracy(config.min_accuracy)?;
    Ok(config)
}

/// Apply environment overrides through `lookup`.
pub fn apply_env_overrides(
    mut config: ItemforgeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ItemforgeConfig> {
    if let Some(agent) = lookup("ITEMFORGE_AGENT") {
        config.default_agent = agent;
    }
    if let Some(raw) = lookup("ITEMFORGE_MIN_ACCURACY") {
        let value: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("ITEMFORGE_MIN_ACCURACY is not a number: {raw:?}"))?;
        check_min_accuracy(value)?;
        config.min_accuracy = value;
    }
    Ok(config)
}

/// Threshold must lie in `[0, 1]`.
pub fn check_min_accuracy(value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("min accuracy must be within [0, 1], got {value}");
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("itemforge"))
}
