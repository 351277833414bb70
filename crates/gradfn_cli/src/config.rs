//! Configuration file lookup
//!
//! An explicit `--config` path must exist. Without one, `gradfn.toml` in the
//! working directory is used when present, otherwise the defaults.

use anyhow::{Context, Result};
use gradfn_core::GradientFnConfig;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default configuration file name
pub const CONFIG_FILE: &str = "gradfn.toml";

/// Resolve the configuration for this run
pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<GradientFnConfig> {
    if let Some(path) = explicit {
        return GradientFnConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        return GradientFnConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
    Ok(GradientFnConfig::default())
}

/// Starter configuration with an example curve and color
pub fn starter() -> GradientFnConfig {
    let mut config = GradientFnConfig::default();
    config
        .easings
        .insert("ease-out-back".to_string(), [0.34, 1.56, 0.64, 1.0]);
    config
        .colors
        .insert("brand".to_string(), "#336699".to_string());
    config
}

/// Write a starter `gradfn.toml` into `dir`
pub fn write_starter(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let content =
        toml::to_string_pretty(&starter()).context("Failed to serialize configuration")?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
