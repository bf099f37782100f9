//! Nest tuning loaded from and saved to TOML files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nest_core::NestConfig;

/// Reads a TOML tuning file. Keys left out fall back to the shipped defaults.
pub fn load_config(path: &Path) -> Result<NestConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read nest config: {}", path.display()))?;
    let config: NestConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse nest config: {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid nest config: {}", path.display()))?;
    Ok(config)
}

pub fn write_config_atomic(config: &NestConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    let text = toml::to_string_pretty(config).context("Failed to serialize nest config")?;
    fs::write(&tmp_path, text)
        .with_context(|| format!("Failed to write nest config: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move nest config into place: {}", path.display()))?;
    Ok(())
}
