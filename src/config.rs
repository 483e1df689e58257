//! Indexer configuration.
//!
//! Every setting has a compiled-in default, so running with no config file
//! behaves exactly like the stock indexer. A `gallery.toml` in the working
//! directory (or the file named by `--config`) overrides individual keys:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "images/gallery"      # Folder scanned for images (not recursive)
//! output_file = "gallery_data.json"  # Manifest read by the gallery front-end
//! extensions = [".png", ".jpg", ".jpeg", ".gif", ".webp"]
//!
//! [low_res]
//! suffix = "-low"      # photo.jpg -> photo-low.jpg
//! max_width = 400      # Wider images are scaled down to this width
//! quality = 40         # Lossy encoding quality for JPEG (1-100)
//! ```
//!
//! Config files are sparse: stock defaults are serialized to a TOML table and
//! the user file is merged on top, key by key. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level indexer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    /// Folder scanned for source images.
    pub source_dir: PathBuf,
    /// Manifest file written at the end of a run.
    pub output_file: PathBuf,
    /// Allow-listed extensions, dot included. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Low-res derivative settings.
    pub low_res: LowResConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("images/gallery"),
            output_file: PathBuf::from("gallery_data.json"),
            extensions: [".png", ".jpg", ".jpeg", ".gif", ".webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            low_res: LowResConfig::default(),
        }
    }
}

/// Settings for the low-res derivative of each image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowResConfig {
    /// Inserted between the base name and the extension.
    pub suffix: String,
    /// Width threshold in pixels. Narrower images keep their size.
    pub max_width: u32,
    /// Lossy encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for LowResConfig {
    fn default() -> Self {
        Self {
            suffix: "-low".to_string(),
            max_width: 400,
            quality: 40,
        }
    }
}

impl IndexerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low_res.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "low_res.suffix must not be empty".into(),
            ));
        }
        if self.low_res.max_width == 0 {
            return Err(ConfigError::Validation(
                "low_res.max_width must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.low_res.quality) {
            return Err(ConfigError::Validation(
                "low_res.quality must be 1-100".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(ConfigError::Validation(format!(
                "extension {bad:?} must start with '.'"
            )));
        }
        Ok(())
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(IndexerConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse config TOML text on top of the stock defaults and validate it.
pub fn parse_config(content: &str) -> Result<IndexerConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: IndexerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file is not an error: the stock defaults are returned.
pub fn load_config(path: &Path) -> Result<IndexerConfig, ConfigError> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(IndexerConfig::default());
    }
    let content = fs::read_to_string(path)?;
    log::debug!("loaded config from {}", path.display());
    parse_config(&content)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Indexer Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Folder scanned for images. Only the top level is read.
source_dir = "images/gallery"

# Manifest consumed by the gallery front-end. Overwritten on every run.
output_file = "gallery_data.json"

# File extensions treated as images (matched case-insensitively).
extensions = [".png", ".jpg", ".jpeg", ".gif", ".webp"]

# ---------------------------------------------------------------------------
# Low-res previews
# ---------------------------------------------------------------------------
[low_res]
# Inserted before the extension: photo.jpg -> photo-low.jpg.
# Files whose name already ends with this suffix are never scanned as sources.
suffix = "-low"

# Images wider than this (in pixels) are scaled down to it, keeping aspect.
max_width = 400

# JPEG encoding quality (1 = worst, 100 = best).
quality = 40
"##
}
