//! High-level image operations.
//!
//! These functions hold the decisions (skip or derive, where to write) and
//! hand the pixel work to an [`ImageBackend`].

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_low_res_dimensions;
use super::params::{LowResParams, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Derivation settings resolved from [`crate::config::LowResConfig`].
#[derive(Debug, Clone)]
pub struct DerivationConfig {
    pub max_width: u32,
    pub quality: Quality,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            max_width: 400,
            quality: Quality::default(),
        }
    }
}

impl From<&crate::config::LowResConfig> for DerivationConfig {
    fn from(config: &crate::config::LowResConfig) -> Self {
        Self {
            max_width: config.max_width,
            quality: Quality::new(config.quality),
        }
    }
}

/// What [`ensure_low_res`] did for one source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowResStatus {
    /// The target already existed and was left alone.
    Skipped,
    /// A new derivative was written.
    Generated { output: Dimensions },
}

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    Ok(backend.identify(path)?.as_tuple())
}

/// Plan a derivation without executing it.
pub fn plan_low_res(source: &Path, output: &Path, config: &DerivationConfig) -> LowResParams {
    LowResParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        max_width: config.max_width,
        quality: config.quality,
    }
}

/// Dimensions a derivation of an image this size would produce.
pub fn planned_dimensions(original: (u32, u32), config: &DerivationConfig) -> (u32, u32) {
    calculate_low_res_dimensions(original, config.max_width)
}

/// Make sure the low-res derivative of `source` exists at `output`.
///
/// An existing `output` is never touched, whatever its content or age.
/// Otherwise the output directory is created and the backend derives the
/// image.
pub fn ensure_low_res(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &DerivationConfig,
) -> Result<LowResStatus> {
    if output.exists() {
        log::debug!("{} exists, skipping", output.display());
        return Ok(LowResStatus::Skipped);
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let params = plan_low_res(source, output, config);
    let dims = backend.downscale(&params)?;
    log::debug!(
        "derived {} ({}x{})",
        output.display(),
        dims.width,
        dims.height
    );
    Ok(LowResStatus::Generated { output: dims })
}
