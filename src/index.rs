//! The indexing run: scan → derive low-res copies → write the manifest.
//!
//! Everything happens in order on the calling thread. The first error from
//! any image aborts the run before the manifest is written; derivatives
//! already produced by that run stay on disk. A missing source folder is the
//! one guarded case and comes back as [`IndexOutcome::SourceMissing`] with no
//! files touched.
//!
//! Relative paths in the config are resolved against a `root` (the working
//! directory in the CLI), while manifest entries keep the configured
//! `source_dir` so the front-end sees paths relative to the site root.

use crate::config::IndexerConfig;
use crate::imaging::{
    self, BackendError, DerivationConfig, Dimensions, ImageBackend, LowResStatus, RustBackend,
};
use crate::manifest::{GalleryManifest, ImageEntry, ManifestError};
use crate::scan::{self, Candidate, ScanError, ScanRules};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Progress for a single candidate, emitted as soon as it is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEvent {
    /// The low-res file was already there.
    LowResSkipped {
        index: usize,
        file_name: String,
        low_file_name: String,
    },
    /// A low-res file was written.
    LowResGenerated {
        index: usize,
        file_name: String,
        low_file_name: String,
        dimensions: Dimensions,
    },
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub count: usize,
    pub generated: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The source folder does not exist; nothing was read or written.
    SourceMissing(PathBuf),
    /// The manifest was written.
    Written(IndexSummary),
}

/// One candidate as a dry run sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedImage {
    pub candidate: Candidate,
    /// `None` when the low-res file already exists; otherwise the source
    /// dimensions and the dimensions a run would write.
    pub derivation: Option<((u32, u32), (u32, u32))>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    SourceMissing(PathBuf),
    Planned(Vec<PlannedImage>),
}

/// Run the indexer with the production backend.
pub fn update_gallery(
    root: &Path,
    config: &IndexerConfig,
    on_event: impl FnMut(&IndexEvent),
) -> Result<IndexOutcome, IndexError> {
    update_gallery_with_backend(&RustBackend::new(), root, config, on_event)
}

/// Run the indexer using a specific backend (allows testing with mock).
pub fn update_gallery_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    config: &IndexerConfig,
    mut on_event: impl FnMut(&IndexEvent),
) -> Result<IndexOutcome, IndexError> {
    let candidates = match scan_source(root, config)? {
        Some(candidates) => candidates,
        None => return Ok(IndexOutcome::SourceMissing(config.source_dir.clone())),
    };
    log::info!(
        "found {} candidate images in {}",
        candidates.len(),
        config.source_dir.display()
    );

    let low_res = DerivationConfig::from(&config.low_res);
    let mut entries = Vec::with_capacity(candidates.len());
    let (mut generated, mut skipped) = (0, 0);

    for (i, candidate) in candidates.iter().enumerate() {
        let status = imaging::ensure_low_res(
            backend,
            &candidate.full_path,
            &candidate.low_path,
            &low_res,
        )?;

        let event = match status {
            LowResStatus::Skipped => {
                skipped += 1;
                IndexEvent::LowResSkipped {
                    index: i + 1,
                    file_name: candidate.file_name.clone(),
                    low_file_name: candidate.low_file_name.clone(),
                }
            }
            LowResStatus::Generated { output } => {
                generated += 1;
                IndexEvent::LowResGenerated {
                    index: i + 1,
                    file_name: candidate.file_name.clone(),
                    low_file_name: candidate.low_file_name.clone(),
                    dimensions: output,
                }
            }
        };
        on_event(&event);

        entries.push(ImageEntry::for_candidate(&config.source_dir, candidate));
    }

    let manifest = GalleryManifest::from_entries(entries);
    manifest.write(&root.join(&config.output_file))?;

    Ok(IndexOutcome::Written(IndexSummary {
        count: manifest.len(),
        generated,
        skipped,
        output: config.output_file.clone(),
    }))
}

/// Describe what a run would do without writing anything.
pub fn check_gallery(
    backend: &impl ImageBackend,
    root: &Path,
    config: &IndexerConfig,
) -> Result<CheckOutcome, IndexError> {
    let candidates = match scan_source(root, config)? {
        Some(candidates) => candidates,
        None => return Ok(CheckOutcome::SourceMissing(config.source_dir.clone())),
    };

    let low_res = DerivationConfig::from(&config.low_res);
    let mut planned = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let derivation = if candidate.low_path.exists() {
            None
        } else {
            let original = imaging::get_dimensions(backend, &candidate.full_path)?;
            Some((original, imaging::planned_dimensions(original, &low_res)))
        };
        planned.push(PlannedImage {
            candidate,
            derivation,
        });
    }
    Ok(CheckOutcome::Planned(planned))
}

/// Scan the configured folder, mapping a missing folder to `None`.
fn scan_source(root: &Path, config: &IndexerConfig) -> Result<Option<Vec<Candidate>>, IndexError> {
    match scan::scan(&root.join(&config.source_dir), &ScanRules::from(config)) {
        Ok(candidates) => Ok(Some(candidates)),
        Err(ScanError::SourceNotFound(path)) => {
            log::debug!("source folder {} does not exist", path.display());
            Ok(None)
        }
        Err(ScanError::Io(e)) => Err(IndexError::Io(e)),
    }
}
