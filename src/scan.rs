//! Source folder scanning.
//!
//! Lists the top level of the source folder and keeps every regular file
//! whose extension is allow-listed and whose base name does not already end
//! with the low-res suffix:
//!
//! ```text
//! images/gallery/
//! ├── cat.jpg          # candidate → cat-low.jpg
//! ├── cat-low.jpg      # previous derivative, skipped
//! ├── Beach.PNG        # candidate → Beach-low.PNG
//! ├── notes.txt        # not an image, skipped
//! └── archive/         # directories are never descended into
//! ```
//!
//! Candidates come back sorted by file name so derivation runs in a stable
//! order.

use crate::naming::{is_allowed_extension, is_low_res_base, low_res_name, split_extension};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Folder '{}' not found.", .0.display())]
    SourceNotFound(PathBuf),
}

/// Which files count as gallery sources.
#[derive(Debug, Clone)]
pub struct ScanRules {
    /// Allow-listed extensions with their dot.
    pub extensions: Vec<String>,
    /// Low-res suffix; sources ending with it are ignored.
    pub suffix: String,
}

impl From<&crate::config::IndexerConfig> for ScanRules {
    fn from(config: &crate::config::IndexerConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            suffix: config.low_res.suffix.clone(),
        }
    }
}

/// A source image and where its low-res companion lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub file_name: String,
    pub low_file_name: String,
    pub full_path: PathBuf,
    pub low_path: PathBuf,
}

/// Scan `source_dir` for candidate images.
pub fn scan(source_dir: &Path, rules: &ScanRules) -> Result<Vec<Candidate>, ScanError> {
    if !source_dir.exists() {
        return Err(ScanError::SourceNotFound(source_dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!(
                "skipping {}: file name is not valid UTF-8",
                entry.path().display()
            );
            continue;
        };

        if !is_candidate_name(&file_name, rules) {
            continue;
        }
        if !entry.path().is_file() {
            log::debug!("skipping {file_name}: not a regular file");
            continue;
        }

        let low_file_name = low_res_name(&file_name, &rules.suffix);
        candidates.push(Candidate {
            full_path: source_dir.join(&file_name),
            low_path: source_dir.join(&low_file_name),
            file_name,
            low_file_name,
        });
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}

/// Whether a file name is an allow-listed image that is not itself a
/// low-res derivative.
pub fn is_candidate_name(file_name: &str, rules: &ScanRules) -> bool {
    let (base, ext) = split_extension(file_name);
    is_allowed_extension(ext, &rules.extensions) && !is_low_res_base(base, &rules.suffix)
}
