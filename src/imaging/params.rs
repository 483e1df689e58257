//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. They sit between
//! [`operations`](super::operations), which decides whether a derivative is
//! needed, and the [`backend`](super::backend), which does the pixel work.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(40)
    }
}

/// One low-res derivation: decode `source`, orient, cap the width at
/// `max_width`, encode to `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct LowResParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_width: u32,
    pub quality: Quality,
}
