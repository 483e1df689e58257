//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the indexer needs:
//! `identify` (dimensions after orientation) and `downscale` (the full
//! decode → orient → resize → encode derivation).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the recording
//! [`MockBackend`](tests::MockBackend) so orchestration logic can be checked
//! without encoding anything.

use super::params::LowResParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Dimensions of the image as it should be displayed, i.e. after the
    /// embedded orientation has been applied.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Write the low-res derivative described by `params`.
    ///
    /// Returns the dimensions of the written image. The caller is
    /// responsible for the skip-if-exists check and for creating the output
    /// directory.
    fn downscale(&self, params: &LowResParams) -> Result<Dimensions, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::calculations::calculate_low_res_dimensions;
    use crate::imaging::params::Quality;
    use std::cell::RefCell;

    /// Mock backend that records operations without executing them.
    ///
    /// `identify` pops from `identify_results`; `downscale` computes the
    /// target size from `source_dimensions` and records the call. Paths
    /// listed in `failing_sources` make `downscale` fail.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: RefCell<Vec<Dimensions>>,
        pub source_dimensions: Option<Dimensions>,
        pub failing_sources: Vec<String>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Downscale {
            source: String,
            output: String,
            max_width: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: RefCell::new(dims),
                ..Self::default()
            }
        }

        pub fn with_source_dimensions(dims: Dimensions) -> Self {
            Self {
                source_dimensions: Some(dims),
                ..Self::default()
            }
        }

        pub fn failing_on(source: &str) -> Self {
            Self {
                failing_sources: vec![source.to_string()],
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .borrow_mut()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn downscale(&self, params: &LowResParams) -> Result<Dimensions, BackendError> {
            let source = params.source.to_string_lossy().to_string();
            self.operations.borrow_mut().push(RecordedOp::Downscale {
                source: source.clone(),
                output: params.output.to_string_lossy().to_string(),
                max_width: params.max_width,
                quality: params.quality.value(),
            });

            if self.failing_sources.iter().any(|f| source.ends_with(f)) {
                return Err(BackendError::ProcessingFailed(format!(
                    "Failed to decode {source}"
                )));
            }

            let original = self.source_dimensions.unwrap_or(Dimensions {
                width: 100,
                height: 100,
            });
            Ok(calculate_low_res_dimensions(original.as_tuple(), params.max_width).into())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.as_tuple(), (800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_without_results_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/missing.jpg")).is_err());
    }

    #[test]
    fn mock_records_downscale() {
        let backend = MockBackend::with_source_dimensions(Dimensions {
            width: 800,
            height: 600,
        });

        let dims = backend
            .downscale(&LowResParams {
                source: "/cat.jpg".into(),
                output: "/cat-low.jpg".into(),
                max_width: 400,
                quality: Quality::new(40),
            })
            .unwrap();
        assert_eq!(dims.as_tuple(), (400, 300));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Downscale {
                max_width: 400,
                quality: 40,
                ..
            }
        ));
    }

    #[test]
    fn mock_failing_source_errors() {
        let backend = MockBackend::failing_on("broken.png");
        let result = backend.downscale(&LowResParams {
            source: "/gallery/broken.png".into(),
            output: "/gallery/broken-low.png".into(),
            max_width: 400,
            quality: Quality::default(),
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }
}
