//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageDecoder::dimensions` + orientation |
//! | **Derive low-res** | orient → Lanczos3 `resize_exact` → re-encode |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Skip-or-derive decisions on top of a backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_low_res_dimensions, needs_downscale};
pub use operations::{
    DerivationConfig, LowResStatus, ensure_low_res, get_dimensions, plan_low_res,
    planned_dimensions,
};
pub use params::{LowResParams, Quality};
pub use rust_backend::RustBackend;
