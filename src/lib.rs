//! # Gallery Indexer
//!
//! Keeps a web gallery's image folder and its JSON manifest in sync. One run:
//!
//! ```text
//! 1. Scan      images/gallery/       →  candidate images (allow-listed, not *-low)
//! 2. Derive    cat.jpg               →  cat-low.jpg      (only if missing)
//! 3. Manifest  candidates            →  gallery_data.json (sorted {full, low} pairs)
//! ```
//!
//! The front-end shows the `low` file first and swaps in `full` once it is
//! in view, so the low-res copies only need to be small, not pretty.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Compiled-in defaults, optional `gallery.toml` overlay, validation |
//! | [`naming`] | Extension split, allow-list, low-res suffix, manifest path rules |
//! | [`scan`] | Non-recursive listing of the source folder into candidates |
//! | [`imaging`] | Low-res derivation: orientation, Lanczos3 downscale, re-encode |
//! | [`manifest`] | `ImageEntry` / `GalleryManifest` and the 4-space JSON writer |
//! | [`index`] | The run itself: scan → derive → manifest, plus the dry-run check |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Existence Is the Cache
//!
//! A low-res file that exists is never regenerated, even if the source has
//! changed since. Delete the `-low` file to force a new one. There is no
//! hashing and no timestamp comparison.
//!
//! ## Fail Fast
//!
//! The first unreadable image aborts the run and the manifest is not
//! written, so the front-end never sees a manifest pointing at low-res files
//! that could not be produced. Derivatives already written by that run are
//! kept and will be skipped next time.
//!
//! ## Orientation Before Size
//!
//! Camera orientation metadata is applied before the width check, so a
//! portrait photo stored sideways is measured and scaled the way it is
//! displayed.

pub mod config;
pub mod imaging;
pub mod index;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
