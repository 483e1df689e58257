//! Filename rules shared by scanning and derivation.
//!
//! A gallery file name is split into a base and an extension at the last dot,
//! ignoring any leading dots (so `.hidden` has no extension). The low-res
//! companion of `<base><ext>` is `<base><suffix><ext>`, keeping the extension
//! exactly as written:
//!
//! - `photo.jpg` → `photo-low.jpg`
//! - `Beach.JPEG` → `Beach-low.JPEG`
//! - `a.b.png` → `a.b-low.png`

use std::path::Path;

/// Split a file name into `(base, extension)`, the extension keeping its dot.
///
/// - `"photo.jpg"` → `("photo", ".jpg")`
/// - `"archive.tar.gz"` → `("archive.tar", ".gz")`
/// - `".hidden"` → `(".hidden", "")`
/// - `"README"` → `("README", "")`
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(pos) => name.split_at(leading_dots + pos),
        None => (name, ""),
    }
}

/// Whether `ext` (dot included) is in the allow-list, ignoring ASCII case.
pub fn is_allowed_extension(ext: &str, allowed: &[String]) -> bool {
    !ext.is_empty() && allowed.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

/// Whether a base name already carries the low-res suffix.
///
/// The comparison is case-sensitive: `photo-LOW` is a regular source.
pub fn is_low_res_base(base: &str, suffix: &str) -> bool {
    base.ends_with(suffix)
}

/// Build the low-res file name for a source file name.
pub fn low_res_name(name: &str, suffix: &str) -> String {
    let (base, ext) = split_extension(name);
    format!("{base}{suffix}{ext}")
}

/// Render a path for the manifest: forward slashes regardless of host.
pub fn manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
