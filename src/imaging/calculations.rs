//! Pure dimension math for low-res derivation. No I/O, no images.

/// Calculate the low-res dimensions for an image.
///
/// Images wider than `max_width` are scaled so the width becomes exactly
/// `max_width` and the height follows the same ratio, rounded down. Images at
/// or below the threshold keep their size. The height never drops below 1.
///
/// # Examples
/// ```
/// # use gallery_indexer::imaging::calculate_low_res_dimensions;
/// assert_eq!(calculate_low_res_dimensions((800, 600), 400), (400, 300));
/// assert_eq!(calculate_low_res_dimensions((300, 200), 400), (300, 200));
/// ```
pub fn calculate_low_res_dimensions(original: (u32, u32), max_width: u32) -> (u32, u32) {
    let (width, height) = original;
    if width <= max_width {
        return (width, height);
    }
    let ratio = max_width as f64 / width as f64;
    let new_height = (height as f64 * ratio) as u32;
    (max_width, new_height.max(1))
}

/// Whether an image of this width would be downscaled.
pub fn needs_downscale(width: u32, max_width: u32) -> bool {
    width > max_width
}
