//! CLI output formatting.
//!
//! Each command has `format_*` functions that return lines (pure, no I/O,
//! unit tested) and `print_*` wrappers that write them to stdout.
//!
//! ## Run
//!
//! ```text
//! 001 cat.jpg
//!     cat-low.jpg: generated 400x300
//! 002 dog.jpg
//!     dog-low.jpg: exists
//! Success! Found 2 images. Saved to gallery_data.json.
//! ```
//!
//! ## Check
//!
//! ```text
//! images/gallery (2 images)
//! 001 cat.jpg
//!     cat-low.jpg: missing, 800x600 -> 400x300
//! 002 dog.jpg
//!     dog-low.jpg: exists
//! ```

use crate::index::{IndexEvent, IndexSummary, PlannedImage};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn format_dims((w, h): (u32, u32)) -> String {
    format!("{w}x{h}")
}

/// Message for a source folder that does not exist.
pub fn format_missing_source(source_dir: &Path) -> String {
    format!("Error: Folder '{}' not found.", source_dir.display())
}

/// Final line of a successful run.
pub fn format_summary(summary: &IndexSummary) -> String {
    format!(
        "Success! Found {} images. Saved to {}.",
        summary.count,
        summary.output.display()
    )
}

/// Format one progress event as display lines.
pub fn format_index_event(event: &IndexEvent) -> Vec<String> {
    match event {
        IndexEvent::LowResSkipped {
            index,
            file_name,
            low_file_name,
        } => vec![
            format!("{} {}", format_index(*index), file_name),
            format!("    {}: exists", low_file_name),
        ],
        IndexEvent::LowResGenerated {
            index,
            file_name,
            low_file_name,
            dimensions,
        } => vec![
            format!("{} {}", format_index(*index), file_name),
            format!(
                "    {}: generated {}",
                low_file_name,
                format_dims(dimensions.as_tuple())
            ),
        ],
    }
}

/// Format the dry-run listing of the `check` command.
pub fn format_check_output(source_dir: &Path, planned: &[PlannedImage]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} images)",
        source_dir.display(),
        planned.len()
    )];

    for (i, image) in planned.iter().enumerate() {
        let candidate = &image.candidate;
        lines.push(format!("{} {}", format_index(i + 1), candidate.file_name));
        match image.derivation {
            None => lines.push(format!("    {}: exists", candidate.low_file_name)),
            Some((original, target)) => lines.push(format!(
                "    {}: missing, {} -> {}",
                candidate.low_file_name,
                format_dims(original),
                format_dims(target)
            )),
        }
    }

    lines
}

pub fn print_missing_source(source_dir: &Path) {
    println!("{}", format_missing_source(source_dir));
}

pub fn print_index_event(event: &IndexEvent) {
    for line in format_index_event(event) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &IndexSummary) {
    println!("{}", format_summary(summary));
}

pub fn print_check_output(source_dir: &Path, planned: &[PlannedImage]) {
    for line in format_check_output(source_dir, planned) {
        println!("{}", line);
    }
}
