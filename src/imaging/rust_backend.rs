//! Pure Rust image processing backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image::ImageReader`, format sniffed from content |
//! | Orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `jpeg_encoder::Encoder` at quality, optimized Huffman tables |
//! | Encode → WebP | `webp::Encoder` (libwebp), lossy at quality |
//! | Encode → PNG | `PngEncoder` defaults |
//! | Encode → GIF | `GifEncoder` defaults, single frame |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_low_res_dimensions, needs_downscale};
use super::params::{LowResParams, Quality};
use image::codecs::gif::GifEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, Frame, ImageDecoder, ImageError, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encoders the backend can write, chosen by output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Jpeg,
    WebP,
    Png,
    Gif,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self, BackendError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            other => Err(BackendError::ProcessingFailed(format!(
                "Unsupported output format: {other}"
            ))),
        }
    }
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, e: ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Open a decoder for `path`, trusting file content over the extension.
fn open_decoder(path: &Path) -> Result<impl ImageDecoder, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_error(path, e))
}

/// Dimensions once `orientation` is applied: quarter turns swap the axes.
fn oriented_dimensions(raw: (u32, u32), orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Rotate90
        | Orientation::Rotate270
        | Orientation::Rotate90FlipH
        | Orientation::Rotate270FlipH => (raw.1, raw.0),
        _ => raw,
    }
}

/// Load and decode an image with its embedded orientation applied.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = open_decoder(path)?;
    let orientation = decoder.orientation().map_err(|e| decode_error(path, e))?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Encode `img` to `path`, picking the encoder from the extension.
///
/// A half-written file is removed on failure so the next run does not
/// mistake it for a finished derivative.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let format = OutputFormat::from_path(path)?;
    let result = write_image(img, path, format, quality);
    if result.is_err() {
        let _ = std::fs::remove_file(path);
    }
    result
}

fn write_image(
    img: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: Quality,
) -> Result<(), BackendError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let encoded = match format {
        OutputFormat::Jpeg => encode_jpeg(img, &mut writer, quality),
        OutputFormat::WebP => encode_webp(img, quality)
            .and_then(|bytes| writer.write_all(&bytes).map_err(|e| e.to_string())),
        OutputFormat::Png => img
            .write_with_encoder(PngEncoder::new(&mut writer))
            .map_err(|e| e.to_string()),
        OutputFormat::Gif => GifEncoder::new(&mut writer)
            .encode_frame(Frame::new(img.to_rgba8()))
            .map_err(|e| e.to_string()),
    };
    encoded.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    writer.flush()?;
    Ok(())
}

/// Baseline JPEG at `quality` with optimized Huffman tables. JPEG has no
/// alpha channel, so everything is flattened to RGB8 first.
fn encode_jpeg<W: Write>(img: &DynamicImage, writer: W, quality: Quality) -> Result<(), String> {
    let rgb = img.to_rgb8();
    let (width, height) = match (u16::try_from(rgb.width()), u16::try_from(rgb.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(format!(
                "{}x{} exceeds the JPEG size limit",
                rgb.width(),
                rgb.height()
            ));
        }
    };
    let mut encoder = jpeg_encoder::Encoder::new(writer, quality.value() as u8);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| e.to_string())
}

/// Lossy WebP at `quality`, keeping alpha when the image has it.
fn encode_webp(img: &DynamicImage, quality: Quality) -> Result<webp::WebPMemory, String> {
    let quality = quality.value() as f32;
    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
            .encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
            .encode_simple(false, quality)
    };
    encoded.map_err(|e| format!("{e:?}"))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let mut decoder = open_decoder(path)?;
        let orientation = decoder.orientation().map_err(|e| decode_error(path, e))?;
        Ok(oriented_dimensions(decoder.dimensions(), orientation).into())
    }

    fn downscale(&self, params: &LowResParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let (width, height) = (img.width(), img.height());

        let img = if needs_downscale(width, params.max_width) {
            let (new_w, new_h) = calculate_low_res_dimensions((width, height), params.max_width);
            img.resize_exact(new_w, new_h, FilterType::Lanczos3)
        } else {
            img
        };

        save_image(&img, &params.output, params.quality)?;
        Ok(Dimensions {
            width: img.width(),
            height: img.height(),
        })
    }
}
