//! End-to-end runs of the indexer against real image files.
//!
//! Each test builds a throwaway site root with an `images/gallery` folder,
//! runs the indexer with the production backend and inspects what landed on
//! disk.

use gallery_indexer::config::IndexerConfig;
use gallery_indexer::index::{IndexError, IndexEvent, IndexOutcome, update_gallery};
use gallery_indexer::manifest::GalleryManifest;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn site() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let gallery = tmp.path().join("images/gallery");
    fs::create_dir_all(&gallery).unwrap();
    (tmp, gallery)
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    })
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    fs::write(path, jpeg_bytes(width, height)).unwrap();
}

/// JPEG whose EXIF orientation says "rotate 90° clockwise to display".
fn write_rotated_jpeg(path: &Path, stored_width: u32, stored_height: u32) {
    let jpeg = jpeg_bytes(stored_width, stored_height);
    let tiff: [u8; 26] = [
        b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // big-endian header, IFD at 8
        0x00, 0x01, // one entry
        0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00, // orientation = 6
        0x00, 0x00, 0x00, 0x00, // no next IFD
    ];
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + 36);
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    fs::write(path, out).unwrap();
}

fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).save(path).unwrap();
}

fn write_gif(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| image::Rgba([(x % 256) as u8, 0, 0, 255]));
    img.save(path).unwrap();
}

fn index(root: &Path) -> Result<IndexOutcome, IndexError> {
    update_gallery(root, &IndexerConfig::default(), |_: &IndexEvent| {})
}

fn manifest_fulls(root: &Path) -> Vec<String> {
    GalleryManifest::load(&root.join("gallery_data.json"))
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.full.clone())
        .collect()
}

#[test]
fn single_wide_jpeg_is_halved() {
    let (tmp, gallery) = site();
    write_jpeg(&gallery.join("cat.jpg"), 800, 600);

    index(tmp.path()).unwrap();

    assert_eq!(
        image::image_dimensions(gallery.join("cat-low.jpg")).unwrap(),
        (400, 300)
    );
    let json = fs::read_to_string(tmp.path().join("gallery_data.json")).unwrap();
    assert_eq!(
        json,
        "[\n    {\n        \"full\": \"images/gallery/cat.jpg\",\n        \"low\": \"images/gallery/cat-low.jpg\"\n    }\n]"
    );
}

#[test]
fn small_png_and_gif_keep_their_size() {
    let (tmp, gallery) = site();
    write_gif(&gallery.join("b.gif"), 120, 40);
    write_png(&gallery.join("a.png"), 300, 200);

    index(tmp.path()).unwrap();

    assert_eq!(
        image::image_dimensions(gallery.join("a-low.png")).unwrap(),
        (300, 200)
    );
    assert_eq!(
        image::image_dimensions(gallery.join("b-low.gif")).unwrap(),
        (120, 40)
    );
    assert_eq!(
        manifest_fulls(tmp.path()),
        vec!["images/gallery/a.png", "images/gallery/b.gif"]
    );
}

#[test]
fn missing_folder_leaves_manifest_untouched() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("gallery_data.json");
    fs::write(&manifest, "keep me").unwrap();

    let outcome = index(tmp.path()).unwrap();

    assert_eq!(
        outcome,
        IndexOutcome::SourceMissing(PathBuf::from("images/gallery"))
    );
    assert_eq!(fs::read_to_string(&manifest).unwrap(), "keep me");
}

#[test]
fn missing_folder_does_not_create_manifest() {
    let tmp = TempDir::new().unwrap();
    index(tmp.path()).unwrap();
    assert!(!tmp.path().join("gallery_data.json").exists());
}

#[test]
fn orphan_low_res_file_is_ignored() {
    let (tmp, gallery) = site();
    write_png(&gallery.join("x-low.png"), 50, 50);

    index(tmp.path()).unwrap();

    assert!(manifest_fulls(tmp.path()).is_empty());
    assert!(!gallery.join("x-low-low.png").exists());
}

#[test]
fn non_images_never_appear() {
    let (tmp, gallery) = site();
    write_png(&gallery.join("a.png"), 10, 10);
    fs::write(gallery.join("notes.txt"), "hello").unwrap();
    fs::write(gallery.join("scan.bmp"), b"BM").unwrap();

    index(tmp.path()).unwrap();

    assert_eq!(manifest_fulls(tmp.path()), vec!["images/gallery/a.png"]);
    assert!(!gallery.join("notes-low.txt").exists());
}

#[test]
fn second_run_is_a_no_op() {
    let (tmp, gallery) = site();
    write_jpeg(&gallery.join("cat.jpg"), 800, 600);
    write_png(&gallery.join("dog.png"), 900, 300);

    index(tmp.path()).unwrap();
    let first_cat = fs::read(gallery.join("cat-low.jpg")).unwrap();
    let first_dog = fs::read(gallery.join("dog-low.png")).unwrap();
    let first_manifest = fs::read_to_string(tmp.path().join("gallery_data.json")).unwrap();

    let mut events = Vec::new();
    let outcome = update_gallery(tmp.path(), &IndexerConfig::default(), |e: &IndexEvent| {
        events.push(e.clone())
    })
    .unwrap();

    let IndexOutcome::Written(summary) = outcome else {
        panic!("expected a written manifest");
    };
    assert_eq!(summary.generated, 0);
    assert_eq!(summary.skipped, 2);
    assert!(
        events
            .iter()
            .all(|e| matches!(e, IndexEvent::LowResSkipped { .. }))
    );
    assert_eq!(fs::read(gallery.join("cat-low.jpg")).unwrap(), first_cat);
    assert_eq!(fs::read(gallery.join("dog-low.png")).unwrap(), first_dog);
    assert_eq!(
        fs::read_to_string(tmp.path().join("gallery_data.json")).unwrap(),
        first_manifest
    );
}

#[test]
fn stale_low_res_is_not_regenerated() {
    let (tmp, gallery) = site();
    write_jpeg(&gallery.join("cat.jpg"), 800, 600);
    write_jpeg(&gallery.join("cat-low.jpg"), 10, 10);

    index(tmp.path()).unwrap();

    assert_eq!(
        image::image_dimensions(gallery.join("cat-low.jpg")).unwrap(),
        (10, 10)
    );
}

#[test]
fn exif_orientation_applied_before_resize() {
    let (tmp, gallery) = site();
    // Stored 600x800, displayed 800x600 after the quarter turn
    write_rotated_jpeg(&gallery.join("turned.jpg"), 600, 800);

    index(tmp.path()).unwrap();

    assert_eq!(
        image::image_dimensions(gallery.join("turned-low.jpg")).unwrap(),
        (400, 300)
    );
}

#[test]
fn uppercase_extension_kept_in_low_res_name() {
    let (tmp, gallery) = site();
    write_jpeg(&gallery.join("Beach.JPG"), 500, 500);

    index(tmp.path()).unwrap();

    assert!(gallery.join("Beach-low.JPG").exists());
    let manifest = GalleryManifest::load(&tmp.path().join("gallery_data.json")).unwrap();
    assert_eq!(manifest.entries()[0].low, "images/gallery/Beach-low.JPG");
}

#[test]
fn corrupt_image_aborts_run_keeping_earlier_derivatives() {
    let (tmp, gallery) = site();
    write_png(&gallery.join("a.png"), 500, 100);
    fs::write(gallery.join("b.png"), b"not an image at all").unwrap();
    write_png(&gallery.join("c.png"), 500, 100);

    let result = index(tmp.path());

    assert!(matches!(result, Err(IndexError::Imaging(_))));
    assert!(gallery.join("a-low.png").exists());
    assert!(!gallery.join("b-low.png").exists());
    assert!(!gallery.join("c-low.png").exists());
    assert!(!tmp.path().join("gallery_data.json").exists());
}

#[test]
fn every_source_appears_exactly_once_sorted() {
    let (tmp, gallery) = site();
    for name in ["m.png", "B.png", "a.png", "z.png", "a-low.png"] {
        write_png(&gallery.join(name), 20, 20);
    }

    index(tmp.path()).unwrap();

    let fulls = manifest_fulls(tmp.path());
    assert_eq!(
        fulls,
        vec![
            "images/gallery/B.png",
            "images/gallery/a.png",
            "images/gallery/m.png",
            "images/gallery/z.png",
        ]
    );
    assert!(fulls.windows(2).all(|w| w[0] <= w[1]));
}
