//! Decoding, color normalization and resizing of source images.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use std::path::Path;

use crate::error::DecodeError;
use crate::types::ProcessedImage;

/// Turns a source file into a save-ready thumbnail.
pub trait Transformer: Send + Sync {
    /// Decode the file at `path` and fit it within `bounds` (width, height).
    fn transform(&self, path: &Path, bounds: (u32, u32)) -> Result<ProcessedImage, DecodeError>;
}

/// Default transformer backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailGenerator;

impl ThumbnailGenerator {
    /// Create a new thumbnail generator.
    pub fn new() -> Self {
        Self
    }

    /// Decode an image from disk.
    ///
    /// The format is sniffed from the file content first; the extension is
    /// only a fallback.
    pub fn decode(path: &Path) -> Result<DynamicImage, DecodeError> {
        let reader = ImageReader::open(path)
            .map_err(|e| DecodeError {
                path: path.to_path_buf(),
                message: format!("Cannot open file: {}", e),
            })?
            .with_guessed_format()
            .map_err(|e| DecodeError {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        reader.decode().map_err(|e| DecodeError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Normalize and resize an already-decoded image.
    pub fn thumbnail(image: DynamicImage, bounds: (u32, u32)) -> ProcessedImage {
        let rgb = flatten_to_rgb(image);
        let (width, height) = rgb.dimensions();
        let (target_w, target_h) = fit_within(width, height, bounds);

        if (target_w, target_h) == (width, height) {
            return rgb;
        }
        imageops::resize(&rgb, target_w, target_h, FilterType::Lanczos3)
    }
}

impl Transformer for ThumbnailGenerator {
    fn transform(&self, path: &Path, bounds: (u32, u32)) -> Result<ProcessedImage, DecodeError> {
        let decoded = Self::decode(path)?;
        tracing::trace!(
            "Decoded {:?}: {}x{} {:?}",
            path,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Ok(Self::thumbnail(decoded, bounds))
    }
}

/// Convert any color representation into opaque 8-bit RGB.
///
/// Images with alpha are composited onto white. Palette images arrive here
/// already expanded to RGB(A) by the decoder.
pub fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = u32::from(src[3]);
        for channel in 0..3 {
            let fg = u32::from(src[channel]);
            // Rounded integer form of fg * a + 255 * (1 - a)
            dst[channel] = ((fg * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        }
    }
    out
}

/// Largest size that fits within `bounds` with the same aspect ratio.
///
/// Never upscales. When a resize is needed exactly one side lands on its
/// bound; neither side drops below one pixel.
pub fn fit_within(width: u32, height: u32, bounds: (u32, u32)) -> (u32, u32) {
    let (max_w, max_h) = bounds;
    if width <= max_w && height <= max_h {
        return (width, height);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (bw, bh) = (u64::from(max_w), u64::from(max_h));

    if w * bh >= h * bw {
        // Width is the limiting side
        let new_h = ((h * bw + w / 2) / w).clamp(1, bh);
        (max_w, new_h as u32)
    } else {
        let new_w = ((w * bh + h / 2) / h).clamp(1, bw);
        (new_w as u32, max_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(fit_within(300, 600, (200, 200)), (100, 200));
    }

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(fit_within(1000, 500, (200, 200)), (200, 100));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(100, 50, (200, 200)), (100, 50));
        assert_eq!(fit_within(200, 200, (200, 200)), (200, 200));
    }

    #[test]
    fn test_fit_within_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within(10_000, 1, (200, 200)), (200, 1));
        assert_eq!(fit_within(1, 10_000, (200, 200)), (1, 200));
    }

    #[test]
    fn test_fit_within_non_square_bounds() {
        // 400x400 into 300x100: height limits
        assert_eq!(fit_within(400, 400, (300, 100)), (100, 100));
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]));
        let rgb = flatten_to_rgb(DynamicImage::ImageRgba8(img));
        assert!(rgb.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_flatten_opaque_keeps_color() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let rgb = flatten_to_rgb(DynamicImage::ImageRgba8(img));
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_flatten_half_alpha_blends_toward_white() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let rgb = flatten_to_rgb(DynamicImage::ImageRgba8(img));
        let value = rgb.get_pixel(0, 0)[0];
        assert!((126..=128).contains(&value), "got {value}");
    }

    #[test]
    fn test_flatten_gray_alpha() {
        let img = GrayAlphaImage::from_pixel(2, 2, LumaA([0, 0]));
        let rgb = flatten_to_rgb(DynamicImage::ImageLumaA8(img));
        assert_eq!(rgb.get_pixel(1, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_flatten_grayscale_expands_channels() {
        let img = GrayImage::from_pixel(2, 2, image::Luma([77]));
        let rgb = flatten_to_rgb(DynamicImage::ImageLuma8(img));
        assert_eq!(rgb.get_pixel(0, 0).0, [77, 77, 77]);
    }

    #[test]
    fn test_thumbnail_resizes_large_image() {
        let img = DynamicImage::new_rgb8(1000, 500);
        let thumb = ThumbnailGenerator::thumbnail(img, (200, 200));
        assert_eq!(thumb.dimensions(), (200, 100));
    }

    #[test]
    fn test_transform_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(400, 100, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();
        let before = std::fs::read(&path).unwrap();

        let thumb = ThumbnailGenerator::new()
            .transform(&path, (200, 200))
            .unwrap();
        assert_eq!(thumb.dimensions(), (200, 50));
        // Source file is left untouched
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_transform_detects_format_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let misnamed = dir.path().join("really_png.jpg");
        let img = RgbImage::from_pixel(10, 10, Rgb([1, 2, 3]));
        img.save_with_format(&misnamed, image::ImageFormat::Png)
            .unwrap();

        let thumb = ThumbnailGenerator::new()
            .transform(&misnamed, (200, 200))
            .unwrap();
        assert_eq!(thumb.dimensions(), (10, 10));
    }

    #[test]
    fn test_transform_palette_gif_transparency_becomes_white() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.gif");
        // Left half transparent, right half opaque red
        let img = RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([255, 0, 0, 255])
            }
        });
        img.save(&path).unwrap();

        let thumb = ThumbnailGenerator::new()
            .transform(&path, (200, 200))
            .unwrap();
        assert_eq!(thumb.dimensions(), (8, 8));

        let white = thumb.get_pixel(0, 0).0;
        assert!(white.iter().all(|&c| c > 245), "expected white, got {white:?}");
        let red = thumb.get_pixel(7, 7).0;
        assert!(red[0] > 230 && red[1] < 25 && red[2] < 25, "expected red, got {red:?}");
    }

    #[test]
    fn test_transform_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = ThumbnailGenerator::new()
            .transform(&path, (200, 200))
            .unwrap_err();
        assert_eq!(err.path, path);
    }
}
