//! # Monochrome Raster Conversion
//!
//! Turns a decoded bitmap into the dot grid printed by the bit-image command.
//!
//! ## Pipeline
//!
//! ```text
//! DynamicImage ──► flatten alpha ──► resize (if over limits) ──► center on canvas
//!                                                                   │
//!        RasterImage { width, height, dots } ◄── threshold ◄────────┘
//! ```
//!
//! ## Threshold
//!
//! ```text
//! luminance = 0.30·R + 0.59·G + 0.11·B
//! dot       = luminance < 127
//! ```
//!
//! There is no dithering: every pixel maps to exactly one dot.

use std::path::Path;

use image::{DynamicImage, ImageError, Rgb, RgbImage, imageops, imageops::FilterType};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PosError;

/// Pixels darker than this luminance become dots.
pub const LUMINANCE_THRESHOLD: f32 = 127.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// How an oversized bitmap is scaled into the image limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Stretch to exactly `max_width × max_height`, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Scale down to fit inside the limits, keeping aspect ratio.
    Fit,
}

/// Geometry limits applied during preprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    pub max_width: u32,
    pub max_height: u32,
    /// Width of the blank canvas used when centering.
    pub canvas_width: u32,
    pub resize_mode: ResizeMode,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_width: 576,
            max_height: 1200,
            canvas_width: 576,
            resize_mode: ResizeMode::Stretch,
        }
    }
}

/// A monochrome dot grid, `dots[y * width + x]`, `true` = print a dark dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    dots: Vec<bool>,
}

impl RasterImage {
    /// Wrap an existing dot grid.
    ///
    /// ## Errors
    ///
    /// `dots.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, dots: Vec<bool>) -> Result<Self, PosError> {
        if dots.len() != width * height {
            return Err(PosError::InvalidArgument(format!(
                "raster of {width}x{height} needs {} dots, got {}",
                width * height,
                dots.len()
            )));
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    /// An all-white (no dots) raster.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![false; width * height],
        }
    }

    /// An all-black raster.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![true; width * height],
        }
    }

    /// Threshold an RGB bitmap into dots.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let mut dots = vec![false; width * height];
        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            dots[y as usize * width + x as usize] = is_dot(r, g, b);
        }
        Self {
            width,
            height,
            dots,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The flat dot array, row-major.
    #[inline]
    pub fn dots(&self) -> &[bool] {
        &self.dots
    }

    /// Dot at `(x, y)`; anything outside the grid reads as white.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.dots[y * self.width + x]
    }

    /// Set the dot at `(x, y)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if x < self.width && y < self.height {
            self.dots[y * self.width + x] = on;
        }
    }
}

/// Weighted luminance of an RGB pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.30 * f32::from(r) + 0.59 * f32::from(g) + 0.11 * f32::from(b)
}

/// Whether a pixel prints as a dot.
#[inline]
pub fn is_dot(r: u8, g: u8, b: u8) -> bool {
    luminance(r, g, b) < LUMINANCE_THRESHOLD
}

/// Decode an image file.
///
/// ## Errors
///
/// [`PosError::NotFound`] when the file is missing, [`PosError::Image`] when
/// it cannot be decoded.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, PosError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PosError::NotFound(path.display().to_string()));
    }
    image::open(path).map_err(|e| match e {
        ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            PosError::NotFound(path.display().to_string())
        }
        other => PosError::Image(format!("Failed to decode {}: {}", path.display(), other)),
    })
}

/// Composite any alpha channel over white.
fn flatten_onto_white(source: &DynamicImage) -> RgbImage {
    if !source.color().has_alpha() {
        return source.to_rgb8();
    }
    let rgba = source.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let a = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

/// Resize (when over the limits) and optionally center the bitmap.
///
/// Centering composites the image onto a white canvas `canvas_width` wide,
/// horizontally centered and top-aligned. A canvas narrower than the image
/// grows to the image width.
pub fn preprocess(source: &DynamicImage, limits: &ImageLimits, center: bool) -> RgbImage {
    let rgb = flatten_onto_white(source);
    let (width, height) = rgb.dimensions();

    let resized = if width > limits.max_width || height > limits.max_height {
        match limits.resize_mode {
            ResizeMode::Stretch => {
                warn!(
                    "stretching {}x{} image to {}x{} (aspect ratio not kept)",
                    width, height, limits.max_width, limits.max_height
                );
                imageops::resize(&rgb, limits.max_width, limits.max_height, FilterType::Lanczos3)
            }
            ResizeMode::Fit => {
                let fitted = DynamicImage::ImageRgb8(rgb).resize(
                    limits.max_width,
                    limits.max_height,
                    FilterType::Lanczos3,
                );
                debug!(
                    "fit {}x{} image into {}x{}",
                    width,
                    height,
                    fitted.width(),
                    fitted.height()
                );
                fitted.to_rgb8()
            }
        }
    } else {
        rgb
    };

    if !center {
        return resized;
    }

    let canvas_width = limits.canvas_width.max(resized.width());
    let mut canvas = RgbImage::from_pixel(canvas_width, resized.height(), WHITE);
    let x = (canvas_width - resized.width()) / 2;
    imageops::overlay(&mut canvas, &resized, i64::from(x), 0);
    canvas
}

/// Full preprocessing + threshold pass.
pub fn rasterize(source: &DynamicImage, limits: &ImageLimits, center: bool) -> RasterImage {
    let prepared = preprocess(source, limits, center);
    let raster = RasterImage::from_rgb(&prepared);
    debug!("rasterized to {}x{} dots", raster.width, raster.height);
    raster
}
