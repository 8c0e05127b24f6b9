//! # Rendering Module
//!
//! Converts decoded bitmaps into monochrome dot grids for the bit-image
//! command.
//!
//! ## Modules
//!
//! - [`raster`]: preprocessing (resize, center) and luminance threshold
//!
//! ## Usage Example
//!
//! ```
//! use image::{DynamicImage, RgbImage};
//! use poswire::protocol::graphics;
//! use poswire::render::raster::{self, ImageLimits};
//!
//! let bitmap = DynamicImage::ImageRgb8(RgbImage::new(64, 30));
//! let dots = raster::rasterize(&bitmap, &ImageLimits::default(), true);
//! let bytes = graphics::bit_image(&dots).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod raster;
