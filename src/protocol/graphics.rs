//! # ESC/POS Bit Image Graphics
//!
//! Packs a [`RasterImage`] into the 24-dot double-density bit-image command
//! (`ESC * 33 nL nH d1...dk`).
//!
//! ## Strip Layout
//!
//! The image is sent in horizontal strips of 24 rows. Within a strip every
//! column becomes 3 bytes stacked top to bottom, and within each byte the
//! most significant bit is the topmost dot:
//!
//! ```text
//!            column x
//!          ┌─────────┐
//! row o+0  │ byte 0  │ bit 7 (MSB)
//!   ...    │         │
//! row o+7  │         │ bit 0
//! row o+8  │ byte 1  │ bit 7
//!   ...    │         │
//! row o+23 │ byte 2  │ bit 0
//!          └─────────┘
//! ```
//!
//! Each strip is `ESC * 33 nL nH`, `width × 3` data bytes, then `LF`. Rows
//! past the bottom of the image are sent as white, so a final partial strip
//! is padded rather than dropped.
//!
//! ## Line Spacing
//!
//! Line spacing is set to 24 dots before the first strip so strips abut, and
//! restored to the default (`ESC 2`) after the last one.

use log::debug;

use super::commands::{ESC, LF, default_line_spacing, line_spacing, u16_le};
use crate::error::PosError;
use crate::render::raster::RasterImage;

/// Rows covered by one bit-image strip.
pub const STRIP_HEIGHT: usize = 24;

/// `m` for 24-dot double-density bit-image mode.
pub const DOUBLE_DENSITY_24: u8 = 33;

/// Bytes per column in a 24-dot strip.
const BYTES_PER_COLUMN: usize = STRIP_HEIGHT / 8;

/// Header bytes of one strip: `ESC * m nL nH`.
pub const STRIP_HEADER_LEN: usize = 5;

/// Number of strips needed for an image `height` rows tall.
#[inline]
pub fn strip_count(height: usize) -> usize {
    height.div_ceil(STRIP_HEIGHT)
}

/// Pack one strip's column data, starting at row `offset`.
///
/// Byte `k` of column `x` covers rows `(offset/8 + k)*8 .. +8`, MSB first.
pub fn pack_strip(image: &RasterImage, offset: usize) -> Vec<u8> {
    let width = image.width();
    let dots = image.dots();
    let mut data = Vec::with_capacity(width * BYTES_PER_COLUMN);

    for x in 0..width {
        for k in 0..BYTES_PER_COLUMN {
            let mut byte = 0u8;
            for b in 0..8 {
                let y = (offset / 8 + k) * 8 + b;
                let i = y * width + x;
                if i < dots.len() && dots[i] {
                    byte |= 0x80 >> b;
                }
            }
            data.push(byte);
        }
    }
    data
}

/// # Print Bit Image (ESC * m nL nH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC * 33 nL nH d1...dk LF |
/// | Hex     | 1B 2A 21 nL nH d1...dk 0A |
///
/// The table is the layout of one strip. The whole image is wrapped:
///
/// | Part | Bytes |
/// |------|-------|
/// | Prefix | `ESC 3 24` (1B 33 18), 24-dot line spacing |
/// | Strips | one command per 24-row strip, as above |
/// | Suffix | `ESC 2` (1B 32), default line spacing |
///
/// ## Errors
///
/// Images wider than 65535 dots cannot be expressed in `nL nH`.
///
/// ```
/// use poswire::protocol::graphics;
/// use poswire::render::raster::RasterImage;
///
/// let cmd = graphics::bit_image(&RasterImage::filled(2, 24)).unwrap();
/// // ESC 3 24 | ESC * 33 2 0 | 6 × 0xFF | LF | ESC 2
/// assert_eq!(cmd.len(), 3 + 5 + 6 + 1 + 2);
/// ```
pub fn bit_image(image: &RasterImage) -> Result<Vec<u8>, PosError> {
    let width = u16::try_from(image.width()).map_err(|_| {
        PosError::InvalidArgument(format!(
            "bit image width {} exceeds 65535 dots",
            image.width()
        ))
    })?;
    let [nl, nh] = u16_le(width);

    let strips = strip_count(image.height());
    let strip_len = STRIP_HEADER_LEN + image.width() * BYTES_PER_COLUMN + 1;
    let mut cmd = Vec::with_capacity(strips * strip_len + 5);

    cmd.extend(line_spacing(STRIP_HEIGHT as u8));
    let mut offset = 0;
    while offset < image.height() {
        cmd.extend_from_slice(&[ESC, b'*', DOUBLE_DENSITY_24, nl, nh]);
        cmd.extend(pack_strip(image, offset));
        cmd.push(LF);
        offset += STRIP_HEIGHT;
    }
    cmd.extend(default_line_spacing());

    debug!(
        "bit image {}x{}: {} strips, {} bytes",
        image.width(),
        image.height(),
        strips,
        cmd.len()
    );
    Ok(cmd)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Split the command into its strips (without the line spacing wrapper).
    /// Per-strip commands, without the line spacing prefix and suffix.
    fn strips(cmd: &[u8], width: usize) -> Vec<&[u8]> {
        let body = &cmd[3..cmd.len() - 2];
        body.chunks(STRIP_HEADER_LEN + width * 3 + 1).collect()
    }

    #[test]
    fn test_wrapped_in_line_spacing() {
        let cmd = bit_image(&RasterImage::blank(4, 10)).unwrap();
        assert_eq!(&cmd[..3], &[0x1B, 0x33, 24]);
        assert_eq!(&cmd[cmd.len() - 2..], &[0x1B, 0x32]);
    }

    #[test]
    fn test_strip_header() {
        let cmd = bit_image(&RasterImage::blank(300, 1)).unwrap();
        // 300 = 0x012C
        assert_eq!(&cmd[3..8], &[0x1B, 0x2A, 33, 0x2C, 0x01]);
    }

    #[test]
    fn test_strip_count_and_size() {
        for (width, height) in [(1, 1), (8, 24), (8, 25), (16, 48), (3, 71), (5, 0)] {
            let cmd = bit_image(&RasterImage::blank(width, height)).unwrap();
            let expected_strips = height.div_ceil(24);
            assert_eq!(strip_count(height), expected_strips);
            assert_eq!(
                cmd.len(),
                3 + expected_strips * (STRIP_HEADER_LEN + width * 3 + 1) + 2,
                "{width}x{height}"
            );
            for strip in strips(&cmd, width) {
                assert_eq!(*strip.last().unwrap(), LF);
            }
        }
    }

    #[test]
    fn test_white_image_packs_to_zero() {
        let cmd = bit_image(&RasterImage::blank(10, 50)).unwrap();
        for strip in strips(&cmd, 10) {
            assert!(strip[STRIP_HEADER_LEN..strip.len() - 1].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_black_image_packs_to_ff() {
        let cmd = bit_image(&RasterImage::filled(10, 48)).unwrap();
        for strip in strips(&cmd, 10) {
            assert!(strip[STRIP_HEADER_LEN..strip.len() - 1].iter().all(|&b| b == 0xFF));
        }
    }

    #[test]
    fn test_partial_strip_pads_with_white() {
        // 10 rows: byte 0 full, byte 1 has rows 8..10 → 0b1100_0000, byte 2 empty
        let data = pack_strip(&RasterImage::filled(2, 10), 0);
        assert_eq!(data, vec![0xFF, 0xC0, 0x00, 0xFF, 0xC0, 0x00]);
    }

    #[test]
    fn test_msb_is_topmost_row() {
        let mut image = RasterImage::blank(2, 24);
        image.set(0, 0, true); // byte 0, bit 7
        image.set(0, 9, true); // byte 1, bit 6
        image.set(1, 23, true); // byte 2, bit 0
        let data = pack_strip(&image, 0);
        assert_eq!(data, vec![0x80, 0x40, 0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_second_strip_reads_rows_24_onward() {
        let mut image = RasterImage::blank(1, 30);
        image.set(0, 24, true);
        image.set(0, 29, true);
        assert_eq!(pack_strip(&image, 0), vec![0, 0, 0]);
        assert_eq!(pack_strip(&image, 24), vec![0b1000_0100, 0, 0]);
    }

    #[test]
    fn test_zero_height_has_no_strips() {
        let cmd = bit_image(&RasterImage::blank(8, 0)).unwrap();
        assert_eq!(cmd, vec![0x1B, 0x33, 24, 0x1B, 0x32]);
    }

    #[test]
    fn test_too_wide_is_rejected() {
        let image = RasterImage::blank(70_000, 0);
        assert!(matches!(bit_image(&image), Err(PosError::InvalidArgument(_))));
    }
}
