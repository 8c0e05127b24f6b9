//! # ESC/POS Device Commands
//!
//! Control bytes and the paper/device commands (initialize, feed, cut, beep,
//! line spacing) shared by every other protocol module.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `FF`, `HT`
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `ESC d n`, `GS V m n`, `GS ( k pL pH ...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

use crate::error::PosError;

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics, barcodes, character size and the cutter.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Print and feed a single line in standard mode
pub const FF: u8 = 0x0C;

/// HT (Horizontal Tab) - Advance to next tab position (every 8 characters)
pub const HT: u8 = 0x09;

/// NUL - Terminates format-A barcode data
pub const NUL: u8 = 0x00;

/// Byte 196 renders as `─` in PC437, PC850, PC858 and PC865.
pub const BOX_HORIZONTAL: u8 = 0xC4;

/// Widest horizontal rule in default-font characters.
pub const MAX_LINE_CHARS: usize = 42;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state and clears the print
/// buffer. Every job starts with it.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ```
/// use poswire::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED AND CUT
// ============================================================================

/// Feed one line (FF).
#[inline]
pub fn feed_line() -> Vec<u8> {
    vec![FF]
}

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC d n |
/// | Hex     | 1B 64 n |
///
/// ## Errors
///
/// `n` must be between 1 and 255; zero is rejected with
/// [`PosError::InvalidArgument`].
pub fn feed_lines(n: u8) -> Result<Vec<u8>, PosError> {
    if n == 0 {
        return Err(PosError::InvalidArgument(
            "feed line count must be between 1 and 255".to_string(),
        ));
    }
    Ok(vec![ESC, b'd', n])
}

/// # Feed and Full Cut (GS V A 0)
///
/// Feeds to the cutter position and cuts the paper.
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V A NUL  |
/// | Hex     | 1D 56 41 00 |
/// | Decimal | 29 86 65 0  |
#[inline]
pub fn feed_and_cut() -> Vec<u8> {
    vec![GS, b'V', b'A', 0]
}

/// # Horizontal Rule
///
/// `length` box-drawing characters (clamped to [`MAX_LINE_CHARS`]) followed
/// by a line feed. A zero length emits nothing.
pub fn horizontal_line(length: usize) -> Vec<u8> {
    if length == 0 {
        return Vec::new();
    }
    let mut cmd = vec![BOX_HORIZONTAL; length.min(MAX_LINE_CHARS)];
    cmd.push(LF);
    cmd
}

// ============================================================================
// LINE SPACING
// ============================================================================

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the line feed amount to `n` dots. Bit images use 24 so consecutive
/// strips touch without a gap.
#[inline]
pub fn line_spacing(dots: u8) -> Vec<u8> {
    vec![ESC, b'3', dots]
}

/// # Restore Default Line Spacing (ESC 2)
#[inline]
pub fn default_line_spacing() -> Vec<u8> {
    vec![ESC, b'2']
}

// ============================================================================
// BUZZER
// ============================================================================

/// # Beep (ESC B n t)
///
/// Sounds the buzzer `times` times for `duration` × 100 ms.
///
/// ## Errors
///
/// Both parameters must be between 1 and 9.
pub fn beep(times: u8, duration: u8) -> Result<Vec<u8>, PosError> {
    if !(1..=9).contains(&times) || !(1..=9).contains(&duration) {
        return Err(PosError::InvalidArgument(format!(
            "beep times and duration must be between 1 and 9 (got {times}, {duration})"
        )));
    }
    Ok(vec![ESC, b'B', times, duration])
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use poswire::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]); // 576 = 0x0240
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_feed_line() {
        assert_eq!(feed_line(), vec![0x0C]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(1).unwrap(), vec![0x1B, 0x64, 1]);
        assert_eq!(feed_lines(255).unwrap(), vec![0x1B, 0x64, 255]);
    }

    #[test]
    fn test_feed_lines_rejects_zero() {
        assert!(matches!(feed_lines(0), Err(PosError::InvalidArgument(_))));
    }

    #[test]
    fn test_feed_and_cut() {
        assert_eq!(feed_and_cut(), vec![29, 86, 65, 0]);
    }

    #[test]
    fn test_horizontal_line() {
        let line = horizontal_line(3);
        assert_eq!(line, vec![196, 196, 196, 10]);
    }

    #[test]
    fn test_horizontal_line_clamps() {
        let line = horizontal_line(100);
        assert_eq!(line.len(), MAX_LINE_CHARS + 1);
        assert_eq!(*line.last().unwrap(), LF);
    }

    #[test]
    fn test_horizontal_line_zero_is_empty() {
        assert!(horizontal_line(0).is_empty());
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing(24), vec![0x1B, 0x33, 24]);
        assert_eq!(default_line_spacing(), vec![0x1B, 0x32]);
    }

    #[test]
    fn test_beep() {
        assert_eq!(beep(3, 2).unwrap(), vec![0x1B, 0x42, 3, 2]);
        assert!(beep(0, 2).is_err());
        assert!(beep(3, 10).is_err());
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(576), [0x40, 0x02]);
    }
}
