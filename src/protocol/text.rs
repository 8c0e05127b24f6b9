//! # ESC/POS Text Styling Commands
//!
//! Stateless emit-a-command builders for text effects. Nothing here tracks a
//! "current style": callers issue matching on/off pairs themselves, the same
//! way the printer treats each command independently.
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Alignment | ESC a n | left / center / right |
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text (2-dot line) |
//! | Invert | GS B n | White on black |
//! | Upside Down | ESC { n | 180° rotation |
//! | Font | ESC ! n | Font A (12×24) / Font B (9×17) |
//! | Size | GS ! n | Double width / height |

use super::codepage::Region;
use super::commands::{ESC, GS, HT};
use crate::error::PosError;

/// Largest accepted right-side character spacing (ESC SP n).
pub const MAX_CHARACTER_SPACING: u8 = 48;

/// Largest accepted number of inline tabs in one call.
pub const MAX_INLINE_TABS: u8 = 4;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// Takes effect at the start of the next line and also positions bit images,
/// barcodes and QR symbols.
///
/// ```
/// use poswire::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Convenience function for left alignment
#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

/// Convenience function for center alignment
#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

/// Convenience function for right alignment
#[inline]
pub fn align_right() -> Vec<u8> {
    align(Alignment::Right)
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// Turn emphasized (bold) printing on or off (ESC E n).
#[inline]
pub fn bold(on: bool) -> Vec<u8> {
    vec![ESC, b'E', u8::from(on)]
}

/// Turn underline on (2-dot) or off (ESC - n).
#[inline]
pub fn underline(on: bool) -> Vec<u8> {
    vec![ESC, b'-', if on { 2 } else { 0 }]
}

/// Turn white/black reverse printing on or off (GS B n).
#[inline]
pub fn invert(on: bool) -> Vec<u8> {
    vec![GS, b'B', u8::from(on)]
}

/// Turn upside-down printing on or off (ESC { n).
///
/// Alignment is mirrored while this mode is active.
#[inline]
pub fn upside_down(on: bool) -> Vec<u8> {
    vec![ESC, b'{', u8::from(on)]
}

// ============================================================================
// FONTS AND SIZE
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots, 42 columns on the default layout
    #[default]
    A = 0,
    /// Font B: 9×17 dots
    B = 1,
}

/// # Select Print Mode (ESC ! n)
///
/// Only bit 0 (font) is driven here; the other mode bits are left cleared.
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'!', f as u8]
}

/// # Select Character Size (GS ! n)
///
/// | Width | Height | n  |
/// |-------|--------|----|
/// | 1x    | 1x     | 0  |
/// | 2x    | 1x     | 1  |
/// | 1x    | 2x     | 16 |
/// | 2x    | 2x     | 17 |
pub fn size(double_width: bool, double_height: bool) -> Vec<u8> {
    let n = match (double_width, double_height) {
        (true, true) => 17,
        (false, true) => 16,
        (true, false) => 1,
        (false, false) => 0,
    };
    vec![GS, b'!', n]
}

// ============================================================================
// SPACING AND TABS
// ============================================================================

/// # Set Right-Side Character Spacing (ESC SP n)
///
/// ## Errors
///
/// `dots` above [`MAX_CHARACTER_SPACING`] is rejected.
pub fn character_spacing(dots: u8) -> Result<Vec<u8>, PosError> {
    if dots > MAX_CHARACTER_SPACING {
        return Err(PosError::InvalidArgument(format!(
            "character spacing must be between 0 and {MAX_CHARACTER_SPACING} (got {dots})"
        )));
    }
    Ok(vec![ESC, b' ', dots])
}

/// Move the print position `count` tab stops forward (8 characters each).
///
/// ## Errors
///
/// `count` above [`MAX_INLINE_TABS`] is rejected.
pub fn tabs(count: u8) -> Result<Vec<u8>, PosError> {
    if count > MAX_INLINE_TABS {
        return Err(PosError::InvalidArgument(format!(
            "tab count must be between 0 and {MAX_INLINE_TABS} (got {count})"
        )));
    }
    Ok(vec![HT; count as usize])
}

// ============================================================================
// CHARACTER CODE TABLE
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// ```
/// use poswire::protocol::codepage::Region;
/// use poswire::protocol::text::code_table;
///
/// assert_eq!(code_table(Region::Multilingual), vec![0x1B, 0x74, 2]);
/// ```
pub fn code_table(region: Region) -> Vec<u8> {
    vec![ESC, b't', region.selector()]
}

// ============================================================================
// TESTS
// ============================================================================
