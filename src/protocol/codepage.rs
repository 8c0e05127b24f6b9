//! # Character Code Tables
//!
//! Maps region identifiers to the printer's `ESC t n` selector byte and
//! encodes Unicode text into the matching single-byte code page.
//!
//! ASCII (U+0000–U+007F) passes through unchanged on every page. The upper
//! half (0x80–0xFF) is looked up in a per-page table. Encoding is strict:
//! characters with no representation are an error rather than a `?`.

use serde::{Deserialize, Serialize};

use crate::error::PosError;

/// Single-byte code pages the encoder can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePage {
    /// IBM PC437 (USA, Standard Europe)
    Pc437,
    /// IBM PC850 (Multilingual Latin-1)
    Pc850,
    /// IBM PC858 (PC850 with the euro sign at 0xD5)
    Pc858,
    /// IBM PC865 (Nordic)
    Pc865,
    /// Windows-1252
    Wpc1252,
}

/// Region identifiers accepted by the session.
///
/// | Region | Code page | ESC t n |
/// |--------|-----------|---------|
/// | Usa | PC437 | 0 |
/// | Multilingual | PC850 | 2 |
/// | Nordic | PC865 | 5 |
/// | Windows1252 | WPC1252 | 16 |
/// | Euro | PC858 | 19 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Usa,
    #[default]
    Multilingual,
    Nordic,
    Windows1252,
    Euro,
}

impl Region {
    /// The `ESC t n` selector byte for this region.
    pub const fn selector(self) -> u8 {
        match self {
            Self::Usa => 0,
            Self::Multilingual => 2,
            Self::Nordic => 5,
            Self::Windows1252 => 16,
            Self::Euro => 19,
        }
    }

    /// The code page text is encoded to while this region is selected.
    pub const fn code_page(self) -> CodePage {
        match self {
            Self::Usa => CodePage::Pc437,
            Self::Multilingual => CodePage::Pc850,
            Self::Nordic => CodePage::Pc865,
            Self::Windows1252 => CodePage::Wpc1252,
            Self::Euro => CodePage::Pc858,
        }
    }

    /// Parse a region name as used on the command line and in config files.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "usa" => Some(Self::Usa),
            "multilingual" => Some(Self::Multilingual),
            "nordic" => Some(Self::Nordic),
            "windows1252" => Some(Self::Windows1252),
            "euro" => Some(Self::Euro),
            _ => None,
        }
    }
}

// Upper halves, 16 characters per row starting at 0x80.
// NUL marks an unassigned position.

const PC437_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»",
    "░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩",
    "≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{A0}",
);

const PC850_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜø£Ø×ƒ",
    "áíóúñÑªº¿®¬½¼¡«»",
    "░▒▓│┤ÁÂÀ©╣║╗╝¢¥┐",
    "└┴┬├─┼ãÃ╚╔╩╦╠═╬¤",
    "ðÐÊËÈıÍÎÏ┘┌█▄¦Ì▀",
    "ÓßÔÒõÕµþÞÚÛÙýÝ¯´",
    "\u{AD}±‗¾¶§÷¸°¨·¹³²■\u{A0}",
);

const PC858_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜø£Ø×ƒ",
    "áíóúñÑªº¿®¬½¼¡«»",
    "░▒▓│┤ÁÂÀ©╣║╗╝¢¥┐",
    "└┴┬├─┼ãÃ╚╔╩╦╠═╬¤",
    "ðÐÊËÈ€ÍÎÏ┘┌█▄¦Ì▀",
    "ÓßÔÒõÕµþÞÚÛÙýÝ¯´",
    "\u{AD}±‗¾¶§÷¸°¨·¹³²■\u{A0}",
);

const PC865_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜø£Ø₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«¤",
    "░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩",
    "≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{A0}",
);

// 0xA0–0xFF of Windows-1252 is Latin-1 and handled arithmetically.
const WPC1252_80_9F: &str = concat!(
    "€\0‚ƒ„…†‡ˆ‰Š‹Œ\0Ž\0",
    "\0‘’“”•–—˜™š›œ\0žŸ",
);

impl CodePage {
    /// Human-readable page name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pc437 => "PC437",
            Self::Pc850 => "PC850",
            Self::Pc858 => "PC858",
            Self::Pc865 => "PC865",
            Self::Wpc1252 => "WPC1252",
        }
    }

    /// Map one character to its byte in this page.
    ///
    /// Returns `None` if the character has no representation.
    pub fn byte_for(self, ch: char) -> Option<u8> {
        if (ch as u32) < 0x80 {
            return Some(ch as u8);
        }
        match self {
            Self::Pc437 => lookup_high(PC437_HIGH, ch),
            Self::Pc850 => lookup_high(PC850_HIGH, ch),
            Self::Pc858 => lookup_high(PC858_HIGH, ch),
            Self::Pc865 => lookup_high(PC865_HIGH, ch),
            Self::Wpc1252 => match ch as u32 {
                0xA0..=0xFF => Some(ch as u8),
                _ => lookup_high(WPC1252_80_9F, ch),
            },
        }
    }

    /// Encode a whole string.
    ///
    /// ## Errors
    ///
    /// Fails with [`PosError::Encoding`] on the first unmappable character;
    /// no partial output is returned.
    pub fn encode(self, s: &str) -> Result<Vec<u8>, PosError> {
        let mut out = Vec::with_capacity(s.len());
        for ch in s.chars() {
            let byte = self.byte_for(ch).ok_or(PosError::Encoding {
                ch,
                code_page: self.name(),
            })?;
            out.push(byte);
        }
        Ok(out)
    }
}

fn lookup_high(table: &str, ch: char) -> Option<u8> {
    if ch == '\0' {
        return None;
    }
    table
        .chars()
        .position(|c| c == ch)
        .map(|i| 0x80 + i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_upper_half() {
        assert_eq!(PC437_HIGH.chars().count(), 128);
        assert_eq!(PC850_HIGH.chars().count(), 128);
        assert_eq!(PC858_HIGH.chars().count(), 128);
        assert_eq!(PC865_HIGH.chars().count(), 128);
        assert_eq!(WPC1252_80_9F.chars().count(), 32);
    }

    #[test]
    fn test_ascii_passthrough() {
        for page in [
            CodePage::Pc437,
            CodePage::Pc850,
            CodePage::Pc858,
            CodePage::Pc865,
            CodePage::Wpc1252,
        ] {
            assert_eq!(page.encode("Hello, world!\n").unwrap(), b"Hello, world!\n");
        }
    }

    #[test]
    fn test_pc437_spanish_text() {
        // "¿Qué?" → ¿=0xA8, Q, u, é=0x82, ?
        assert_eq!(
            CodePage::Pc437.encode("¿Qué?").unwrap(),
            vec![0xA8, 0x51, 0x75, 0x82, 0x3F]
        );
    }

    #[test]
    fn test_pc437_box_drawing() {
        assert_eq!(
            CodePage::Pc437.encode("┌──┐").unwrap(),
            vec![0xDA, 0xC4, 0xC4, 0xBF]
        );
    }

    #[test]
    fn test_pc850_differs_from_pc437() {
        assert_eq!(CodePage::Pc850.byte_for('ø'), Some(0x9B));
        assert_eq!(CodePage::Pc437.byte_for('ø'), None);
        assert_eq!(CodePage::Pc850.byte_for('Á'), Some(0xB5));
        assert_eq!(CodePage::Pc850.byte_for('ß'), Some(0xE1));
        assert_eq!(CodePage::Pc850.byte_for('─'), Some(0xC4));
    }

    #[test]
    fn test_pc858_euro_sign() {
        assert_eq!(CodePage::Pc858.byte_for('€'), Some(0xD5));
        assert_eq!(CodePage::Pc850.byte_for('€'), None);
        assert_eq!(CodePage::Pc850.byte_for('ı'), Some(0xD5));
    }

    #[test]
    fn test_pc865_nordic_letters() {
        assert_eq!(CodePage::Pc865.byte_for('ø'), Some(0x9B));
        assert_eq!(CodePage::Pc865.byte_for('Ø'), Some(0x9D));
        assert_eq!(CodePage::Pc865.byte_for('¤'), Some(0xAF));
    }

    #[test]
    fn test_wpc1252() {
        assert_eq!(CodePage::Wpc1252.byte_for('€'), Some(0x80));
        assert_eq!(CodePage::Wpc1252.byte_for('é'), Some(0xE9));
        assert_eq!(CodePage::Wpc1252.byte_for('—'), Some(0x97));
        assert_eq!(CodePage::Wpc1252.byte_for('─'), None);
    }

    #[test]
    fn test_unmapped_char_is_an_error() {
        let err = CodePage::Pc850.encode("a★b").unwrap_err();
        assert!(matches!(
            err,
            PosError::Encoding {
                ch: '★',
                code_page: "PC850"
            }
        ));
    }

    #[test]
    fn test_region_selectors() {
        assert_eq!(Region::default(), Region::Multilingual);
        assert_eq!(Region::Multilingual.selector(), 2);
        assert_eq!(Region::Usa.code_page(), CodePage::Pc437);
        assert_eq!(Region::by_name("EURO"), Some(Region::Euro));
        assert_eq!(Region::by_name("klingon"), None);
    }
}
