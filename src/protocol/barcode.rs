//! # ESC/POS Barcode Commands
//!
//! This module implements barcode generation commands for ESC/POS printers.
//!
//! ## Supported Barcode Types
//!
//! | Type | Command | Description |
//! |------|---------|-------------|
//! | 1D symbologies | GS k m data NUL | UPC, EAN, Code39/93/128, ... |
//! | QR Code | GS ( k | 2D matrix, stored then printed |
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use poswire::protocol::barcode::barcode1d::{self, Symbology};
//!
//! let cmd = barcode1d::barcode(Symbology::Ean13, "1234567890123").unwrap();
//! assert_eq!(&cmd[..3], &[0x1D, 0x6B, 2]);
//! ```
//!
//! ## QR Code Usage
//!
//! QR codes are generated in a multi-step process: select the model, set the
//! module size and error correction, store the data, then print it.
//!
//! ```
//! use poswire::protocol::barcode::qr::{self, QrPayload};
//!
//! let cmd = qr::generate(&QrPayload::new("https://example.com", 6)).unwrap();
//! assert_eq!(*cmd.last().unwrap(), 0x0A);
//! ```

use super::commands::{GS, LF, NUL};

// ============================================================================
// 1D BARCODE COMMANDS (GS k)
// ============================================================================

/// 1D Barcode command builders
///
/// Prints linear barcodes using the format-A `GS k m d1...dk NUL` command.
pub mod barcode1d {
    use log::warn;

    use super::{GS, LF, NUL};
    use crate::error::PosError;
    use crate::protocol::codepage::CodePage;
    use crate::protocol::text;

    /// Code page barcode data is remapped into before emission.
    pub const SYMBOL_CODE_PAGE: CodePage = CodePage::Pc850;

    /// 1D barcode symbologies and their `GS k` selector bytes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum Symbology {
        /// UPC-A (11-12 digits)
        UpcA = 0,
        /// UPC-E (11-12 digits, compressed on the printer)
        UpcE = 1,
        /// EAN-13 / JAN-13 (12-13 digits)
        Ean13 = 2,
        /// EAN-8 / JAN-8 (7-8 digits)
        Ean8 = 3,
        /// Code39 (A-Z, 0-9, space, -.$/%+)
        Code39 = 4,
        /// Interleaved 2 of 5
        I25 = 5,
        /// NW-7 / Codabar
        Codabar = 6,
        /// Code93
        Code93 = 7,
        /// Code128
        Code128 = 8,
        /// Code11
        Code11 = 9,
        /// MSI Plessey
        Msi = 10,
    }

    impl Symbology {
        /// Every symbology, in selector order.
        pub const ALL: [Self; 11] = [
            Self::UpcA,
            Self::UpcE,
            Self::Ean13,
            Self::Ean8,
            Self::Code39,
            Self::I25,
            Self::Codabar,
            Self::Code93,
            Self::Code128,
            Self::Code11,
            Self::Msi,
        ];

        /// The `m` byte of `GS k m`.
        #[inline]
        pub const fn selector(self) -> u8 {
            self as u8
        }

        /// Whether `len` data characters satisfy this symbology's length rule.
        ///
        /// | Symbology | Valid length |
        /// |-----------|--------------|
        /// | UPC-A, UPC-E | 11-12 |
        /// | EAN13 | 12-13 |
        /// | EAN8 | 7-8 |
        /// | I25 | > 1, or even |
        /// | others | > 1 |
        pub const fn accepts_length(self, len: usize) -> bool {
            match self {
                Self::UpcA | Self::UpcE => len == 11 || len == 12,
                Self::Ean13 => len == 12 || len == 13,
                Self::Ean8 => len == 7 || len == 8,
                Self::I25 => len > 1 || len % 2 == 0,
                Self::Code39
                | Self::Codabar
                | Self::Code93
                | Self::Code128
                | Self::Code11
                | Self::Msi => len > 1,
            }
        }

        /// Code93 and Code128 carry full ASCII, so their data is sent as raw
        /// UTF-8 without case folding.
        #[inline]
        pub const fn is_raw(self) -> bool {
            matches!(self, Self::Code93 | Self::Code128)
        }

        /// Parse a symbology name (`ean13`, `upc-a`, `code128`, ...).
        pub fn by_name(name: &str) -> Option<Self> {
            let key: String = name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();
            match key.as_str() {
                "upca" => Some(Self::UpcA),
                "upce" => Some(Self::UpcE),
                "ean13" => Some(Self::Ean13),
                "ean8" => Some(Self::Ean8),
                "code39" => Some(Self::Code39),
                "i25" | "itf" => Some(Self::I25),
                "codabar" | "codebar" | "nw7" => Some(Self::Codabar),
                "code93" => Some(Self::Code93),
                "code128" => Some(Self::Code128),
                "code11" => Some(Self::Code11),
                "msi" => Some(Self::Msi),
                _ => None,
            }
        }
    }

    /// Data bytes for a symbol: raw UTF-8 for Code93/Code128, otherwise the
    /// upper-cased text remapped into [`SYMBOL_CODE_PAGE`].
    ///
    /// ## Errors
    ///
    /// [`PosError::Encoding`] if the upper-cased text has no PC850 form.
    pub fn payload(symbology: Symbology, data: &str) -> Result<Vec<u8>, PosError> {
        if symbology.is_raw() {
            Ok(data.as_bytes().to_vec())
        } else {
            SYMBOL_CODE_PAGE.encode(&data.to_uppercase())
        }
    }

    /// # Print Barcode (GS k m d1...dk NUL)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS k m d1...dk NUL |
    /// | Hex     | 1D 6B m d1...dk 00 |
    /// | Decimal | 29 107 m d1...dk 0 |
    ///
    /// When the data length breaks the symbology's rule the selector byte `m`
    /// is left out while prefix, data and terminator are still emitted. The
    /// resulting command is malformed on the wire; that output is kept as-is
    /// for compatibility with existing printer setups.
    ///
    /// ## Errors
    ///
    /// Only encoding failures; a length violation is not an error.
    pub fn barcode(symbology: Symbology, data: &str) -> Result<Vec<u8>, PosError> {
        let payload = payload(symbology, data)?;
        let len = data.chars().count();

        let mut cmd = Vec::with_capacity(payload.len() + 4);
        cmd.push(GS);
        cmd.push(b'k');
        if symbology.accepts_length(len) {
            cmd.push(symbology.selector());
        } else {
            warn!("{symbology:?} data length {len} is out of range, omitting selector byte");
        }
        cmd.extend_from_slice(&payload);
        cmd.push(NUL);
        Ok(cmd)
    }

    /// A barcode print request.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BarcodeSymbol {
        pub symbology: Symbology,
        pub data: String,
        pub print_centered: bool,
        pub print_human_readable: bool,
    }

    impl BarcodeSymbol {
        /// Create a left-aligned symbol without a text line.
        pub fn new(symbology: Symbology, data: impl Into<String>) -> Self {
            Self {
                symbology,
                data: data.into(),
                print_centered: false,
                print_human_readable: false,
            }
        }

        /// Wrap the symbol in center / left alignment commands.
        pub fn centered(mut self) -> Self {
            self.print_centered = true;
            self
        }

        /// Print the data as a text line under the symbol.
        pub fn human_readable(mut self) -> Self {
            self.print_human_readable = true;
            self
        }

        /// Build the complete byte sequence for this symbol.
        ///
        /// `text_page` is the code page of the human-readable line.
        pub fn encode(&self, text_page: CodePage) -> Result<Vec<u8>, PosError> {
            let mut cmd = Vec::new();
            if self.print_centered {
                cmd.extend(text::align_center());
            }
            cmd.extend(barcode(self.symbology, &self.data)?);
            if self.print_human_readable {
                cmd.extend(text_page.encode(&self.data)?);
                cmd.push(LF);
            }
            if self.print_centered {
                cmd.extend(text::align_left());
            }
            Ok(cmd)
        }
    }
}

// ============================================================================
// QR CODE COMMANDS (GS ( k)
// ============================================================================

/// QR Code command builders
///
/// Every step is a `GS ( k pL pH cn fn ...` function block with `cn = 49`
/// (QR Code). `pL pH` count the bytes after themselves.
pub mod qr {
    use log::debug;

    use super::{GS, LF};
    use crate::error::PosError;
    use crate::protocol::commands::u16_le;
    use crate::protocol::text;

    /// Smallest accepted module size in dots.
    pub const MIN_MODULE_SIZE: u8 = 1;

    /// Largest accepted module size in dots.
    pub const MAX_MODULE_SIZE: u8 = 15;

    /// Symbol type byte for QR Code.
    const CN_QR: u8 = 49;

    /// A QR print request.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct QrPayload {
        pub data: String,
        pub module_size: u8,
        pub centered: bool,
    }

    impl QrPayload {
        /// Create a left-aligned payload.
        pub fn new(data: impl Into<String>, module_size: u8) -> Self {
            Self {
                data: data.into(),
                module_size,
                centered: false,
            }
        }

        /// Wrap the sequence in center / left alignment commands.
        pub fn centered(mut self) -> Self {
            self.centered = true;
            self
        }
    }

    fn function_block(params: &[u8]) -> Vec<u8> {
        // Parameter blocks of the fixed functions are a handful of bytes.
        let [pl, ph] = u16_le(params.len() as u16);
        let mut cmd = vec![GS, b'(', b'k', pl, ph];
        cmd.extend_from_slice(params);
        cmd
    }

    /// # Select Model (fn 65): Model 2
    ///
    /// `GS ( k 4 0 49 65 50 0`
    pub fn select_model() -> Vec<u8> {
        function_block(&[CN_QR, 65, 50, 0])
    }

    /// # Set Module Size (fn 67)
    ///
    /// `GS ( k 3 0 49 67 n`
    ///
    /// ## Errors
    ///
    /// `size` outside 1..=15 is rejected with [`PosError::InvalidArgument`].
    pub fn module_size(size: u8) -> Result<Vec<u8>, PosError> {
        if !(MIN_MODULE_SIZE..=MAX_MODULE_SIZE).contains(&size) {
            return Err(PosError::InvalidArgument(format!(
                "QR module size must be between {MIN_MODULE_SIZE} and {MAX_MODULE_SIZE} (got {size})"
            )));
        }
        Ok(function_block(&[CN_QR, 67, size]))
    }

    /// # Set Error Correction Level (fn 69): level L
    ///
    /// `GS ( k 3 0 49 69 48`
    pub fn error_correction() -> Vec<u8> {
        function_block(&[CN_QR, 69, 48])
    }

    /// # Store Symbol Data (fn 80)
    ///
    /// `GS ( k pL pH 49 80 48 d1...dk` where `pL + pH × 256 = k + 3`.
    ///
    /// The two-byte length field caps the payload at 65532 bytes. No lower cap
    /// is applied.
    ///
    /// ## Errors
    ///
    /// Payloads too long for the length field are rejected.
    pub fn store_data(data: &[u8]) -> Result<Vec<u8>, PosError> {
        let len = u16::try_from(data.len() + 3).map_err(|_| {
            PosError::InvalidArgument(format!(
                "QR data of {} bytes exceeds the 65532-byte store limit",
                data.len()
            ))
        })?;
        let [pl, ph] = u16_le(len);

        let mut cmd = Vec::with_capacity(data.len() + 8);
        cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, CN_QR, 80, 48]);
        cmd.extend_from_slice(data);
        Ok(cmd)
    }

    /// # Print Stored Symbol (fn 81)
    ///
    /// `GS ( k 3 0 49 81 48`
    pub fn print_symbol() -> Vec<u8> {
        function_block(&[CN_QR, 81, 48])
    }

    /// # Transmit Symbol Size (fn 82)
    ///
    /// `GS ( k 3 0 49 82 48`
    pub fn transmit_size() -> Vec<u8> {
        function_block(&[CN_QR, 82, 48])
    }

    /// Generate the complete QR sequence for a payload.
    ///
    /// Validation happens before any bytes are produced.
    pub fn generate(payload: &QrPayload) -> Result<Vec<u8>, PosError> {
        let size = module_size(payload.module_size)?;
        let store = store_data(payload.data.as_bytes())?;

        let mut cmd = Vec::with_capacity(store.len() + 48);
        if payload.centered {
            cmd.extend(text::align_center());
        }
        cmd.extend(select_model());
        cmd.extend(size);
        cmd.extend(error_correction());
        cmd.extend(store);
        cmd.extend(print_symbol());
        cmd.extend(transmit_size());
        cmd.push(LF);
        if payload.centered {
            cmd.extend(text::align_left());
        }
        debug!(
            "qr: {} data bytes, module size {}, {} command bytes",
            payload.data.len(),
            payload.module_size,
            cmd.len()
        );
        Ok(cmd)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod barcode1d_tests {
        use super::barcode1d::*;
        use crate::error::PosError;
        use crate::protocol::codepage::CodePage;

        #[test]
        fn test_ean13_valid_length_emits_selector() {
            let cmd = barcode(Symbology::Ean13, "1234567890123").unwrap();
            assert_eq!(&cmd[0..3], &[29, 107, 2]);
            assert_eq!(&cmd[3..16], b"1234567890123");
            assert_eq!(cmd[16], 0);
            assert_eq!(cmd.len(), 3 + 13 + 1);
        }

        #[test]
        fn test_ean13_short_data_omits_selector() {
            let cmd = barcode(Symbology::Ean13, "12").unwrap();
            assert_eq!(cmd, vec![29, 107, b'1', b'2', 0]);
        }

        #[test]
        fn test_selectors_follow_declaration_order() {
            for (i, s) in Symbology::ALL.iter().enumerate() {
                assert_eq!(s.selector() as usize, i);
            }
        }

        #[test]
        fn test_length_rules() {
            assert!(Symbology::UpcA.accepts_length(11));
            assert!(Symbology::UpcA.accepts_length(12));
            assert!(!Symbology::UpcA.accepts_length(13));
            assert!(Symbology::UpcE.accepts_length(12));
            assert!(!Symbology::Ean13.accepts_length(11));
            assert!(Symbology::Ean8.accepts_length(7));
            assert!(!Symbology::Ean8.accepts_length(9));
            assert!(!Symbology::Code39.accepts_length(1));
            assert!(Symbology::Code39.accepts_length(2));
        }

        #[test]
        fn test_i25_accepts_empty_even_length() {
            assert!(Symbology::I25.accepts_length(0));
            assert!(!Symbology::I25.accepts_length(1));
            assert!(Symbology::I25.accepts_length(3));
        }

        #[test]
        fn test_code39_upper_cases_data() {
            let cmd = barcode(Symbology::Code39, "abc-1").unwrap();
            assert_eq!(cmd, vec![29, 107, 4, b'A', b'B', b'C', b'-', b'1', 0]);
        }

        #[test]
        fn test_non_raw_data_remapped_to_pc850() {
            // 'é' upper-cases to 'É', 0x90 in PC850
            let cmd = barcode(Symbology::Codabar, "aé").unwrap();
            assert_eq!(cmd, vec![29, 107, 6, b'A', 0x90, 0]);
        }

        #[test]
        fn test_code128_keeps_raw_utf8() {
            let cmd = barcode(Symbology::Code128, "aé").unwrap();
            assert_eq!(cmd, vec![29, 107, 8, b'a', 0xC3, 0xA9, 0]);
        }

        #[test]
        fn test_unmappable_data_is_an_error() {
            let err = barcode(Symbology::Code39, "A★").unwrap_err();
            assert!(matches!(err, PosError::Encoding { ch: '★', .. }));
        }

        #[test]
        fn test_symbol_centered_with_human_readable() {
            let cmd = BarcodeSymbol::new(Symbology::Code39, "AB")
                .centered()
                .human_readable()
                .encode(CodePage::Pc850)
                .unwrap();
            assert_eq!(
                cmd,
                vec![
                    27, 97, 1, // center
                    29, 107, 4, b'A', b'B', 0, // symbol
                    b'A', b'B', 10, // text line
                    27, 97, 0, // left
                ]
            );
        }

        #[test]
        fn test_by_name() {
            assert_eq!(Symbology::by_name("EAN-13"), Some(Symbology::Ean13));
            assert_eq!(Symbology::by_name("upc_a"), Some(Symbology::UpcA));
            assert_eq!(Symbology::by_name("codebar"), Some(Symbology::Codabar));
            assert_eq!(Symbology::by_name("pdf417"), None);
        }
    }

    mod qr_tests {
        use super::qr::*;
        use crate::error::PosError;

        #[test]
        fn test_select_model() {
            assert_eq!(select_model(), vec![29, 40, 107, 4, 0, 49, 65, 50, 0]);
        }

        #[test]
        fn test_module_size() {
            assert_eq!(module_size(1).unwrap(), vec![29, 40, 107, 3, 0, 49, 67, 1]);
            assert_eq!(module_size(15).unwrap(), vec![29, 40, 107, 3, 0, 49, 67, 15]);
        }

        #[test]
        fn test_module_size_out_of_range() {
            assert!(matches!(module_size(0), Err(PosError::InvalidArgument(_))));
            assert!(matches!(module_size(16), Err(PosError::InvalidArgument(_))));
        }

        #[test]
        fn test_fixed_blocks() {
            assert_eq!(error_correction(), vec![29, 40, 107, 3, 0, 49, 69, 48]);
            assert_eq!(print_symbol(), vec![29, 40, 107, 3, 0, 49, 81, 48]);
            assert_eq!(transmit_size(), vec![29, 40, 107, 3, 0, 49, 82, 48]);
        }

        #[test]
        fn test_store_data_length_field() {
            let cmd = store_data(b"hello").unwrap();
            assert_eq!(&cmd[..8], &[29, 40, 107, 8, 0, 49, 80, 48]);
            assert_eq!(&cmd[8..], b"hello");
        }

        #[test]
        fn test_store_data_length_field_crosses_256() {
            for n in [252usize, 253, 254, 300, 1000] {
                let data = vec![b'x'; n];
                let cmd = store_data(&data).unwrap();
                assert_eq!(cmd[3] as usize, (n + 3) % 256);
                assert_eq!(cmd[4] as usize, (n + 3) / 256);
            }
        }

        #[test]
        fn test_store_data_too_long() {
            let data = vec![b'x'; 65533];
            assert!(store_data(&data).is_err());
            let data = vec![b'x'; 65532];
            assert!(store_data(&data).is_ok());
        }

        #[test]
        fn test_generate_sequence() {
            let cmd = generate(&QrPayload::new("AB", 4)).unwrap();
            let mut expected = Vec::new();
            expected.extend(select_model());
            expected.extend(module_size(4).unwrap());
            expected.extend(error_correction());
            expected.extend(store_data(b"AB").unwrap());
            expected.extend(print_symbol());
            expected.extend(transmit_size());
            expected.push(10);
            assert_eq!(cmd, expected);
        }

        #[test]
        fn test_generate_centered() {
            let cmd = generate(&QrPayload::new("AB", 4).centered()).unwrap();
            assert_eq!(&cmd[..3], &[27, 97, 1]);
            assert_eq!(&cmd[cmd.len() - 3..], &[27, 97, 0]);
        }

        #[test]
        fn test_generate_rejects_bad_size() {
            assert!(generate(&QrPayload::new("AB", 0)).is_err());
            assert!(generate(&QrPayload::new("AB", 16)).is_err());
        }
    }
}
