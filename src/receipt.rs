//! # Receipt Templates
//!
//! Demo jobs built through a [`Printer`] session. They exercise text
//! styles, the layout helpers, barcodes and QR codes, and are what the
//! `poswire demo` command prints.
//!
//! Templates only append to the session buffer; the caller decides when to
//! feed, print and reset.

use crate::error::PosError;
use crate::layout::ReceiptLine;
use crate::printer::Printer;
use crate::protocol::barcode::barcode1d::{BarcodeSymbol, Symbology};
use crate::protocol::barcode::qr::QrPayload;
use crate::transport::Transport;

// ============================================================================
// RECEIPT TEMPLATES
// ============================================================================

/// A short store receipt.
///
/// Features demonstrated:
/// - Alignment, bold, double size
/// - Receipt rows and a total line
/// - Inverted banner and upside-down text
/// - Boxed footer
pub fn demo_receipt<T: Transport>(printer: &mut Printer<T>) -> Result<(), PosError> {
    // Header
    printer.align_center();
    printer.set_size(true, true);
    printer.set_bold(true);
    printer.write_line("CHURRA MART")?;
    printer.set_bold(false);
    printer.set_size(false, false);
    printer.set_underline(true);
    printer.write_line("esc/pos demo receipt")?;
    printer.set_underline(false);
    printer.write_line("2026-01-20 12:00:00")?;
    printer.feed_line();

    // Inverted banner
    printer.set_invert(true);
    printer.write_line("  TODAY ONLY: 0% OFF EVERYTHING  ")?;
    printer.set_invert(false);
    printer.align_left();
    printer.feed_line();

    // Items
    printer.print_receipt_lines(&[
        ReceiptLine::new("1", "Liminal Espresso", "4.50"),
        ReceiptLine::new("1", "Basement Techno Vinyl", "29.00"),
        ReceiptLine::new("3", "Thermal Paper (mystery)", "7.25"),
        ReceiptLine::new("12", "Sticker: *****", "2.00"),
    ])?;
    printer.horizontal_line(42);

    // Totals
    printer.print_in_column(&["SUBTOTAL", "", "42.75"], 3)?;
    printer.print_in_column(&["HST (13%)", "", "5.56"], 3)?;
    printer.print_total("TOTAL", "48.31")?;
    printer.feed_line();

    // Upside down easter egg
    printer.align_center();
    printer.set_upside_down(true);
    printer.write_line("secret message from below")?;
    printer.set_upside_down(false);

    // Fine print
    printer.align_left();
    printer.set_font_b();
    printer.write_line("fine print: some options depend on printer DIP switches.")?;
    printer.set_font_a();
    printer.feed_line();

    printer.write_box(&["thank you", "COME BACK SOON"], '*')
}

/// The demo receipt followed by a Code39 barcode and a QR code.
pub fn full_receipt<T: Transport>(printer: &mut Printer<T>) -> Result<(), PosError> {
    demo_receipt(printer)?;

    printer.align_center();
    printer.set_bold(true);
    printer.write_line("CODES")?;
    printer.set_bold(false);
    printer.align_left();

    printer.write_line("1D Barcode (Code39 + text):")?;
    printer.print_barcode(
        &BarcodeSymbol::new(Symbology::Code39, "churra-2026-0001")
            .centered()
            .human_readable(),
    )?;
    printer.feed_line();

    printer.write_line("QR Code:")?;
    printer.print_qr(&QrPayload::new("https://example.invalid/churra-mart", 6).centered())
}

/// Names accepted by [`by_name`].
pub fn list_receipts() -> &'static [&'static str] {
    &["receipt", "receipt-full"]
}

/// Whether [`by_name`] knows `name` (case-insensitive).
pub fn is_receipt(name: &str) -> bool {
    list_receipts().contains(&name.to_lowercase().as_str())
}

/// Append the named receipt to the session.
///
/// ## Errors
///
/// [`PosError::NotFound`] for names not in [`list_receipts`].
pub fn by_name<T: Transport>(name: &str, printer: &mut Printer<T>) -> Result<(), PosError> {
    match name.to_lowercase().as_str() {
        "receipt" => demo_receipt(printer),
        "receipt-full" => full_receipt(printer),
        _ => Err(PosError::NotFound(format!("receipt '{name}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::PrinterConfig;
    use crate::transport::MemoryTransport;

    fn printer() -> Printer<MemoryTransport> {
        Printer::new(PrinterConfig::default(), MemoryTransport::new())
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_demo_receipt_not_empty() {
        let mut printer = printer();
        demo_receipt(&mut printer).unwrap();
        let bytes = printer.buffer().as_bytes();
        assert!(bytes.len() > 500);
        assert!(contains(bytes, b"CHURRA MART\n"));
    }

    #[test]
    fn test_full_receipt_has_codes() {
        let mut printer = printer();
        full_receipt(&mut printer).unwrap();
        let bytes = printer.buffer().as_bytes();
        // Code39 selector, then upper-cased data
        assert!(contains(bytes, b"\x1Dk\x04CHURRA-2026-0001\x00"));
        // QR store block
        assert!(contains(bytes, &[0x1D, 0x28, 0x6B, 38, 0, 49, 80, 48]));
    }

    #[test]
    fn test_templates_do_not_print() {
        let mut printer = printer();
        full_receipt(&mut printer).unwrap();
        assert!(printer.transport().jobs().is_empty());
    }

    #[test]
    fn test_templates_leave_feed_to_caller() {
        let mut printer = printer();
        full_receipt(&mut printer).unwrap();
        let bytes = printer.buffer().as_bytes();
        assert!(!contains(bytes, &[0x1B, 0x64, 3]));
        // QR line feed, then back to left alignment
        assert!(bytes.ends_with(&[0x0A, 0x1B, 0x61, 0]));
    }

    #[test]
    fn test_by_name() {
        let mut printer = printer();
        assert!(by_name("RECEIPT", &mut printer).is_ok());
        assert!(matches!(
            by_name("nonexistent", &mut printer),
            Err(PosError::NotFound(_))
        ));
    }

    #[test]
    fn test_is_receipt() {
        assert!(is_receipt("receipt-full"));
        assert!(!is_receipt("ripple"));
    }
}
