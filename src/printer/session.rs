//! # Print Session
//!
//! [`Printer`] owns one [`CommandBuffer`] and one [`Transport`]. Every
//! operation builds its complete byte sequence first and appends it in one
//! step, so a call that returns `Err` leaves the buffer exactly as it was.
//!
//! Style calls are plain command emitters. The session does not track which
//! styles are on; callers issue matching on/off pairs.
//!
//! ## Example
//!
//! ```
//! use poswire::printer::{Printer, PrinterConfig};
//! use poswire::transport::MemoryTransport;
//!
//! let mut printer = Printer::new(PrinterConfig::default(), MemoryTransport::new());
//! printer.align_center();
//! printer.write_line("Café Olé")?;
//! printer.align_left();
//! printer.print_and_cut()?;
//!
//! assert_eq!(printer.transport().jobs().len(), 1);
//! # Ok::<(), poswire::PosError>(())
//! ```

use std::path::Path;

use image::DynamicImage;
use log::info;

use super::config::PrinterConfig;
use crate::buffer::CommandBuffer;
use crate::error::PosError;
use crate::layout::{self, ColumnSpec, ReceiptLine};
use crate::protocol::barcode::barcode1d::BarcodeSymbol;
use crate::protocol::barcode::qr::{self, QrPayload};
use crate::protocol::codepage::{CodePage, Region};
use crate::protocol::{commands, graphics, text};
use crate::render::raster::{self, RasterImage};
use crate::transport::Transport;

/// A print session: config, job buffer and transport.
pub struct Printer<T: Transport> {
    config: PrinterConfig,
    buffer: CommandBuffer,
    region: Region,
    transport: T,
}

impl<T: Transport> Printer<T> {
    /// Start a session with a freshly reset buffer.
    pub fn new(config: PrinterConfig, transport: T) -> Self {
        let region = config.region;
        let mut printer = Self {
            config,
            buffer: CommandBuffer::new(),
            region,
            transport,
        };
        printer.reset();
        printer
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Region whose code page text is encoded into.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    #[inline]
    fn code_page(&self) -> CodePage {
        self.region.code_page()
    }

    // ========================================================================
    // BUFFER
    // ========================================================================

    /// Discard the job and start over with `ESC @`, then `ESC t` for the
    /// session region so the printer decodes text in the same code page.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.buffer.append(&text::code_table(self.region));
    }

    /// Append raw bytes to the job.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.append(bytes);
    }

    /// Send the job as it stands. The buffer is kept.
    pub fn print(&mut self) -> Result<(), PosError> {
        info!("printing job of {} bytes", self.buffer.len());
        self.buffer.flush(&mut self.transport)
    }

    /// Append a cut and send the job. The buffer is kept.
    pub fn print_and_cut(&mut self) -> Result<(), PosError> {
        self.buffer.append(&commands::feed_and_cut());
        self.print()
    }

    /// Send bytes straight to the transport, bypassing the buffer.
    pub fn send_raw(&mut self, bytes: &[u8]) -> Result<(), PosError> {
        info!("sending {} raw bytes", bytes.len());
        self.transport.send(bytes)
    }

    /// The job as space-separated decimal bytes.
    pub fn buffer_string(&self) -> String {
        self.buffer.to_decimal_string()
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    /// Encode `text` into the session code page, without a line feed.
    pub fn write(&mut self, text: &str) -> Result<(), PosError> {
        let bytes = self.code_page().encode(text)?;
        self.buffer.append(&bytes);
        Ok(())
    }

    /// Encode `text` into the session code page and end the line.
    pub fn write_line(&mut self, text: &str) -> Result<(), PosError> {
        let mut bytes = self.code_page().encode(text)?;
        bytes.push(commands::LF);
        self.buffer.append(&bytes);
        Ok(())
    }

    /// Select `region`'s character table on the printer and encode later
    /// text into its code page.
    pub fn select_region(&mut self, region: Region) {
        self.buffer.append(&text::code_table(region));
        self.region = region;
    }

    // ========================================================================
    // STYLES
    // ========================================================================

    pub fn align_left(&mut self) {
        self.buffer.append(&text::align_left());
    }

    pub fn align_center(&mut self) {
        self.buffer.append(&text::align_center());
    }

    pub fn align_right(&mut self) {
        self.buffer.append(&text::align_right());
    }

    pub fn set_bold(&mut self, on: bool) {
        self.buffer.append(&text::bold(on));
    }

    pub fn set_underline(&mut self, on: bool) {
        self.buffer.append(&text::underline(on));
    }

    pub fn set_invert(&mut self, on: bool) {
        self.buffer.append(&text::invert(on));
    }

    pub fn set_upside_down(&mut self, on: bool) {
        self.buffer.append(&text::upside_down(on));
    }

    pub fn set_font_a(&mut self) {
        self.buffer.append(&text::font(text::Font::A));
    }

    pub fn set_font_b(&mut self) {
        self.buffer.append(&text::font(text::Font::B));
    }

    /// Back to power-on defaults (`ESC @`). Also clears every style.
    ///
    /// The session region is selected again afterwards.
    pub fn set_font_default(&mut self) {
        let mut cmd = commands::init();
        cmd.extend(text::code_table(self.region));
        self.buffer.append(&cmd);
    }

    pub fn set_size(&mut self, double_width: bool, double_height: bool) {
        self.buffer.append(&text::size(double_width, double_height));
    }

    /// Extra dots to the right of every character (0..=48).
    pub fn character_right_space(&mut self, dots: u8) -> Result<(), PosError> {
        let cmd = text::character_spacing(dots)?;
        self.buffer.append(&cmd);
        Ok(())
    }

    /// `count` horizontal tabs (0..=4).
    pub fn inline_tab(&mut self, count: u8) -> Result<(), PosError> {
        let cmd = text::tabs(count)?;
        self.buffer.append(&cmd);
        Ok(())
    }

    // ========================================================================
    // PAPER
    // ========================================================================

    pub fn feed_line(&mut self) {
        self.buffer.append(&commands::feed_line());
    }

    /// Print and feed `lines` lines (1..=255).
    pub fn feed_lines(&mut self, lines: u8) -> Result<(), PosError> {
        let cmd = commands::feed_lines(lines)?;
        self.buffer.append(&cmd);
        Ok(())
    }

    pub fn feed_and_cut(&mut self) {
        self.buffer.append(&commands::feed_and_cut());
    }

    /// Buzzer: `times` beeps of `duration` × 100ms (both 1..=9).
    pub fn beep(&mut self, times: u8, duration: u8) -> Result<(), PosError> {
        let cmd = commands::beep(times, duration)?;
        self.buffer.append(&cmd);
        Ok(())
    }

    /// A rule of box-drawing characters, at most one line long.
    pub fn horizontal_line(&mut self, length: usize) {
        self.buffer.append(&commands::horizontal_line(length));
    }

    // ========================================================================
    // LAYOUT
    // ========================================================================

    /// One line of fixed-width columns. Counts above 5 clamp; 0 is rejected.
    pub fn print_in_column<S: AsRef<str>>(
        &mut self,
        cells: &[S],
        column_count: usize,
    ) -> Result<(), PosError> {
        let spec = ColumnSpec::with_line_width(column_count, self.config.chars_per_line)?;
        let bytes = self.code_page().encode(&layout::column_line(cells, spec))?;
        self.buffer.append(&bytes);
        Ok(())
    }

    /// Bold column header, then one row per item.
    pub fn print_receipt_lines(&mut self, lines: &[ReceiptLine]) -> Result<(), PosError> {
        let page = self.code_page();
        let mut cmd = text::bold(true);
        cmd.extend(page.encode(&layout::receipt_header())?);
        cmd.extend(text::bold(false));
        for line in lines {
            cmd.extend(page.encode(&line.render())?);
        }
        self.buffer.append(&cmd);
        Ok(())
    }

    /// Double-size `label ... amount` on a half-width line.
    pub fn print_total(&mut self, label: &str, amount: &str) -> Result<(), PosError> {
        let mut cmd = text::size(true, true);
        cmd.extend(self.code_page().encode(&layout::total_line(label, amount))?);
        cmd.extend(text::size(false, false));
        self.buffer.append(&cmd);
        Ok(())
    }

    /// Centered box of `lines` drawn with `border`; alignment returns to left.
    pub fn write_box<S: AsRef<str>>(&mut self, lines: &[S], border: char) -> Result<(), PosError> {
        let page = self.code_page();
        let mut cmd = text::align_center();
        for line in layout::box_lines(lines, border) {
            cmd.extend(page.encode(&line)?);
        }
        cmd.extend(text::align_left());
        self.buffer.append(&cmd);
        Ok(())
    }

    // ========================================================================
    // CODES AND IMAGES
    // ========================================================================

    pub fn print_barcode(&mut self, symbol: &BarcodeSymbol) -> Result<(), PosError> {
        let cmd = symbol.encode(self.code_page())?;
        self.buffer.append(&cmd);
        Ok(())
    }

    pub fn print_qr(&mut self, payload: &QrPayload) -> Result<(), PosError> {
        let cmd = qr::generate(payload)?;
        self.buffer.append(&cmd);
        Ok(())
    }

    /// Resize, threshold and print a decoded image.
    pub fn print_image(&mut self, image: &DynamicImage, center: bool) -> Result<(), PosError> {
        let dots = raster::rasterize(image, &self.config.image_limits(), center);
        self.print_raster(&dots)
    }

    /// Decode an image file and print it.
    pub fn print_image_file(
        &mut self,
        path: impl AsRef<Path>,
        center: bool,
    ) -> Result<(), PosError> {
        let image = raster::load_image(path)?;
        self.print_image(&image, center)
    }

    /// Print an already thresholded dot grid as is.
    pub fn print_raster(&mut self, dots: &RasterImage) -> Result<(), PosError> {
        let cmd = graphics::bit_image(dots)?;
        self.buffer.append(&cmd);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
