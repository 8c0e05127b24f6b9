//! # poswire - ESC/POS Receipt Printer Library
//!
//! poswire assembles ESC/POS command streams for thermal receipt printers
//! and sends them over the network. It provides:
//!
//! - **Protocol implementation**: ESC/POS command builders
//! - **Layout**: fixed-width columns, receipt rows, totals and boxes
//! - **Codes**: 1D barcodes and QR codes
//! - **Images**: resize, threshold and 24-dot bit-image packing
//! - **Transport**: raw TCP (port 9100), device/dump files, in-memory
//!
//! ## Quick Start
//!
//! ```no_run
//! use poswire::{Printer, PrinterConfig, TcpTransport};
//! use poswire::protocol::barcode::qr::QrPayload;
//!
//! let config = PrinterConfig::default().with_host("192.168.1.50");
//! let mut printer = Printer::new(config.clone(), TcpTransport::from_config(&config));
//!
//! printer.align_center();
//! printer.set_bold(true);
//! printer.write_line("RECEIPT")?;
//! printer.set_bold(false);
//! printer.print_qr(&QrPayload::new("https://example.com", 6))?;
//! printer.align_left();
//!
//! // One write to the printer, then start a new job
//! printer.print_and_cut()?;
//! printer.reset();
//!
//! # Ok::<(), poswire::PosError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders and code pages |
//! | [`layout`] | Fixed-width text layout |
//! | [`render`] | Image preprocessing and thresholding |
//! | [`buffer`] | Job buffer |
//! | [`printer`] | Configuration and print session |
//! | [`transport`] | Communication backends |
//! | [`error`] | Error types |

pub mod buffer;
pub mod error;
pub mod layout;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use buffer::CommandBuffer;
pub use error::PosError;
pub use printer::{Printer, PrinterConfig};
pub use transport::{TcpTransport, Transport};
