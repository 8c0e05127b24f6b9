//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! used by most thermal receipt printers. Every builder is a pure function
//! returning the bytes of one command; nothing here holds state.
//!
//! ## Module Structure
//!
//! - [`commands`]: Control bytes and device commands (init, feed, cut, beep)
//! - [`text`]: Text styling (alignment, fonts, bold, underline, etc.)
//! - [`codepage`]: Region → code page selection and text encoding
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`graphics`]: 24-dot bit-image packing
//!
//! ## Usage Example
//!
//! ```
//! use poswire::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! data.extend(text::align_left());
//! data.extend(commands::feed_and_cut());
//! ```

pub mod barcode;
pub mod codepage;
pub mod commands;
pub mod graphics;
pub mod text;
