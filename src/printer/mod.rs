//! # Printer Module
//!
//! Printer configuration and the print session that assembles jobs.
//!
//! ## Modules
//!
//! - [`config`]: Network target, paper geometry, image limits
//! - [`session`]: [`Printer`], the buffer-plus-transport session

pub mod config;
pub mod session;

pub use config::PrinterConfig;
pub use session::Printer;
