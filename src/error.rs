//! # Error Types
//!
//! This module defines error types used throughout the poswire library.
//!
//! Parameter validation and text encoding happen before any bytes reach the
//! command buffer, so an `Err` from a session operation always means the
//! buffer was left untouched.

use thiserror::Error;

/// Main error type for poswire operations
#[derive(Debug, Error)]
pub enum PosError {
    /// Out-of-range numeric parameter (spacing, tab count, QR module size,
    /// feed count, column count below one, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Character with no representation in the target code page
    #[error("Cannot encode {ch:?} in code page {code_page}")]
    Encoding { ch: char, code_page: &'static str },

    /// Transport-level errors (connection, write)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Missing external resource (bitmap or config file)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
