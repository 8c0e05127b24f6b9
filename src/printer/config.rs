//! # Printer Configuration
//!
//! Network target, paper geometry and image limits for an ESC/POS printer.
//!
//! ## Presets
//!
//! | Preset | Paper | Print width | Chars/line |
//! |--------|-------|-------------|------------|
//! | EPSON_80MM | 80mm | 576 dots | 42 |
//! | EPSON_58MM | 58mm | 384 dots | 32 |
//!
//! ## Loading From JSON
//!
//! Every field is optional; missing fields keep the 80mm defaults.
//!
//! ```json
//! { "host": "192.168.1.50", "port": 9100, "region": "euro" }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PosError;
use crate::protocol::codepage::Region;
use crate::render::raster::{ImageLimits, ResizeMode};

/// Conventional raw printing port (JetDirect / RAW).
pub const DEFAULT_PORT: u16 = 9100;

/// # Printer Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Printer host name or IP address
    pub host: String,

    /// Raw printing port
    pub port: u16,

    /// Time allowed for the TCP connect
    pub connect_timeout_ms: u64,

    /// Time allowed for writing one job
    pub write_timeout_ms: u64,

    /// Printable width in dots; also the canvas width for centered images
    pub width_dots: u32,

    /// Characters per line in the default font
    pub chars_per_line: usize,

    /// Images wider than this are resized
    pub max_image_width: u32,

    /// Images taller than this are resized
    pub max_image_height: u32,

    /// Character code table selected for text
    pub region: Region,

    /// How oversized images are scaled
    pub resize_mode: ResizeMode,
}

impl PrinterConfig {
    /// # 80mm Receipt Printer
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │         576 dots           │ margin  │
    /// ```
    pub const EPSON_80MM: Self = Self {
        host: String::new(),
        port: DEFAULT_PORT,
        connect_timeout_ms: 5_000,
        write_timeout_ms: 30_000,
        width_dots: 576,
        chars_per_line: 42,
        max_image_width: 576,
        max_image_height: 1200,
        region: Region::Multilingual,
        resize_mode: ResizeMode::Stretch,
    };

    /// # 58mm Receipt Printer
    pub const EPSON_58MM: Self = Self {
        host: String::new(),
        port: DEFAULT_PORT,
        connect_timeout_ms: 5_000,
        write_timeout_ms: 30_000,
        width_dots: 384,
        chars_per_line: 32,
        max_image_width: 384,
        max_image_height: 1200,
        region: Region::Multilingual,
        resize_mode: ResizeMode::Stretch,
    };

    /// Set the host, builder style.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port, builder style.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Load a JSON config file.
    ///
    /// ## Errors
    ///
    /// [`PosError::NotFound`] if the file does not exist, [`PosError::Config`]
    /// if it is not valid JSON for this struct.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PosError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PosError::NotFound(path.display().to_string()),
            _ => PosError::Io(e),
        })?;
        serde_json::from_str(&text)
            .map_err(|e| PosError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a JSON config string.
    pub fn from_json(text: &str) -> Result<Self, PosError> {
        serde_json::from_str(text).map_err(|e| PosError::Config(e.to_string()))
    }

    /// `host:port` as passed to the TCP transport.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[inline]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    #[inline]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Preprocessing limits for images printed with this config.
    pub fn image_limits(&self) -> ImageLimits {
        ImageLimits {
            max_width: self.max_image_width,
            max_height: self.max_image_height,
            canvas_width: self.width_dots,
            resize_mode: self.resize_mode,
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::EPSON_80MM
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_80mm() {
        let config = PrinterConfig::default();
        assert_eq!(config, PrinterConfig::EPSON_80MM);
        assert_eq!(config.port, 9100);
        assert_eq!(config.chars_per_line, 42);
        assert_eq!(config.region, Region::Multilingual);
    }

    #[test]
    fn test_58mm_is_narrower() {
        let config = PrinterConfig::EPSON_58MM;
        assert_eq!(config.width_dots, 384);
        assert_eq!(config.image_limits().canvas_width, 384);
    }

    #[test]
    fn test_address() {
        let config = PrinterConfig::default().with_host("10.0.0.7").with_port(6101);
        assert_eq!(config.address(), "10.0.0.7:6101");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            PrinterConfig::from_json(r#"{"host": "printer.local", "region": "euro"}"#).unwrap();
        assert_eq!(config.host, "printer.local");
        assert_eq!(config.region, Region::Euro);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_image_width, 576);
    }

    #[test]
    fn test_resize_mode_from_json() {
        let config = PrinterConfig::from_json(r#"{"resize_mode": "fit"}"#).unwrap();
        assert_eq!(config.resize_mode, ResizeMode::Fit);
    }

    #[test]
    fn test_malformed_json() {
        let err = PrinterConfig::from_json("{ port: ").unwrap_err();
        assert!(matches!(err, PosError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PrinterConfig::from_json_file("/no/such/poswire.json").unwrap_err();
        assert!(matches!(err, PosError::NotFound(_)));
    }

    #[test]
    fn test_timeouts() {
        let config = PrinterConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.write_timeout(), Duration::from_secs(30));
    }
}
