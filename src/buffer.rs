//! # Command Buffer
//!
//! The byte sequence of one print job. Encoders never write to the printer
//! directly: they build their bytes, the session appends them here, and the
//! whole buffer goes to the transport in a single call.

use log::debug;

use crate::error::PosError;
use crate::protocol::commands;
use crate::transport::Transport;

/// Append-only job buffer. Starts with the initialize command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Vec<u8>,
}

impl CommandBuffer {
    /// A buffer holding only `ESC @`.
    pub fn new() -> Self {
        Self {
            bytes: commands::init(),
        }
    }

    /// Clear the job and start over with `ESC @`.
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.bytes.extend(commands::init());
    }

    /// Append bytes verbatim.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hand the whole buffer to `transport` in one write. The buffer is kept.
    pub fn flush<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<(), PosError> {
        debug!("flushing {} bytes", self.bytes.len());
        transport.send(&self.bytes)
    }

    /// Space-separated decimal bytes, e.g. `"27 64 10"`.
    pub fn to_decimal_string(&self) -> String {
        self.bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    #[test]
    fn test_new_starts_with_init() {
        let buffer = CommandBuffer::new();
        assert_eq!(buffer.as_bytes(), &[0x1B, 0x40]);
        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_reset_discards_job() {
        let mut buffer = CommandBuffer::new();
        buffer.append(b"hello\n");
        buffer.reset();
        assert_eq!(buffer.as_bytes(), &[0x1B, 0x40]);
    }

    #[test]
    fn test_append_is_verbatim() {
        let mut buffer = CommandBuffer::new();
        buffer.append(&[0xFF, 0x00]);
        buffer.append(&[]);
        buffer.append(b"A");
        assert_eq!(buffer.as_bytes(), &[0x1B, 0x40, 0xFF, 0x00, b'A']);
    }

    #[test]
    fn test_flush_sends_once_and_keeps_bytes() {
        let mut buffer = CommandBuffer::new();
        buffer.append(b"x");
        let mut transport = MemoryTransport::new();
        buffer.flush(&mut transport).unwrap();
        assert_eq!(transport.jobs(), &[vec![0x1B, 0x40, b'x']]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_decimal_string() {
        let mut buffer = CommandBuffer::new();
        buffer.append(&[10]);
        assert_eq!(buffer.to_decimal_string(), "27 64 10");
    }
}
