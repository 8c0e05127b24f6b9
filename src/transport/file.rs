//! # File Transport
//!
//! Writes jobs to a path: a printer device node such as `/dev/usb/lp0`, or
//! an ordinary file when dumping jobs for inspection.
//!
//! Each job truncates the target, so a dump file always holds the last job.
//! Large jobs are written in chunks with an optional pause in between for
//! devices with small input buffers.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::info;

use super::Transport;
use crate::error::PosError;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// # File Printer Transport
#[derive(Debug, Clone)]
pub struct FileTransport {
    path: PathBuf,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl FileTransport {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::ZERO,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is none.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for FileTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), PosError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                PosError::Transport(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        for chunk in data.chunks(self.chunk_size) {
            file.write_all(chunk)
                .map_err(|e| PosError::Transport(format!("Write failed: {}", e)))?;
            if !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }

        file.flush()
            .map_err(|e| PosError::Transport(format!("Flush failed: {}", e)))?;

        info!("wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}
