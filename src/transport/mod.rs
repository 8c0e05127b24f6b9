//! # Printer Transport Layer
//!
//! Backends that deliver a finished job to a printer. A job is always handed
//! over as one complete byte slice; transports never see partial jobs.
//!
//! ## Available Transports
//!
//! - [`tcp`]: raw TCP printing port (9100), one connection per job
//! - [`file`]: device node or dump file
//! - [`MemoryTransport`]: keeps jobs in memory, for tests and dry runs

pub mod file;
pub mod tcp;

use crate::error::PosError;

pub use file::FileTransport;
pub use tcp::TcpTransport;

/// Something that can take a complete job.
pub trait Transport {
    /// Deliver `data` in full, or fail. No retries.
    fn send(&mut self, data: &[u8]) -> Result<(), PosError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, data: &[u8]) -> Result<(), PosError> {
        (**self).send(data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<(), PosError> {
        (**self).send(data)
    }
}

/// Records every job it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTransport {
    jobs: Vec<Vec<u8>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs in the order they were sent.
    pub fn jobs(&self) -> &[Vec<u8>] {
        &self.jobs
    }

    /// The most recent job, if any.
    pub fn last_job(&self) -> Option<&[u8]> {
        self.jobs.last().map(Vec::as_slice)
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), PosError> {
        self.jobs.push(data.to_vec());
        Ok(())
    }
}
