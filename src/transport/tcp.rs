//! # TCP Transport
//!
//! Sends a job to the printer's raw printing port (9100 / JetDirect / RAW).
//!
//! Every [`send`](Transport::send) opens a fresh connection, writes the whole
//! job, flushes and shuts the socket down. Nothing is kept open between jobs
//! and nothing is read back.

use std::io::Write;
use std::net::{IpAddr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, info};

use super::Transport;
use crate::error::PosError;
use crate::printer::config::{DEFAULT_PORT, PrinterConfig};

/// Resolve a printer address to a `SocketAddr`.
///
/// Accepts `IP`, `IP:PORT`, `hostname` and `hostname:PORT`; a missing port
/// defaults to 9100. For names with several addresses the first one wins.
pub fn resolve_printer_addr(input: &str) -> Result<SocketAddr, PosError> {
    if let Ok(addr) = input.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = input.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    if let Some(addr) = input.to_socket_addrs().ok().and_then(|mut a| a.next()) {
        return Ok(addr);
    }

    if let Some(addr) = (input, DEFAULT_PORT)
        .to_socket_addrs()
        .ok()
        .and_then(|mut a| a.next())
    {
        return Ok(addr);
    }

    Err(PosError::Transport(format!("No address found for {input}")))
}

/// # TCP Printer Transport
///
/// ## Example
///
/// ```no_run
/// use poswire::transport::{TcpTransport, Transport};
/// use poswire::protocol::commands;
///
/// let mut transport = TcpTransport::new("192.168.1.50");
/// let mut job = commands::init();
/// job.extend(b"Hello\n");
/// job.extend(commands::feed_and_cut());
/// transport.send(&job)?;
///
/// # Ok::<(), poswire::PosError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TcpTransport {
    addr: String,
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl TcpTransport {
    /// Target `addr` with the default 80mm timeouts.
    pub fn new(addr: impl Into<String>) -> Self {
        let defaults = PrinterConfig::default();
        Self {
            addr: addr.into(),
            connect_timeout: defaults.connect_timeout(),
            write_timeout: defaults.write_timeout(),
        }
    }

    /// Target `config.host:config.port` with the config's timeouts.
    pub fn from_config(config: &PrinterConfig) -> Self {
        Self {
            addr: config.address(),
            connect_timeout: config.connect_timeout(),
            write_timeout: config.write_timeout(),
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, write: Duration) -> Self {
        self.connect_timeout = connect;
        self.write_timeout = write;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn open_stream(&self, addr: &SocketAddr) -> Result<TcpStream, PosError> {
        let stream = TcpStream::connect_timeout(addr, self.connect_timeout)
            .map_err(|e| PosError::Transport(format!("Failed to connect to {addr}: {e}")))?;

        stream
            .set_nodelay(true)
            .and_then(|_| stream.set_write_timeout(Some(self.write_timeout)))
            .map_err(|e| PosError::Transport(format!("Failed to configure {addr}: {e}")))?;

        Ok(stream)
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), PosError> {
        let addr = resolve_printer_addr(&self.addr)?;
        let mut stream = self.open_stream(&addr)?;
        debug!("connected to {addr}");

        stream
            .write_all(data)
            .and_then(|_| stream.flush())
            .map_err(|e| PosError::Transport(format!("Write to {addr} failed: {e}")))?;

        if let Err(e) = stream.shutdown(Shutdown::Both) {
            debug!("shutdown of {addr} failed: {e}");
        }

        info!("sent {} bytes to {addr}", data.len());
        Ok(())
    }
}
