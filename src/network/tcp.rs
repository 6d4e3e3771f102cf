//! [`Connect`] over `std::net::TcpStream`.

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};
use std::io::{Read as StdRead, Write as StdWrite};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// Opens plain TCP connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpNetwork {
    read_timeout: Option<Duration>,
}

impl TcpNetwork {
    /// A connector without a read timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `timeout` to reads on every connection opened afterwards.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

impl Connect for TcpNetwork {
    type Connection = TcpConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let stream = TcpStream::connect(remote).map_err(|_| Error::ConnectionRefused)?;
        stream
            .set_read_timeout(self.read_timeout)
            .map_err(|_| Error::InvalidAddress)?;
        Ok(TcpConnection { stream })
    }
}

/// A connection opened by [`TcpNetwork`].
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

impl Read for TcpConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => Error::Timeout,
            _ => Error::ReadError,
        })
    }
}

impl Write for TcpConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|_| Error::WriteError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // the peer may already have closed its side
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(_) => Err(Error::ConnectionClosed),
        }
    }
}

impl Connection for TcpConnection {}
