//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum defines the errors raised by the crate's own transports and by
/// the fixed-capacity request/response types. It is designed to be simple and
/// portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// A connection attempt was refused.
    ConnectionRefused,
    /// A timeout occurred.
    Timeout,
    /// The connection was closed.
    ConnectionClosed,
    /// An invalid address was provided.
    InvalidAddress,
    /// A protocol-specific error occurred.
    ProtocolError,
    /// A fixed-capacity buffer (header map, credential store, request buffer)
    /// could not hold the value.
    CapacityExceeded,
    /// The response body did not fit into the response buffer.
    BodyTooLarge,
    /// A header name is not a token, or a header value contains CR, LF or NUL.
    InvalidHeader,
    /// Only one of username and password was supplied.
    IncompleteCredentials,
}

impl Error {
    fn as_str(&self) -> &'static str {
        match self {
            Error::WriteError => "write error",
            Error::ReadError => "read error",
            Error::ConnectionRefused => "connection refused",
            Error::Timeout => "timed out",
            Error::ConnectionClosed => "connection closed",
            Error::InvalidAddress => "invalid address",
            Error::ProtocolError => "protocol error",
            Error::CapacityExceeded => "capacity exceeded",
            Error::BodyTooLarge => "response body too large",
            Error::InvalidHeader => "invalid header name or value",
            Error::IncompleteCredentials => "username and password must be supplied together",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::ConnectionRefused => defmt::write!(f, "ConnectionRefused"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::InvalidAddress => defmt::write!(f, "InvalidAddress"),
            Error::ProtocolError => defmt::write!(f, "ProtocolError"),
            Error::CapacityExceeded => defmt::write!(f, "CapacityExceeded"),
            Error::BodyTooLarge => defmt::write!(f, "BodyTooLarge"),
            Error::InvalidHeader => defmt::write!(f, "InvalidHeader"),
            Error::IncompleteCredentials => defmt::write!(f, "IncompleteCredentials"),
        }
    }
}
