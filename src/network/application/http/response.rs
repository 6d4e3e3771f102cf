//! Normalized response returned by every transport.

use crate::network::Read;
use crate::network::error::Error;
use heapless::Vec;

/// Maximum response body size in bytes.
pub const MAX_BODY_LEN: usize = 2048;

/// A readable response body.
///
/// The body owns its bytes and keeps a read cursor, so it can be drained
/// through the crate's [`Read`] trait (and `std::io::Read` with the `std`
/// feature) while [`as_bytes`](Body::as_bytes) still exposes the full content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    data: Vec<u8, MAX_BODY_LEN>,
    pos: usize,
}

impl Body {
    /// An empty body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copies `bytes` into a new body.
    ///
    /// Fails with [`Error::BodyTooLarge`] if `bytes` exceeds [`MAX_BODY_LEN`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let data = Vec::from_slice(bytes).map_err(|_| Error::BodyTooLarge)?;
        Ok(Self { data, pos: 0 })
    }

    /// The complete body, regardless of how much has been read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The body as UTF-8 text.
    pub fn as_str(&self) -> Result<&str, Error> {
        core::str::from_utf8(&self.data).map_err(|_| Error::ProtocolError)
    }

    /// Bytes not yet consumed by [`Read::read`].
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    /// Total body length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the body has no content.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Read for Body {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.remaining();
        let len = buf.len().min(remaining.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.pos += len;
        Ok(len)
    }
}

#[cfg(feature = "std")]
impl std::io::Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(Read::read(self, buf).unwrap_or(0))
    }
}

/// The result of a request: a status code and a body stream.
///
/// A response is created fresh for every request and handed to the caller,
/// who owns the body from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    body: Body,
}

impl Response {
    /// Creates a response from a status code and body.
    pub fn new(status_code: u16, body: Body) -> Self {
        Self { status_code, body }
    }

    /// Creates a response, copying `body` into a new [`Body`].
    pub fn from_parts(status_code: u16, body: &[u8]) -> Result<Self, Error> {
        Ok(Self::new(status_code, Body::from_slice(body)?))
    }

    /// The HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The response body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The response body, for reading.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Consumes the response, returning its body.
    pub fn into_body(self) -> Body {
        self.body
    }
}
