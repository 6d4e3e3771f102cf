//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocol implementations built on the core
//! network traits.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP client facade with Basic authentication
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connection`](crate::network::Connection)
//! - **No-std Compatible**: Designed for embedded systems without heap allocation
//! - **Resource Conscious**: Use fixed-size buffers and minimal memory
//!
//! ## Usage Pattern
//!
//! 1. Create a connector for your transport layer
//! 2. Wrap it with a protocol transport and client
//! 3. Use protocol-specific methods for communication
//!
//! ```rust,no_run
//! use libhttp::network::application::http::{Client, ConnectionTransport, HeaderMap, Options};
//! # use libhttp::network::{Close, Connect, Connection, Read, Write};
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockNetwork;
//! # impl Connect for MockNetwork {
//! #     type Connection = MockConnection;
//! #     type Error = ();
//! #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, ()> { Ok(MockConnection) }
//! # }
//!
//! // 1. Create connector (implementation-specific)
//! let network = MockNetwork;
//!
//! // 2. Wrap with protocol transport and client
//! let mut client = Client::new(ConnectionTransport::new(network, Options::default()));
//!
//! // 3. Use protocol methods
//! // let response = client.get("example.com/api/status", &HeaderMap::new(), None)?;
//! ```

/// HTTP client implementation.
///
/// Provides GET and POST with custom headers and Basic authentication over a
/// pluggable transport.
pub mod http;
