//! # libhttp - Minimal HTTP client facade
//!
//! A small HTTP client that issues GET and POST requests with caller-supplied
//! headers, optional HTTP Basic authentication, and a normalized response
//! (status code plus body stream). Request construction and credential
//! attachment live here; moving bytes is delegated to a pluggable
//! [`Transport`](network::application::http::Transport). This library is
//! designed for embedded systems and supports `no_std` environments.
//!
//! ## Features
//!
//! - **Client**: GET/POST facade, one request per call, no hidden state
//! - **Basic authentication**: explicit credential stores scoped by host, port,
//!   realm and scheme
//! - **HTTP/1.1 transport**: works over any connection implementing the
//!   [`network`] traits, answers Basic challenges
//! - **TCP connector**: `std::net` backed connector (feature `std`)
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libhttp = "0.1.0"
//! ```
//!
//! ### Basic HTTP Client Example
//!
//! ```rust,no_run
//! use libhttp::network::application::http::{Client, ConnectionTransport, Credentials, HeaderMap, Options};
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
//! let mut client = Client::new(ConnectionTransport::new(MockNetwork, Options::default()));
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("Accept", "text/plain").unwrap();
//! let credentials = Credentials::new("alice", "secret").unwrap();
//!
//! // let response = client.post("example.com/api/data", &headers, Some("23.5"), Some(&credentials))?;
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (`std::io::Read` for bodies, TCP connector)
//! - `defmt`: Enable defmt logging support for embedded debugging
//! - `log`: Emit logs through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer providing connection traits and the HTTP client.
///
/// Contains the core connection traits and the application layer HTTP
/// implementation built on top of them.
pub mod network;
