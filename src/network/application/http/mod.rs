//! HTTP client facade for embedded and hosted systems.
//!
//! The [`Client`] turns a target, a header map, an optional text body and
//! optional Basic credentials into a [`Request`], hands it to a [`Transport`]
//! and returns the [`Response`]. It adds no retries, redirects or timeouts;
//! everything below request construction belongs to the transport.
//!
//! # Features
//!
//! - GET and POST with caller-supplied headers
//! - `text/plain; charset=UTF-8` request bodies
//! - HTTP Basic authentication through an explicit credential store
//! - Pluggable transports, including an HTTP/1.1 [`ConnectionTransport`]
//!   over any [`Connect`](crate::network::Connect) implementation
//! - Fixed-size buffers for predictable memory usage
//!
//! # Usage
//!
//! ```rust
//! use libhttp::network::application::http::{
//!     Client, CredentialsProvider, Credentials, HeaderMap, Request, Response, Transport,
//! };
//! use libhttp::network::error::Error;
//!
//! /// Answers every request with a canned response.
//! struct Canned;
//!
//! impl Transport for Canned {
//!     type Error = Error;
//!     fn execute(
//!         &mut self,
//!         _request: &Request<'_>,
//!         _credentials: Option<&dyn CredentialsProvider>,
//!     ) -> Result<Response, Error> {
//!         Response::from_parts(200, b"OK")
//!     }
//! }
//!
//! let mut client = Client::new(Canned);
//! let mut headers = HeaderMap::new();
//! headers.insert("Accept", "text/plain").unwrap();
//!
//! let credentials = Credentials::new("alice", "secret").unwrap();
//! let response = client.get("api.example.com/status", &headers, Some(&credentials)).unwrap();
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.body().as_bytes(), b"OK");
//! ```

/// Credentials, authentication scopes and credential stores.
pub mod auth;

/// The GET/POST client.
pub mod client;

/// HTTP/1.1 transport over the crate's connection traits.
pub mod connection;

/// Outbound request types.
pub mod request;

/// Response and body stream.
pub mod response;

/// The transport trait.
pub mod transport;

pub use auth::{
    AuthScheme, AuthScope, BasicCredentialsProvider, Credentials, CredentialsProvider,
    ScopedCredentials,
};
pub use client::Client;
pub use connection::{ConnectionTransport, Options};
pub use request::{Entity, HeaderMap, Method, Request, TEXT_PLAIN_UTF8};
pub use response::{Body, Response};
pub use transport::Transport;
