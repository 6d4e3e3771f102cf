//! The seam between the [`Client`](super::client::Client) and whatever
//! actually moves bytes.

use super::auth::CredentialsProvider;
use super::request::Request;
use super::response::Response;

/// An HTTP execution engine.
///
/// A transport receives a fully formed [`Request`] plus an optional credential
/// store and returns a [`Response`] or its own error. It is responsible for
/// connection handling, wire encoding and answering authentication challenges
/// from the store. The crate ships
/// [`ConnectionTransport`](super::connection::ConnectionTransport); tests can
/// substitute a fake.
pub trait Transport {
    /// Transport-level failure, returned to callers untouched.
    type Error: core::fmt::Debug;

    /// Sends `request` and returns the response.
    fn execute(
        &mut self,
        request: &Request<'_>,
        credentials: Option<&dyn CredentialsProvider>,
    ) -> Result<Response, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn execute(
        &mut self,
        request: &Request<'_>,
        credentials: Option<&dyn CredentialsProvider>,
    ) -> Result<Response, Self::Error> {
        (**self).execute(request, credentials)
    }
}
