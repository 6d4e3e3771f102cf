use super::auth::{Credentials, CredentialsProvider, ScopedCredentials};
use super::request::{Entity, HeaderMap, Request};
use super::response::Response;
use super::transport::Transport;

/// A GET/POST facade over a [`Transport`].
///
/// Every call builds a fresh [`Request`], attaches a credential store when
/// credentials are given, and sends it through the transport exactly once.
/// Transport errors are returned unmodified.
#[derive(Debug)]
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Wraps `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The underlying transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the client, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Sends a `GET` for `target` with `headers`.
    ///
    /// With `credentials`, the transport receives a store that yields them for
    /// [`AuthScope::ANY`](super::auth::AuthScope::ANY).
    pub fn get(
        &mut self,
        target: &str,
        headers: &HeaderMap,
        credentials: Option<&Credentials>,
    ) -> Result<Response, T::Error> {
        let request = Request::get(target).with_headers(headers.clone());
        self.send(&request, credentials)
    }

    /// Sends a `POST` for `target` with `headers`.
    ///
    /// `body` is attached as a `text/plain; charset=UTF-8` entity; `None`
    /// sends no entity at all.
    pub fn post(
        &mut self,
        target: &str,
        headers: &HeaderMap,
        body: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> Result<Response, T::Error> {
        let request = Request::post(target, body.map(Entity::text)).with_headers(headers.clone());
        self.send(&request, credentials)
    }

    fn send(
        &mut self,
        request: &Request<'_>,
        credentials: Option<&Credentials>,
    ) -> Result<Response, T::Error> {
        let store = credentials.cloned().map(ScopedCredentials::any);
        debug!(
            "{} {} (auth: {})",
            request.method().as_str(),
            request.target(),
            store.is_some()
        );

        let response = self
            .transport
            .execute(request, store.as_ref().map(|s| s as &dyn CredentialsProvider))?;

        debug!(
            "{} {} -> {}",
            request.method().as_str(),
            request.target(),
            response.status_code()
        );
        Ok(response)
    }
}
