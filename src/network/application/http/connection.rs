//! HTTP/1.1 transport over the crate's [`Connect`]/[`Connection`] traits.
//!
//! Every request opens its own connection, sends `Connection: close` and reads
//! until the response is complete. Basic authentication is answered from the
//! credential store passed with the request: either up front when
//! [`Options::preemptive_auth`] is set, or once after a `401` carrying a Basic
//! `WWW-Authenticate` challenge.

use super::auth::{AuthScheme, AuthScope, CredentialsProvider, MAX_SCOPE_FIELD_LEN};
use super::request::{Request, is_valid_header_name, is_valid_header_value};
use super::response::{Body, MAX_BODY_LEN, Response};
use super::transport::Transport;
use crate::network::error::Error;
use crate::network::{Close, Connect, Connection, Read, Write};
use core::fmt::Write as _;
use heapless::{String, Vec};

const REQUEST_HEAD_LEN: usize = 4096;
const RESPONSE_BUF_LEN: usize = 4096;
const MAX_ADDRESS_LEN: usize = 128;
const READ_CHUNK_LEN: usize = 256;
const STATUS_UNAUTHORIZED: u16 = 401;

/// Configuration for a [`ConnectionTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Send credentials with the first request instead of waiting for a
    /// challenge.
    pub preemptive_auth: bool,
    /// Port used when the target names none.
    pub default_port: u16,
    /// `User-Agent` sent unless the request carries its own.
    pub user_agent: Option<&'static str>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            preemptive_auth: false,
            default_port: 80,
            user_agent: Some(concat!("libhttp/", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// A [`Transport`] speaking HTTP/1.1 over connections opened by `N`.
///
/// ```rust,no_run
/// use libhttp::network::application::http::{Client, ConnectionTransport, HeaderMap, Options};
/// # use libhttp::network::{Close, Connect, Connection, Read, Write};
/// # struct MockConnection;
/// # impl Connection for MockConnection {}
/// # impl Read for MockConnection {
/// #     type Error = ();
/// #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
/// # }
/// # impl Write for MockConnection {
/// #     type Error = ();
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl Close for MockConnection {
/// #     type Error = ();
/// #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockNetwork;
/// # impl Connect for MockNetwork {
/// #     type Connection = MockConnection;
/// #     type Error = ();
/// #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, ()> { Ok(MockConnection) }
/// # }
///
/// let transport = ConnectionTransport::new(MockNetwork, Options::default());
/// let mut client = Client::new(transport);
///
/// // let response = client.get("example.com/status", &HeaderMap::new(), None)?;
/// ```
#[derive(Debug)]
pub struct ConnectionTransport<N: Connect> {
    network: N,
    options: Options,
}

impl<N: Connect> ConnectionTransport<N> {
    /// Creates a transport opening connections through `network`.
    pub fn new(network: N, options: Options) -> Self {
        Self { network, options }
    }

    /// The connector.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// The connector, mutably.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// The transport configuration.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Opens a connection, performs one request/response exchange and closes it.
    fn exchange(
        &mut self,
        request: &Request<'_>,
        endpoint: &Endpoint<'_>,
        authorization: Option<&str>,
    ) -> Result<(Head, Body), Error> {
        let mut address: String<MAX_ADDRESS_LEN> = String::new();
        write!(address, "{}:{}", endpoint.host, endpoint.port).map_err(|_| Error::InvalidAddress)?;

        trace!("connecting to {}", address.as_str());
        let mut connection = self
            .network
            .connect(&address)
            .map_err(|_| Error::ConnectionRefused)?;

        let result = round_trip(&mut connection, request, endpoint, authorization, &self.options);
        if connection.close().is_err() {
            trace!("close failed for {}", address.as_str());
        }
        result
    }
}

impl<N: Connect> Transport for ConnectionTransport<N> {
    type Error = Error;

    fn execute(
        &mut self,
        request: &Request<'_>,
        credentials: Option<&dyn CredentialsProvider>,
    ) -> Result<Response, Self::Error> {
        let endpoint = parse_target(request.target(), self.options.default_port)?;

        let mut authorization = None;
        if self.options.preemptive_auth {
            if let Some(provider) = credentials {
                let scope = endpoint.scope(None)?;
                authorization = provider
                    .credentials(&scope)
                    .map(|c| c.basic_authorization())
                    .transpose()?;
            }
        }

        let (head, body) = self.exchange(request, &endpoint, authorization.as_deref())?;
        debug!("{} {} -> {}", request.method().as_str(), endpoint.path, head.status_code);

        if head.status_code == STATUS_UNAUTHORIZED && authorization.is_none() {
            if let (Some(provider), Some(challenge)) = (credentials, head.challenge.as_ref()) {
                let scope = endpoint.scope(challenge.realm.as_deref())?;
                match provider.credentials(&scope) {
                    Some(found) => {
                        debug!(
                            "answering {} challenge from {}",
                            challenge.scheme.as_str(),
                            endpoint.host
                        );
                        let value = found.basic_authorization()?;
                        let (head, body) = self.exchange(request, &endpoint, Some(value.as_str()))?;
                        return Ok(Response::new(head.status_code, body));
                    }
                    None => warn!("no credentials for challenge from {}", endpoint.host),
                }
            }
        }

        Ok(Response::new(head.status_code, body))
    }
}

/// The pieces of a target the wire format needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoint<'a> {
    authority: &'a str,
    host: &'a str,
    port: u16,
    path: &'a str,
}

impl Endpoint<'_> {
    fn scope(&self, realm: Option<&str>) -> Result<AuthScope, Error> {
        let scope = AuthScope::new()
            .with_host(self.host)?
            .with_port(self.port)
            .with_scheme(AuthScheme::Basic);
        match realm {
            Some(realm) => scope.with_realm(realm),
            None => Ok(scope),
        }
    }
}

/// Splits `[scheme://]host[:port][/path]`; `host` may be a bracketed IPv6 literal.
fn parse_target(target: &str, default_port: u16) -> Result<Endpoint<'_>, Error> {
    let rest = target.split_once("://").map_or(target, |(_, rest)| rest);
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    // bracketed IPv6 literals keep their brackets so `host:port` stays connectable
    let (host, port) = match authority.strip_prefix('[') {
        Some(inner) => {
            let close = inner
                .find(']')
                .filter(|&i| i > 0)
                .ok_or(Error::InvalidAddress)?;
            let host = &authority[..close + 2];
            let port = match &inner[close + 1..] {
                "" => None,
                rest => Some(rest.strip_prefix(':').ok_or(Error::InvalidAddress)?),
            };
            (host, port)
        }
        None => match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        },
    };
    let port = match port {
        Some(port) => port.parse::<u16>().map_err(|_| Error::InvalidAddress)?,
        None => default_port,
    };

    if host.is_empty()
        || host.contains(char::is_whitespace)
        || path.contains(char::is_whitespace)
    {
        return Err(Error::InvalidAddress);
    }

    Ok(Endpoint {
        authority,
        host,
        port,
        path,
    })
}

fn round_trip<C: Connection>(
    connection: &mut C,
    request: &Request<'_>,
    endpoint: &Endpoint<'_>,
    authorization: Option<&str>,
    options: &Options,
) -> Result<(Head, Body), Error> {
    let mut head: Vec<u8, REQUEST_HEAD_LEN> = Vec::new();
    write_head(&mut head, request, endpoint, authorization, options)?;

    write_all(connection, &head)?;
    if let Some(entity) = request.entity() {
        write_all(connection, entity.content())?;
    }
    connection.flush().map_err(|_| Error::WriteError)?;

    read_response(connection)
}

fn write_head(
    buf: &mut Vec<u8, REQUEST_HEAD_LEN>,
    request: &Request<'_>,
    endpoint: &Endpoint<'_>,
    authorization: Option<&str>,
    options: &Options,
) -> Result<(), Error> {
    let headers = request.headers();

    // Request line
    push(buf, request.method().as_str())?;
    push(buf, " ")?;
    push(buf, endpoint.path)?;
    push(buf, " HTTP/1.1\r\n")?;

    // Headers
    if !headers.contains_ignore_case("Host") {
        push_header(buf, "Host", endpoint.authority)?;
    }
    for (name, value) in headers.iter() {
        // Content-Length always comes from the entity
        if name.eq_ignore_ascii_case("Content-Length")
            || (authorization.is_some() && name.eq_ignore_ascii_case("Authorization"))
        {
            continue;
        }
        push_header(buf, name, value)?;
    }
    if let Some(agent) = options.user_agent {
        if !headers.contains_ignore_case("User-Agent") {
            push_header(buf, "User-Agent", agent)?;
        }
    }
    if let Some(value) = authorization {
        push_header(buf, "Authorization", value)?;
    }
    if !headers.contains_ignore_case("Connection") {
        push_header(buf, "Connection", "close")?;
    }

    // Entity headers; the content itself is written straight to the connection
    if let Some(entity) = request.entity() {
        if !headers.contains_ignore_case("Content-Type") {
            push_header(buf, "Content-Type", entity.content_type())?;
        }
        let mut len: String<20> = String::new();
        write!(len, "{}", entity.len()).map_err(|_| Error::CapacityExceeded)?;
        push_header(buf, "Content-Length", &len)?;
    }

    push(buf, "\r\n")
}

fn push(buf: &mut Vec<u8, REQUEST_HEAD_LEN>, s: &str) -> Result<(), Error> {
    buf.extend_from_slice(s.as_bytes())
        .map_err(|_| Error::CapacityExceeded)
}

fn push_header(buf: &mut Vec<u8, REQUEST_HEAD_LEN>, name: &str, value: &str) -> Result<(), Error> {
    if !is_valid_header_name(name) || !is_valid_header_value(value) {
        return Err(Error::InvalidHeader);
    }
    push(buf, name)?;
    push(buf, ": ")?;
    push(buf, value)?;
    push(buf, "\r\n")
}

fn write_all<C: Write>(connection: &mut C, mut bytes: &[u8]) -> Result<(), Error> {
    while !bytes.is_empty() {
        match connection.write(bytes) {
            Ok(0) | Err(_) => return Err(Error::WriteError),
            Ok(n) => bytes = &bytes[n..],
        }
    }
    Ok(())
}

/// A parsed WWW-Authenticate challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Challenge {
    scheme: AuthScheme,
    realm: Option<String<MAX_SCOPE_FIELD_LEN>>,
}

/// Parses `Basic realm="..."`. Unsupported schemes yield `None`.
fn parse_challenge(value: &str) -> Option<Challenge> {
    let value = value.trim();
    let (scheme, params) = value
        .split_once(char::is_whitespace)
        .unwrap_or((value, ""));
    let scheme = AuthScheme::parse(scheme)?;
    let realm = params
        .split(',')
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("realm"))
        .and_then(|(_, realm)| String::try_from(realm.trim().trim_matches('"')).ok());
    Some(Challenge { scheme, realm })
}

/// Status line and the headers the transport acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Head {
    status_code: u16,
    content_length: Option<usize>,
    chunked: bool,
    challenge: Option<Challenge>,
}

fn parse_head(head: &[u8]) -> Result<Head, Error> {
    let head = core::str::from_utf8(head).map_err(|_| Error::ProtocolError)?;
    let mut lines = head.split("\r\n");

    // Parse status line
    let status_line = lines.next().ok_or(Error::ProtocolError)?;
    let mut status_parts = status_line.splitn(3, ' ');
    let version = status_parts.next().ok_or(Error::ProtocolError)?;
    if !version.starts_with("HTTP/") {
        return Err(Error::ProtocolError);
    }
    let status_code = status_parts
        .next()
        .ok_or(Error::ProtocolError)?
        .parse::<u16>()
        .map_err(|_| Error::ProtocolError)?;

    let mut parsed = Head {
        status_code,
        content_length: None,
        chunked: false,
        challenge: None,
    };

    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once(':').ok_or(Error::ProtocolError)?;
        let (name, value) = (name.trim(), value.trim());

        if name.eq_ignore_ascii_case("Content-Length") {
            parsed.content_length = Some(value.parse::<usize>().map_err(|_| Error::ProtocolError)?);
        } else if name.eq_ignore_ascii_case("Transfer-Encoding") {
            parsed.chunked = value
                .rsplit(',')
                .next()
                .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"));
        } else if name.eq_ignore_ascii_case("WWW-Authenticate") && parsed.challenge.is_none() {
            parsed.challenge = parse_challenge(value);
        }
    }

    Ok(parsed)
}

fn has_body(status_code: u16) -> bool {
    !(100..200).contains(&status_code) && status_code != 204 && status_code != 304
}

fn read_response<C: Read>(connection: &mut C) -> Result<(Head, Body), Error> {
    let mut raw: Vec<u8, RESPONSE_BUF_LEN> = Vec::new();

    let header_end = loop {
        if let Some(pos) = find_slice(&raw, b"\r\n\r\n") {
            break pos;
        }
        if raw.len() == raw.capacity() {
            // head does not fit the response buffer
            return Err(Error::CapacityExceeded);
        }
        if read_chunk(connection, &mut raw)? == 0 {
            return Err(if raw.is_empty() {
                Error::ConnectionClosed
            } else {
                Error::ProtocolError
            });
        }
    };

    let head = parse_head(&raw[..header_end])?;
    let body_start = header_end + 4;

    let body = if !has_body(head.status_code) {
        Body::empty()
    } else if head.chunked {
        while read_chunk(connection, &mut raw)? > 0 {}
        decode_chunked(&raw[body_start..])?
    } else if let Some(len) = head.content_length {
        if len > MAX_BODY_LEN {
            return Err(Error::BodyTooLarge);
        }
        while raw.len() - body_start < len {
            if read_chunk(connection, &mut raw)? == 0 {
                // Prematurely closed
                return Err(Error::ConnectionClosed);
            }
        }
        Body::from_slice(&raw[body_start..body_start + len])?
    } else {
        while read_chunk(connection, &mut raw)? > 0 {}
        Body::from_slice(&raw[body_start..])?
    };

    Ok((head, body))
}

/// Reads once from `connection` into the tail of `raw`.
fn read_chunk<C: Read>(connection: &mut C, raw: &mut Vec<u8, RESPONSE_BUF_LEN>) -> Result<usize, Error> {
    let room = (raw.capacity() - raw.len()).min(READ_CHUNK_LEN);
    if room == 0 {
        return Err(Error::BodyTooLarge);
    }
    let mut chunk = [0u8; READ_CHUNK_LEN];
    let n = connection
        .read(&mut chunk[..room])
        .map_err(|_| Error::ReadError)?;
    raw.extend_from_slice(&chunk[..n])
        .map_err(|_| Error::BodyTooLarge)?;
    Ok(n)
}

fn decode_chunked(mut data: &[u8]) -> Result<Body, Error> {
    let mut body: Vec<u8, MAX_BODY_LEN> = Vec::new();
    loop {
        let line_end = find_slice(data, b"\r\n").ok_or(Error::ProtocolError)?;
        let size_line = core::str::from_utf8(&data[..line_end]).map_err(|_| Error::ProtocolError)?;
        // chunk extensions after ';' are ignored
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16).map_err(|_| Error::ProtocolError)?;
        data = &data[line_end + 2..];

        if size == 0 {
            break;
        }
        // the whole reply is already buffered, so a chunk must fit in what is left
        let end = size
            .checked_add(2)
            .filter(|&end| end <= data.len())
            .ok_or(Error::ProtocolError)?;
        if &data[size..end] != b"\r\n" {
            return Err(Error::ProtocolError);
        }
        body.extend_from_slice(&data[..size])
            .map_err(|_| Error::BodyTooLarge)?;
        data = &data[end..];
    }
    Body::from_slice(&body)
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
